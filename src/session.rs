use log::{info, warn};
use std::io::{BufRead, Write};

use crate::accrual::{compute_schedule, DailyAccrualRecord, LoanDescription};
use crate::error::{HistoryError, SessionError};
use crate::history::History;
use crate::input::{check_date_range, parse_amount, parse_date, parse_percentage};

const MENU: &str = "What would you like to do?\n\
    1) Start a new loan calculation.\n\
    2) View an existing loan calculation.\n\
    3) Modify an existing loan calculation.\n\
    4) Exit the program.\n";
const ID_PROMPT: &str = "Input the ID of the loan interest calculation record:";

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MenuOption {
    NewCalculation,
    View,
    Modify,
    Exit,
}

impl MenuOption {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "1" => Some(MenuOption::NewCalculation),
            "2" => Some(MenuOption::View),
            "3" => Some(MenuOption::Modify),
            "4" => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Interactive menu over a line-based input and a text output.
///
/// Owns the calculation history for as long as the session lives.
pub struct Session<R, W> {
    input: R,
    output: W,
    history: History,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            history: History::new(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs the menu until the user picks exit.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let answer = self.ask(MENU)?;
            let Some(option) = MenuOption::parse(&answer) else {
                warn!("invalid menu option {:?}", answer);
                writeln!(self.output, "Invalid option selected")?;
                continue;
            };
            writeln!(self.output, "Option {} selected", answer)?;

            match option {
                MenuOption::NewCalculation => self.new_calculation()?,
                MenuOption::View => self.view()?,
                MenuOption::Modify => self.modify()?,
                MenuOption::Exit => {
                    info!(
                        "session ending with {} saved calculations",
                        self.history.len()
                    );
                    return Ok(());
                }
            }
        }
    }

    fn new_calculation(&mut self) -> Result<(), SessionError> {
        let loan = self.read_loan_details()?;
        let schedule = compute_schedule(&loan)?;
        self.print_schedule(&schedule)?;

        let id = self.history.next_id();
        writeln!(self.output, "Saving loan calculation record with ID: {}", id)?;
        self.history.insert(schedule);
        info!("saved loan calculation {}", id);
        Ok(())
    }

    fn view(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.ask_existing_id()? else {
            return Ok(());
        };
        if let Some(record) = self.history.get(&id) {
            writeln!(self.output, "{:#?}", record)?;
        }
        Ok(())
    }

    fn modify(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.ask_existing_id()? else {
            return Ok(());
        };
        let loan = self.read_loan_details()?;
        let schedule = compute_schedule(&loan)?;
        self.print_schedule(&schedule)?;

        match self.history.replace(&id, schedule) {
            Ok(()) => info!("modified loan calculation {}", id),
            Err(HistoryError::NotFound(id)) => {
                writeln!(self.output, "No history found for ID: {}", id)?
            }
        }
        Ok(())
    }

    fn ask_existing_id(&mut self) -> Result<Option<String>, SessionError> {
        let id = self.ask(ID_PROMPT)?;
        if self.history.get(&id).is_some() {
            return Ok(Some(id));
        }
        warn!("unknown loan calculation ID {:?}", id);
        writeln!(self.output, "No history found for ID: {}", id)?;
        Ok(None)
    }

    /// Asks for every loan field, starting over from the start date until all answers are valid.
    pub fn read_loan_details(&mut self) -> Result<LoanDescription, SessionError> {
        loop {
            if let Some(loan) = self.try_read_loan_details()? {
                writeln!(self.output, "Loan Details: {}", loan)?;
                return Ok(loan);
            }
        }
    }

    fn try_read_loan_details(&mut self) -> Result<Option<LoanDescription>, SessionError> {
        let start_date = match parse_date(&self.ask("Enter Start Date (YYYY-MM-DD): ")?) {
            Ok(date) => date,
            Err(e) => {
                warn!("{}", e);
                writeln!(self.output, "Invalid start date format! Please try again.")?;
                return Ok(None);
            }
        };

        let end_date = parse_date(&self.ask("Enter End Date (YYYY-MM-DD): ")?)
            .and_then(|end| check_date_range(start_date, end).map(|_| end));
        let end_date = match end_date {
            Ok(date) => date,
            Err(e) => {
                warn!("{}", e);
                writeln!(
                    self.output,
                    "Invalid end date format or end date is before start date! Please try again."
                )?;
                return Ok(None);
            }
        };

        let amount = self.ask("Enter Loan Amount: ")?;
        let currency = self.ask("Enter Loan Currency: ")?;
        let base_rate = self.ask("Enter Base Interest Rate (%): ")?;
        let margin = self.ask("Enter Margin (%): ")?;

        let parsed = parse_amount("loan amount", &amount).and_then(|amount| {
            let base_rate = parse_percentage("base interest rate", &base_rate)?;
            let margin = parse_percentage("margin", &margin)?;
            Ok((amount, base_rate, margin))
        });
        match parsed {
            Ok((principal, base_rate, margin)) => Ok(Some(LoanDescription::new(
                start_date, end_date, principal, currency, base_rate, margin,
            ))),
            Err(e) => {
                warn!("{}", e);
                writeln!(
                    self.output,
                    "Error: Loan amount, interest rate, and margin must be valid numbers. Please try again."
                )?;
                Ok(None)
            }
        }
    }

    fn print_schedule(&mut self, schedule: &[DailyAccrualRecord]) -> Result<(), SessionError> {
        for record in schedule {
            writeln!(self.output, "{}", record)?;
        }
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
