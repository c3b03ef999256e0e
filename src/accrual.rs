use chrono::{Days, NaiveDate};
use log::{debug, trace};
use std::fmt;

use crate::error::AccrualError;

/// Simple interest day count: every year is 365 days, leap years included.
pub const DAYS_IN_YEAR: f64 = 365.;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Debug)]
pub struct LoanDescription {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub principal: f64,
    pub currency: String,
    pub base_rate: f64, // annual rate as a fraction (0.05 for 5%)
    pub margin: f64,    // annual spread as a fraction
}

impl LoanDescription {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        principal: f64,
        currency: impl Into<String>,
        base_rate: f64,
        margin: f64,
    ) -> Self {
        Self {
            start_date,
            end_date,
            principal,
            currency: currency.into(),
            base_rate,
            margin,
        }
    }

    pub fn total_rate(&self) -> f64 {
        self.base_rate + self.margin
    }

    /// Whole days between start and end. Negative if the caller passed an inverted range.
    pub fn day_span(&self) -> i64 {
        self.end_date
            .signed_duration_since(self.start_date)
            .num_days()
    }
}

impl fmt::Display for LoanDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start date {}, end date {}, amount {:.2} {}, base rate {:.4}%, margin {:.4}%, total rate {:.4}%",
            self.start_date,
            self.end_date,
            self.principal,
            self.currency,
            self.base_rate * 100.,
            self.margin * 100.,
            self.total_rate() * 100.
        )
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Debug)]
pub struct DailyAccrualRecord {
    pub accrual_date: NaiveDate,
    pub days_elapsed: u64,
    pub daily_interest_base: f64,
    pub daily_interest_total: f64,
    pub cumulative_interest: f64,
}

impl DailyAccrualRecord {
    pub fn new(
        accrual_date: NaiveDate,
        days_elapsed: u64,
        daily_interest_base: f64,
        daily_interest_total: f64,
        cumulative_interest: f64,
    ) -> Self {
        Self {
            accrual_date,
            days_elapsed,
            daily_interest_base,
            daily_interest_total,
            cumulative_interest,
        }
    }
}

impl fmt::Display for DailyAccrualRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date {}, day {}, interest excl. margin {:.4}, interest {:.4}, cumulative interest {:.4}",
            self.accrual_date.format("%Y-%m-%d"),
            self.days_elapsed,
            self.daily_interest_base,
            self.daily_interest_total,
            self.cumulative_interest
        )
    }
}

fn simple_daily_interest(principal: f64, annual_rate: f64) -> f64 {
    principal * (annual_rate / DAYS_IN_YEAR)
}

/// Expands a loan into one accrual record per calendar day, start and end dates inclusive.
///
/// Inputs are not validated: an inverted date range yields an empty schedule and
/// non-finite amounts or rates flow through to the output unchanged.
pub fn compute_schedule(loan: &LoanDescription) -> Result<Vec<DailyAccrualRecord>, AccrualError> {
    let day_span = loan.day_span();
    if day_span < 0 {
        debug!(
            "end date {} before start date {}, empty schedule",
            loan.end_date, loan.start_date
        );
        return Ok(Vec::new());
    }
    let day_span = day_span as u64;

    let interest_base = simple_daily_interest(loan.principal, loan.base_rate);
    let interest_total = simple_daily_interest(loan.principal, loan.total_rate());

    let mut schedule = Vec::with_capacity(day_span as usize + 1);
    for elapsed_days in 0..=day_span {
        let accrual_date = loan
            .start_date
            .checked_add_days(Days::new(elapsed_days))
            .ok_or(AccrualError::DateOutOfRange {
                start: loan.start_date,
                elapsed_days,
            })?;
        let cumulative = interest_total * (elapsed_days + 1) as f64;
        trace!(
            "day {}, date {}, interest {}, cumulative {}",
            elapsed_days,
            accrual_date,
            interest_total,
            cumulative
        );

        schedule.push(DailyAccrualRecord::new(
            accrual_date,
            elapsed_days,
            interest_base,
            interest_total,
            cumulative,
        ));
    }
    debug!(
        "computed {} accrual records from {} to {}",
        schedule.len(),
        loan.start_date,
        loan.end_date
    );
    Ok(schedule)
}
