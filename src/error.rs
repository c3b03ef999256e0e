use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised while expanding a loan into its daily schedule.
#[derive(Error, Debug, PartialEq)]
pub enum AccrualError {
    #[error("accrual date {start} + {elapsed_days} days is outside the supported calendar range")]
    DateOutOfRange { start: NaiveDate, elapsed_days: u64 },
}

/// Rejected user input. The session recovers from all of these by asking again.
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("'{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("{field} '{value}' is not a valid number")]
    NotANumber { field: &'static str, value: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum HistoryError {
    #[error("no history found for ID: {0}")]
    NotFound(String),
}

/// Fatal session failures. Any of these ends the process.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error while prompting: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed while waiting for an answer")]
    InputClosed,

    #[error(transparent)]
    Accrual(#[from] AccrualError),
}
