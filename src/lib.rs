pub mod accrual;
pub mod error;
pub mod history;
pub mod input;
pub mod session;
