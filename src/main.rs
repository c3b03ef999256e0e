use accrual::session::Session;
use log::{error, info};
use simple_logger::SimpleLogger;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());
    match session.run() {
        Ok(()) => info!("exit requested"),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
        }
    }
    // input is released with the session; both exits report failure
    drop(session);
    ExitCode::FAILURE
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<accrual::accrual::DailyAccrualRecord>();
    is_normal::<accrual::accrual::LoanDescription>();
    is_normal::<accrual::history::History>();
}
