use chrono::NaiveDate;

use crate::domain::{self, Cents, LedgerError};

use super::AppError;

fn invalid_input(err: LedgerError) -> AppError {
    match err {
        LedgerError::Validation(message) => AppError::InvalidInput(message),
        other => AppError::Ledger(other),
    }
}

/// Parse user-entered money such as "30" or "12.50" into cents.
pub fn parse_amount(input: &str) -> Result<Cents, AppError> {
    domain::parse_cents(input).map_err(invalid_input)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    domain::parse_date(input).map_err(invalid_input)
}
