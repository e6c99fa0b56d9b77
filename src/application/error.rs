use thiserror::Error;

use crate::domain::LedgerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// The underlying ledger failure, if this error came from the core.
    pub fn ledger_error(&self) -> Option<&LedgerError> {
        match self {
            AppError::Ledger(err) => Some(err),
            AppError::InvalidInput(_) => None,
        }
    }
}
