use thiserror::Error;

use super::{format_cents, Cents};

/// Failures reported by the bookkeeping core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(
        "Insufficient balance: available {}, required {}",
        format_cents(*balance),
        format_cents(*required)
    )]
    InsufficientBalance { balance: Cents, required: Cents },

    #[error("Invalid expense index {index} (ledger has {len} expenses)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message_uses_money_format() {
        let err = LedgerError::InsufficientBalance {
            balance: 2000,
            required: 2500,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: available 20.00, required 25.00"
        );
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = LedgerError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "Invalid expense index 5 (ledger has 2 expenses)"
        );
    }
}
