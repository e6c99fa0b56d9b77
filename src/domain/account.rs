use serde::Serialize;

use super::{format_cents, Cents, LedgerError};

/// Balance holder owned by a ledger.
///
/// The account performs no range checks of its own when adjusted: keeping
/// the balance non-negative is the ledger's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    opening_balance: Cents,
    balance: Cents,
}

impl Account {
    pub fn new(balance: Cents) -> Result<Self, LedgerError> {
        if balance < 0 {
            return Err(LedgerError::validation(format!(
                "Initial balance cannot be negative, got {}",
                format_cents(balance)
            )));
        }
        Ok(Self {
            opening_balance: balance,
            balance,
        })
    }

    /// Apply a signed change: negative deducts, positive restores.
    pub fn adjust(&mut self, delta: Cents) {
        self.balance += delta;
    }

    pub fn current_balance(&self) -> Cents {
        self.balance
    }

    pub fn opening_balance(&self) -> Cents {
        self.opening_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new(10000).unwrap();
        assert_eq!(account.current_balance(), 10000);
        assert_eq!(account.opening_balance(), 10000);
    }

    #[test]
    fn test_zero_balance_is_allowed() {
        assert_eq!(Account::new(0).unwrap().current_balance(), 0);
    }

    #[test]
    fn test_negative_balance_is_rejected() {
        assert!(matches!(
            Account::new(-1),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_adjust_does_not_range_check() {
        let mut account = Account::new(1000).unwrap();
        account.adjust(-1500);
        assert_eq!(account.current_balance(), -500);
        account.adjust(1500);
        assert_eq!(account.current_balance(), 1000);
        assert_eq!(account.opening_balance(), 1000);
    }
}
