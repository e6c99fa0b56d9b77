use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{format_cents, Cents, LedgerError};

/// A single dated expense. Expenses are immutable: editing one means
/// building a replacement through the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    /// Amount in cents (always positive)
    amount_cents: Cents,
    /// Free-form label used for breakdowns; compared case-sensitively
    category: String,
    date: NaiveDate,
    description: String,
}

impl Expense {
    /// Validate and build an expense with an empty description.
    pub fn new(
        amount_cents: Cents,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if amount_cents <= 0 {
            return Err(LedgerError::validation(format!(
                "Amount must be positive, got {}",
                format_cents(amount_cents)
            )));
        }

        let category = category.into();
        if category.trim().is_empty() {
            return Err(LedgerError::validation("Category must not be empty"));
        }

        Ok(Self {
            amount_cents,
            category,
            date,
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn amount_cents(&self) -> Cents {
        self.amount_cents
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            format_cents(self.amount_cents),
            self.category
        )?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}
