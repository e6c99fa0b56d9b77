use std::collections::BTreeMap;

use serde::Serialize;

use super::{Cents, DateRange, ReportPeriod};

/// Totals for one date window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub total_expenses: Cents,
    /// Summed amount per category; categories without spending are absent.
    pub category_breakdown: BTreeMap<String, Cents>,
}

/// A weekly, monthly or yearly summary anchored on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub period: ReportPeriod,
    pub window: DateRange,
    pub summary: PeriodSummary,
}

impl Report {
    pub fn label(&self) -> &'static str {
        self.period.label()
    }

    /// Single-entry mapping from the report label to its summary,
    /// e.g. `{"Monthly Report": {"total_expenses": .., "category_breakdown": ..}}`.
    pub fn into_map(self) -> BTreeMap<String, PeriodSummary> {
        BTreeMap::from([(self.label().to_string(), self.summary)])
    }
}

/// Result of recomputing the balance from the expense list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub expense_count: usize,
    pub opening_balance: Cents,
    pub total_spent: Cents,
    pub expected_balance: Cents,
    pub current_balance: Cents,
}

impl IntegrityReport {
    pub fn is_consistent(&self) -> bool {
        self.expected_balance == self.current_balance
    }
}
