use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{
    format_cents, Cents, DateRange, Expense, IntegrityReport, Ledger, LedgerError, Report,
    ReportPeriod,
};

use super::AppError;

/// One bookkeeping session: owns the ledger for as long as the client runs.
/// This is the primary interface for any client (shell, tests, embedding).
#[derive(Debug, Clone)]
pub struct Session {
    ledger: Ledger,
}

/// Optional date bounds for listing expenses. Missing ends are open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Log a rejected operation and lift the error into the application layer.
fn rejected(operation: &'static str, err: LedgerError) -> AppError {
    warn!(operation, error = %err, "operation rejected");
    AppError::Ledger(err)
}

impl Session {
    pub fn new(initial_balance: Cents) -> Result<Self, AppError> {
        let ledger = Ledger::new(initial_balance).map_err(|e| rejected("open", e))?;
        info!(balance = %format_cents(initial_balance), "session started");
        Ok(Self { ledger })
    }

    /// Start over with a new balance. All recorded expenses are discarded.
    /// On failure the current session is kept as is.
    pub fn set_initial_balance(&mut self, balance: Cents) -> Result<(), AppError> {
        let ledger = Ledger::new(balance).map_err(|e| rejected("set-balance", e))?;
        info!(
            balance = %format_cents(balance),
            discarded = self.ledger.len(),
            "balance reset"
        );
        self.ledger = ledger;
        Ok(())
    }

    // ========================
    // Mutations
    // ========================

    pub fn add_expense(
        &mut self,
        amount_cents: Cents,
        category: &str,
        date: NaiveDate,
        description: &str,
    ) -> Result<usize, AppError> {
        let index = self
            .ledger
            .add_expense(amount_cents, category, date, description)
            .map_err(|e| rejected("add", e))?;

        info!(
            index,
            amount = %format_cents(amount_cents),
            category,
            balance = %format_cents(self.ledger.current_balance()),
            "expense recorded"
        );
        Ok(index)
    }

    /// Replace an expense; returns the expense that was replaced.
    pub fn update_expense(
        &mut self,
        index: usize,
        amount_cents: Cents,
        category: &str,
        date: NaiveDate,
        description: &str,
    ) -> Result<Expense, AppError> {
        let previous = self
            .ledger
            .update_expense(index, amount_cents, category, date, description)
            .map_err(|e| rejected("update", e))?;

        info!(
            index,
            old_amount = %format_cents(previous.amount_cents()),
            amount = %format_cents(amount_cents),
            category,
            balance = %format_cents(self.ledger.current_balance()),
            "expense updated"
        );
        Ok(previous)
    }

    /// Remove an expense; returns what was removed.
    pub fn delete_expense(&mut self, index: usize) -> Result<Expense, AppError> {
        let removed = self
            .ledger
            .delete_expense(index)
            .map_err(|e| rejected("delete", e))?;

        info!(
            index,
            amount = %format_cents(removed.amount_cents()),
            balance = %format_cents(self.ledger.current_balance()),
            "expense deleted"
        );
        Ok(removed)
    }

    // ========================
    // Queries
    // ========================

    /// Indexed expenses within the filter's bounds, in insertion order.
    pub fn list_expenses(&self, filter: ExpenseFilter) -> Result<Vec<(usize, &Expense)>, AppError> {
        let everything = DateRange::unbounded();
        let from = filter.from.unwrap_or(everything.start());
        let to = filter.to.unwrap_or(everything.end());
        let entries = self
            .ledger
            .entries_in_period(from, to)
            .map_err(|e| rejected("list", e))?;
        debug!(?filter, found = entries.len(), "listed expenses");
        Ok(entries)
    }

    pub fn total(&self, from: NaiveDate, to: NaiveDate) -> Result<Cents, AppError> {
        let total = self
            .ledger
            .total_in_period(from, to)
            .map_err(|e| rejected("total", e))?;
        debug!(%from, %to, total = %format_cents(total), "computed total");
        Ok(total)
    }

    pub fn breakdown(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BTreeMap<String, Cents>, AppError> {
        let breakdown = self
            .ledger
            .breakdown_by_category(from, to)
            .map_err(|e| rejected("breakdown", e))?;
        debug!(%from, %to, categories = breakdown.len(), "computed breakdown");
        Ok(breakdown)
    }

    /// Report for the period containing today.
    pub fn report(&self, period_kind: &str) -> Result<Report, AppError> {
        let report = self
            .ledger
            .generate_report(period_kind)
            .map_err(|e| rejected("report", e))?;
        debug!(period = %report.period, window = %report.window, "generated report");
        Ok(report)
    }

    pub fn report_at(&self, period: ReportPeriod, today: NaiveDate) -> Report {
        self.ledger.report_at(period, today)
    }

    pub fn balance(&self) -> Cents {
        self.ledger.current_balance()
    }

    pub fn check_integrity(&self) -> IntegrityReport {
        let report = self.ledger.check_integrity();
        if !report.is_consistent() {
            warn!(
                expected = %format_cents(report.expected_balance),
                actual = %format_cents(report.current_balance),
                "balance does not match recorded expenses"
            );
        }
        report
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
