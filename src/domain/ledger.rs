use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use super::{
    Account, Cents, DateRange, Expense, IntegrityReport, LedgerError, PeriodSummary, Report,
    ReportPeriod,
};

/// The bookkeeping engine: an ordered list of expenses plus the account
/// they are charged against.
///
/// After every operation the account balance equals the opening balance
/// minus the sum of all recorded expenses. Failed operations leave both the
/// list and the balance untouched.
#[derive(Debug, Clone)]
pub struct Ledger {
    expenses: Vec<Expense>,
    account: Account,
}

impl Ledger {
    /// Start an empty ledger with a fresh account holding `initial_balance`.
    pub fn new(initial_balance: Cents) -> Result<Self, LedgerError> {
        Self::with_account(&Account::new(initial_balance)?)
    }

    /// Start an empty ledger funded with whatever `account` currently holds.
    /// That amount becomes the ledger's opening balance.
    pub fn with_account(account: &Account) -> Result<Self, LedgerError> {
        Ok(Self {
            expenses: Vec::new(),
            account: Account::new(account.current_balance())?,
        })
    }

    /// Record a new expense and return its index.
    pub fn add_expense(
        &mut self,
        amount_cents: Cents,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<usize, LedgerError> {
        let expense = Expense::new(amount_cents, category, date)?.with_description(description);

        let balance = self.account.current_balance();
        if amount_cents > balance {
            return Err(LedgerError::InsufficientBalance {
                balance,
                required: amount_cents,
            });
        }

        self.expenses.push(expense);
        self.account.adjust(-amount_cents);
        Ok(self.expenses.len() - 1)
    }

    /// Replace the expense at `index`, returning the one it replaced.
    ///
    /// The new amount is checked against the balance as it would be with the
    /// old expense refunded.
    pub fn update_expense(
        &mut self,
        index: usize,
        amount_cents: Cents,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<Expense, LedgerError> {
        let old_amount = self.get(index)?.amount_cents();

        let available = self.account.current_balance() + old_amount;
        if amount_cents > available {
            return Err(LedgerError::InsufficientBalance {
                balance: available,
                required: amount_cents,
            });
        }

        let expense = Expense::new(amount_cents, category, date)?.with_description(description);

        let previous = std::mem::replace(&mut self.expenses[index], expense);
        self.account.adjust(previous.amount_cents());
        self.account.adjust(-amount_cents);
        Ok(previous)
    }

    /// Remove the expense at `index` and refund it. Later indices shift down.
    pub fn delete_expense(&mut self, index: usize) -> Result<Expense, LedgerError> {
        self.get(index)?;

        let removed = self.expenses.remove(index);
        self.account.adjust(removed.amount_cents());
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Result<&Expense, LedgerError> {
        self.expenses.get(index).ok_or(LedgerError::IndexOutOfRange {
            index,
            len: self.expenses.len(),
        })
    }

    /// Expenses dated within `[start, end]`, in insertion order.
    pub fn expenses_in_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<&Expense>, LedgerError> {
        let range = DateRange::new(start, end)?;
        Ok(self.matching(range).map(|(_, expense)| expense).collect())
    }

    /// Like [`Ledger::expenses_in_period`], paired with each expense's index.
    pub fn entries_in_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(usize, &Expense)>, LedgerError> {
        let range = DateRange::new(start, end)?;
        Ok(self.matching(range).collect())
    }

    pub fn total_in_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Cents, LedgerError> {
        let range = DateRange::new(start, end)?;
        Ok(self.total_within(range))
    }

    pub fn breakdown_by_category(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<String, Cents>, LedgerError> {
        let range = DateRange::new(start, end)?;
        Ok(self.breakdown_within(range))
    }

    pub fn current_balance(&self) -> Cents {
        self.account.current_balance()
    }

    /// Build a "weekly", "monthly" or "yearly" report for the period
    /// containing today's local date.
    pub fn generate_report(&self, period_kind: &str) -> Result<Report, LedgerError> {
        let period: ReportPeriod = period_kind.parse()?;
        Ok(self.report_at(period, Local::now().date_naive()))
    }

    /// Build a report for the period containing `today`.
    pub fn report_at(&self, period: ReportPeriod, today: NaiveDate) -> Report {
        let window = period.window(today);
        Report {
            period,
            window,
            summary: PeriodSummary {
                total_expenses: self.total_within(window),
                category_breakdown: self.breakdown_within(window),
            },
        }
    }

    pub fn all_expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Recompute the balance from scratch and compare it with the account.
    pub fn check_integrity(&self) -> IntegrityReport {
        let total_spent: Cents = self.expenses.iter().map(Expense::amount_cents).sum();
        let opening_balance = self.account.opening_balance();
        IntegrityReport {
            expense_count: self.expenses.len(),
            opening_balance,
            total_spent,
            expected_balance: opening_balance - total_spent,
            current_balance: self.account.current_balance(),
        }
    }

    fn matching(&self, range: DateRange) -> impl Iterator<Item = (usize, &Expense)> {
        self.expenses
            .iter()
            .enumerate()
            .filter(move |(_, expense)| range.contains(expense.date()))
    }

    fn total_within(&self, range: DateRange) -> Cents {
        self.matching(range)
            .map(|(_, expense)| expense.amount_cents())
            .sum()
    }

    fn breakdown_within(&self, range: DateRange) -> BTreeMap<String, Cents> {
        let mut totals: BTreeMap<String, Cents> = BTreeMap::new();
        for (_, expense) in self.matching(range) {
            *totals.entry(expense.category().to_string()).or_insert(0) += expense.amount_cents();
        }
        totals
    }
}
