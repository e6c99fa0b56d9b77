// Shared by several test binaries; not every helper is used by each.
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use spendbook::application::{parse_date, Session};

/// Parse a `YYYY-MM-DD` string, panicking on malformed fixtures.
pub fn date(date_str: &str) -> NaiveDate {
    parse_date(date_str).unwrap()
}

/// Test fixture: a session opened with 100.00 and two Food expenses,
/// 30.00 on 2024-01-05 ("lunch") and 50.00 on 2024-01-06 ("dinner").
pub fn food_session() -> Result<Session> {
    let mut session = Session::new(10000)?;
    session.add_expense(3000, "Food", date("2024-01-05"), "lunch")?;
    session.add_expense(5000, "Food", date("2024-01-06"), "dinner")?;
    Ok(session)
}

/// Balance expected from the opening balance and what is currently recorded.
pub fn expected_balance(session: &Session) -> i64 {
    let ledger = session.ledger();
    let spent: i64 = ledger
        .all_expenses()
        .iter()
        .map(|expense| expense.amount_cents())
        .sum();
    ledger.account().opening_balance() - spent
}
