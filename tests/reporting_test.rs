mod common;

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Local;
use common::{date, food_session};
use spendbook::application::Session;
use spendbook::domain::ReportPeriod;

#[test]
fn test_breakdown_for_january() -> Result<()> {
    let session = food_session()?;

    let breakdown = session.breakdown(date("2024-01-01"), date("2024-01-31"))?;
    assert_eq!(breakdown, BTreeMap::from([("Food".to_string(), 8000)]));
    assert_eq!(session.total(date("2024-01-01"), date("2024-01-31"))?, 8000);
    Ok(())
}

#[test]
fn test_breakdown_omits_categories_outside_period() -> Result<()> {
    let mut session = food_session()?;
    session.add_expense(1500, "Transport", date("2024-02-02"), "bus pass")?;

    let january = session.breakdown(date("2024-01-01"), date("2024-01-31"))?;
    assert!(!january.contains_key("Transport"));

    let both = session.breakdown(date("2024-01-01"), date("2024-02-29"))?;
    assert_eq!(both.len(), 2);
    assert_eq!(both["Transport"], 1500);
    Ok(())
}

#[test]
fn test_categories_are_case_sensitive() -> Result<()> {
    let mut session = food_session()?;
    session.add_expense(700, "food", date("2024-01-07"), "")?;

    let breakdown = session.breakdown(date("2024-01-01"), date("2024-01-31"))?;
    assert_eq!(breakdown["Food"], 8000);
    assert_eq!(breakdown["food"], 700);
    Ok(())
}

#[test]
fn test_reports_anchored_on_a_fixed_day() -> Result<()> {
    let mut session = Session::new(1_000_000)?;
    session.add_expense(1000, "Food", date("2024-05-13"), "")?; // Monday
    session.add_expense(2000, "Food", date("2024-05-19"), "")?; // Sunday
    session.add_expense(4000, "Rent", date("2024-05-01"), "")?;
    session.add_expense(8000, "Travel", date("2024-11-20"), "")?;
    session.add_expense(16000, "Travel", date("2023-12-31"), "")?;
    let today = date("2024-05-15");

    let weekly = session.report_at(ReportPeriod::Weekly, today);
    assert_eq!(weekly.window.start(), date("2024-05-13"));
    assert_eq!(weekly.window.end(), date("2024-05-19"));
    assert_eq!(weekly.summary.total_expenses, 3000);
    assert_eq!(weekly.summary.category_breakdown.len(), 1);

    let monthly = session.report_at(ReportPeriod::Monthly, today);
    assert_eq!(monthly.window.end(), date("2024-05-31"));
    assert_eq!(monthly.summary.total_expenses, 7000);
    assert_eq!(monthly.summary.category_breakdown["Rent"], 4000);

    let yearly = session.report_at(ReportPeriod::Yearly, today);
    assert_eq!(yearly.summary.total_expenses, 15000);
    assert_eq!(yearly.summary.category_breakdown["Travel"], 8000);

    let map = yearly.into_map();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Yearly Report"]);
    Ok(())
}

#[test]
fn test_generate_report_for_today() -> Result<()> {
    let mut session = Session::new(10000)?;
    let today = Local::now().date_naive();
    session.add_expense(1234, "Food", today, "today")?;

    for kind in ["weekly", "monthly", "yearly"] {
        let report = session.report(kind)?;
        assert!(report.window.contains(today));
        assert_eq!(report.summary.total_expenses, 1234);
        assert_eq!(report.summary.category_breakdown["Food"], 1234);
    }
    Ok(())
}

#[test]
fn test_empty_report_has_no_categories() -> Result<()> {
    let session = Session::new(0)?;

    let report = session.report("monthly")?;
    assert_eq!(report.label(), "Monthly Report");
    assert_eq!(report.summary.total_expenses, 0);
    assert!(report.summary.category_breakdown.is_empty());
    Ok(())
}
