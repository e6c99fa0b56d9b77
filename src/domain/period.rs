use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::LedgerError;

/// Canonical text interchange format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, rejecting impossible calendar dates.
pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        LedgerError::validation(format!(
            "Invalid date '{}': expected a calendar date in YYYY-MM-DD format",
            trimmed
        ))
    })
}

/// Inclusive `[start, end]` date window. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Fails when `start` comes after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if start > end {
            return Err(LedgerError::validation(format!(
                "Start date {} is after end date {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// Every representable date.
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
            ReportPeriod::Yearly => "yearly",
        }
    }

    /// Heading used as the single key of a rendered report.
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "Weekly Report",
            ReportPeriod::Monthly => "Monthly Report",
            ReportPeriod::Yearly => "Yearly Report",
        }
    }

    /// The calendar window containing `today`, both ends inclusive.
    pub fn window(&self, today: NaiveDate) -> DateRange {
        match self {
            ReportPeriod::Weekly => {
                // ISO weeks start on Monday
                let offset = u64::from(today.weekday().num_days_from_monday());
                let start = today
                    .checked_sub_days(Days::new(offset))
                    .unwrap_or(NaiveDate::MIN);
                let end = start
                    .checked_add_days(Days::new(6))
                    .unwrap_or(NaiveDate::MAX);
                DateRange { start, end }
            }
            ReportPeriod::Monthly => {
                let start = today - Days::new(u64::from(today.day0()));
                DateRange {
                    start,
                    end: last_day_before(start, Months::new(1)),
                }
            }
            ReportPeriod::Yearly => {
                let start = today - Days::new(u64::from(today.ordinal0()));
                DateRange {
                    start,
                    end: last_day_before(start, Months::new(12)),
                }
            }
        }
    }
}

/// The day before `start + months`, clamped to the last representable date.
fn last_day_before(start: NaiveDate, months: Months) -> NaiveDate {
    start
        .checked_add_months(months)
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl FromStr for ReportPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            "yearly" => Ok(ReportPeriod::Yearly),
            _ => Err(LedgerError::validation(format!(
                "Invalid period '{}': must be 'weekly', 'monthly', or 'yearly'",
                s
            ))),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
