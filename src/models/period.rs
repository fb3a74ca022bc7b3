//! Budget periods and billing windows
//!
//! A budget repeats every period from a fixed start date. The window that
//! contains a reference date is always `start + k` to `start + (k + 1)`
//! periods, computed directly from the start date so month-end clamping never
//! accumulates drift (Jan 31 -> Feb 29 -> Mar 31, not Mar 29).

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat interval of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Day,
    Week,
    Month,
    Year,
    /// Never rolls over; only the default budget uses it
    Infinite,
}

impl BudgetPeriod {
    /// The date `n` whole periods after `start`
    ///
    /// Saturates at `NaiveDate::MAX`.
    pub fn add_to(&self, start: NaiveDate, n: u64) -> NaiveDate {
        let shifted = match self {
            Self::Day => start.checked_add_days(Days::new(n)),
            Self::Week => n
                .checked_mul(7)
                .and_then(|days| start.checked_add_days(Days::new(days))),
            Self::Month => add_months(start, n),
            Self::Year => n.checked_mul(12).and_then(|months| add_months(start, months)),
            Self::Infinite => (n == 0).then_some(start),
        };
        shifted.unwrap_or(NaiveDate::MAX)
    }

    /// Number of whole periods elapsed from `start` to `reference`
    ///
    /// Zero when `reference` is before `start`.
    pub fn periods_between(&self, start: NaiveDate, reference: NaiveDate) -> u64 {
        if reference <= start {
            return 0;
        }
        let elapsed_days = (reference - start).num_days().unsigned_abs();
        match self {
            Self::Day => elapsed_days,
            Self::Week => elapsed_days / 7,
            Self::Month => {
                let months = month_index(reference) - month_index(start);
                self.step_back_if_past(start, reference, months)
            }
            Self::Year => {
                let years = i64::from(reference.year()) - i64::from(start.year());
                self.step_back_if_past(start, reference, years)
            }
            Self::Infinite => 0,
        }
    }

    /// The window containing `reference` for a budget starting on `start`
    ///
    /// A reference before the start date yields the first window.
    pub fn window_for(&self, start: NaiveDate, reference: NaiveDate) -> BudgetWindow {
        let k = self.periods_between(start, reference);
        BudgetWindow {
            start: self.add_to(start, k),
            end: self.add_to(start, k.saturating_add(1)),
        }
    }

    /// Parse user input such as "month" or "weekly"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" | "annual" => Ok(Self::Year),
            _ => Err(PeriodParseError::InvalidFormat(s.to_string())),
        }
    }

    // Calendar candidates can overshoot `reference` when the day of month
    // has not been reached yet.
    fn step_back_if_past(&self, start: NaiveDate, reference: NaiveDate, candidate: i64) -> u64 {
        let candidate = candidate.max(0).unsigned_abs();
        if candidate > 0 && self.add_to(start, candidate) > reference {
            candidate - 1
        } else {
            candidate
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
            Self::Infinite => write!(f, "forever"),
        }
    }
}

fn add_months(start: NaiveDate, months: u64) -> Option<NaiveDate> {
    let months = u32::try_from(months).ok()?;
    start.checked_add_months(Months::new(months))
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Half-open date interval `[start, end)` of one billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BudgetWindow {
    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Last day inside the window
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    /// Whether the window never closes
    pub fn is_open_ended(&self) -> bool {
        self.end == NaiveDate::MAX
    }
}

impl fmt::Display for BudgetWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "{} onwards", self.start.format("%Y-%m-%d"))
        } else {
            write!(
                f,
                "{} to {}",
                self.start.format("%Y-%m-%d"),
                self.last_day().format("%Y-%m-%d")
            )
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(
                f,
                "Invalid period '{}' (expected day, week, month or year)",
                s
            ),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_window_mid_period() {
        let window = BudgetPeriod::Month.window_for(date(2024, 1, 15), date(2024, 3, 10));
        assert_eq!(window.start, date(2024, 2, 15));
        assert_eq!(window.end, date(2024, 3, 15));
        assert!(window.contains(date(2024, 3, 10)));
    }

    #[test]
    fn test_monthly_window_on_boundary() {
        let window = BudgetPeriod::Month.window_for(date(2024, 1, 15), date(2024, 3, 15));
        assert_eq!(window.start, date(2024, 3, 15));
        assert_eq!(window.end, date(2024, 4, 15));
    }

    #[test]
    fn test_monthly_end_of_month_does_not_drift() {
        let start = date(2024, 1, 31);
        let feb = BudgetPeriod::Month.window_for(start, date(2024, 3, 1));
        assert_eq!(feb.start, date(2024, 2, 29));
        assert_eq!(feb.end, date(2024, 3, 31));

        let late_april = BudgetPeriod::Month.window_for(start, date(2024, 4, 29));
        assert_eq!(late_april.start, date(2024, 3, 31));
        assert_eq!(late_april.end, date(2024, 4, 30));

        let may = BudgetPeriod::Month.window_for(start, date(2024, 4, 30));
        assert_eq!(may.start, date(2024, 4, 30));
        assert_eq!(may.end, date(2024, 5, 31));
    }

    #[test]
    fn test_reference_before_start_gives_first_window() {
        let window = BudgetPeriod::Week.window_for(date(2024, 6, 1), date(2024, 5, 1));
        assert_eq!(window.start, date(2024, 6, 1));
        assert_eq!(window.end, date(2024, 6, 8));
    }

    #[test]
    fn test_daily_and_weekly_windows() {
        let start = date(2024, 1, 1);
        let day = BudgetPeriod::Day.window_for(start, date(2024, 1, 10));
        assert_eq!((day.start, day.end), (date(2024, 1, 10), date(2024, 1, 11)));

        let week = BudgetPeriod::Week.window_for(start, date(2024, 1, 10));
        assert_eq!((week.start, week.end), (date(2024, 1, 8), date(2024, 1, 15)));
    }

    #[test]
    fn test_yearly_window_leap_day() {
        let start = date(2020, 2, 29);
        let window = BudgetPeriod::Year.window_for(start, date(2023, 3, 1));
        assert_eq!(window.start, date(2023, 2, 28));
        assert_eq!(window.end, date(2024, 2, 29));

        let before_anniversary = BudgetPeriod::Year.window_for(start, date(2023, 2, 27));
        assert_eq!(before_anniversary.start, date(2022, 2, 28));
    }

    #[test]
    fn test_infinite_window() {
        let window = BudgetPeriod::Infinite.window_for(date(2000, 1, 1), date(2099, 1, 1));
        assert_eq!(window.start, date(2000, 1, 1));
        assert!(window.is_open_ended());
        assert!(window.contains(date(2099, 1, 1)));
    }

    #[test]
    fn test_window_invariant_holds_across_a_year() {
        let start = date(2023, 8, 31);
        for period in [BudgetPeriod::Day, BudgetPeriod::Week, BudgetPeriod::Month, BudgetPeriod::Year] {
            let mut reference = start;
            for _ in 0..400 {
                let window = period.window_for(start, reference);
                assert!(window.start <= reference && reference < window.end);
                let k = period.periods_between(start, reference);
                assert_eq!(period.add_to(start, k), window.start);
                reference = reference.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(BudgetPeriod::parse("Monthly").unwrap(), BudgetPeriod::Month);
        assert_eq!(BudgetPeriod::parse("week").unwrap(), BudgetPeriod::Week);
        assert!(BudgetPeriod::parse("fortnight").is_err());
        assert_eq!(BudgetPeriod::Year.to_string(), "year");
    }

    #[test]
    fn test_window_display() {
        let window = BudgetPeriod::Month.window_for(date(2024, 1, 15), date(2024, 1, 20));
        assert_eq!(window.to_string(), "2024-01-15 to 2024-02-14");
    }
}
