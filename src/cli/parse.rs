//! Conversions from command-line text to domain values

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{BudgetPeriod, Category, Money};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

pub fn parse_money(s: &str) -> PennywiseResult<Money> {
    Money::parse(s).map_err(|e| PennywiseError::Validation(e.to_string()))
}

pub fn parse_category(s: &str) -> PennywiseResult<Category> {
    s.parse::<Category>()
        .map_err(|e| PennywiseError::Validation(e.to_string()))
}

pub fn parse_period(s: &str) -> PennywiseResult<BudgetPeriod> {
    BudgetPeriod::parse(s).map_err(|e| PennywiseError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> PennywiseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        PennywiseError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
    })
}

/// Parse `YYYY-MM-DD HH:MM`, or a bare date meaning its first minute
pub fn parse_timestamp(s: &str) -> PennywiseResult<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| {
            PennywiseError::Validation(format!(
                "Invalid time '{}' (expected YYYY-MM-DD or \"YYYY-MM-DD HH:MM\")",
                s
            ))
        })
}

pub fn parse_optional<T>(
    value: Option<String>,
    parse: impl Fn(&str) -> PennywiseResult<T>,
) -> PennywiseResult<Option<T>> {
    value.as_deref().map(parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-05-06 07:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-06T07:30").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-05-06").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("yesterday").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_money("3.50").unwrap(), Money::from_cents(350));
        assert!(parse_money("-1").unwrap_err().is_validation());
        assert_eq!(parse_category("TRANSPORT").unwrap(), Category::Transport);
        assert!(parse_category("rent").is_err());
        assert_eq!(parse_period("weekly").unwrap(), BudgetPeriod::Week);
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(None, parse_money).unwrap(), None);
        assert_eq!(
            parse_optional(Some("2".into()), parse_money).unwrap(),
            Some(Money::from_cents(200))
        );
        assert!(parse_optional(Some("x".into()), parse_money).is_err());
    }
}
