//! Card date detection and birth/expiry resolution.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patterns::{CARD_DATE, DATE_PARTS};
use super::FieldRule;

/// How collected dates are ordered before picking birth and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// Plain string ordering of the `DD.MM.YYYY` text.
    ///
    /// Day-first strings do not sort chronologically: `01.12.2030` sorts
    /// before `15.03.1990`. Kept as the default for output compatibility
    /// with existing deployments.
    #[default]
    Lexicographic,
    /// Calendar ordering. Dates that do not parse sort last.
    Chronological,
}

/// Matches fragments shaped exactly like `DD.MM.YYYY`.
pub struct DateRule;

impl DateRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for DateRule {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if CARD_DATE.is_match(text) {
            Some(text.to_string())
        } else {
            None
        }
    }
}

/// Birth and expiry dates picked from the collected candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDates {
    pub date_of_birth: String,
    pub expiry_date: String,
}

/// Sort the candidates and take the first two as birth and expiry.
///
/// With fewer than two candidates both fields stay empty.
pub fn resolve_dates(mut dates: Vec<String>, order: DateOrder) -> ResolvedDates {
    if dates.len() < 2 {
        return ResolvedDates::default();
    }

    match order {
        DateOrder::Lexicographic => dates.sort(),
        DateOrder::Chronological => dates.sort_by(compare_chronologically),
    }

    ResolvedDates {
        date_of_birth: format_card_date(&dates[0]),
        expiry_date: format_card_date(&dates[1]),
    }
}

/// Re-pad day and month to two digits: `1.2.1990` -> `01.02.1990`.
///
/// Text that is not a dotted date is returned unchanged.
pub fn format_card_date(date: &str) -> String {
    match DATE_PARTS.captures(date) {
        Some(caps) => format!("{:0>2}.{:0>2}.{}", &caps[1], &caps[2], &caps[3]),
        None => date.to_string(),
    }
}

fn parse_card_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d.%m.%Y").ok()
}

fn compare_chronologically(a: &String, b: &String) -> Ordering {
    match (parse_card_date(a), parse_card_date(b)) {
        (Some(da), Some(db)) => da.cmp(&db).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned(dates: &[&str]) -> Vec<String> {
        dates.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_date_rule_shape() {
        let rule = DateRule::new();

        assert_eq!(rule.extract("15.03.1990"), Some("15.03.1990".to_string()));
        assert!(!rule.matches("5.03.1990"));
        assert!(!rule.matches("15/03/1990"));
        assert!(!rule.matches("15.03.90"));
        assert!(!rule.matches("born 15.03.1990"));
    }

    #[test]
    fn test_date_rule_rejects_non_ascii_digits() {
        let rule = DateRule::new();

        // Arabic-Indic digits
        assert!(!rule.matches("١٥.٠٣.١٩٩٠"));
    }

    #[test]
    fn test_lexicographic_order_is_day_first() {
        let resolved = resolve_dates(owned(&["15.03.1990", "01.12.2030"]), DateOrder::Lexicographic);

        assert_eq!(resolved.date_of_birth, "01.12.2030");
        assert_eq!(resolved.expiry_date, "15.03.1990");
    }

    #[test]
    fn test_chronological_order() {
        let resolved = resolve_dates(owned(&["15.03.1990", "01.12.2030"]), DateOrder::Chronological);

        assert_eq!(resolved.date_of_birth, "15.03.1990");
        assert_eq!(resolved.expiry_date, "01.12.2030");
    }

    #[test]
    fn test_chronological_puts_invalid_dates_last() {
        let resolved = resolve_dates(
            owned(&["99.99.2000", "01.01.2030", "01.01.1980"]),
            DateOrder::Chronological,
        );

        assert_eq!(resolved.date_of_birth, "01.01.1980");
        assert_eq!(resolved.expiry_date, "01.01.2030");
    }

    #[test]
    fn test_single_date_is_not_enough() {
        let resolved = resolve_dates(owned(&["01.01.2000"]), DateOrder::Lexicographic);
        assert_eq!(resolved, ResolvedDates::default());
    }

    #[test]
    fn test_third_date_is_ignored() {
        let resolved = resolve_dates(
            owned(&["03.03.2003", "02.02.2002", "01.01.2001"]),
            DateOrder::Lexicographic,
        );

        assert_eq!(resolved.date_of_birth, "01.01.2001");
        assert_eq!(resolved.expiry_date, "02.02.2002");
    }

    #[test]
    fn test_format_card_date_pads() {
        assert_eq!(format_card_date("1.2.1990"), "01.02.1990");
        assert_eq!(format_card_date("15.03.1990"), "15.03.1990");
        assert_eq!(format_card_date("not a date"), "not a date");
    }
}
