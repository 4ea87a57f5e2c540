//! Birth date helpers: parsing, age, display format, and the date picker bound.
//!
//! The `*_on` variants take "today" explicitly; the others use the local date.

use chrono::{Datelike, Local, NaiveDate};

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a birth date as `YYYY-MM-DD`, an ISO datetime, or `DD/MM/YYYY`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

/// Whether `value` is empty or a real calendar date.
pub fn is_valid_date(value: &str) -> bool {
    value.trim().is_empty() || parse_date(value).is_some()
}

/// Whole years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn age_from(birth_date: &str, today: NaiveDate) -> Option<i32> {
    parse_date(birth_date).map(|birth| age_on(birth, today))
}

/// Age in years today, or `None` when the date is missing or unparseable.
pub fn calculate_age(birth_date: &str) -> Option<i32> {
    age_from(birth_date, today())
}

/// Render a date the French way (`15/06/2000`).
///
/// Empty input gives an empty string; anything unparseable is returned as is.
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match parse_date(value) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

/// Upper bound for the birth date picker (`YYYY-MM-DD`).
pub fn max_date_on(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

pub fn max_date() -> String {
    max_date_on(today())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_on(birth, date(2024, 6, 14)), 23);
        assert_eq!(age_on(birth, date(2024, 6, 15)), 24);
        assert_eq!(age_on(birth, date(2024, 12, 31)), 24);
        assert_eq!(age_on(birth, date(2025, 1, 1)), 24);
    }

    #[test]
    fn test_age_from_string() {
        assert_eq!(age_from("2000-06-15", date(2024, 6, 14)), Some(23));
        assert_eq!(age_from("15/06/2000", date(2024, 6, 15)), Some(24));
        assert_eq!(age_from("", date(2024, 6, 15)), None);
        assert_eq!(age_from("not-a-date", date(2024, 6, 15)), None);
    }

    #[test]
    fn test_max_date() {
        assert_eq!(max_date_on(date(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2001-06-10"), Some(date(2001, 6, 10)));
        assert_eq!(parse_date("2001-06-10T00:00:00Z"), Some(date(2001, 6, 10)));
        assert_eq!(parse_date("10/06/2001"), Some(date(2001, 6, 10)));
        assert_eq!(parse_date("2001-02-30"), None);
        assert_eq!(parse_date("not-a-date"), None);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date(""));
        assert!(is_valid_date("1999-12-31"));
        assert!(!is_valid_date("not-a-date"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2000-06-15"), "15/06/2000");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("bientôt"), "bientôt");
    }
}
