//! Display formatting for times, dates and counts

use chrono::{DateTime, NaiveDate, NaiveTime};
use tracing::debug;

/// Render a time of day as a 12-hour clock, e.g. `"14:05"` -> `"2:05 PM"`.
///
/// Accepts `HH:MM` and `HH:MM:SS`. Input that does not parse is returned as is.
#[must_use]
pub fn format_time(time: &str) -> String {
    let trimmed = time.trim();
    match NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
    {
        Ok(parsed) => parsed.format("%-I:%M %p").to_string(),
        Err(e) => {
            debug!("Unparseable time '{}': {}", time, e);
            time.to_string()
        }
    }
}

/// Render a date as `"Friday, March 15, 2024"`.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Input that does not parse is
/// returned as is.
#[must_use]
pub fn format_date(date: &str) -> String {
    match parse_date(date.trim()) {
        Some(parsed) => parsed.format("%A, %B %-d, %Y").to_string(),
        None => {
            debug!("Unparseable date '{}'", date);
            date.to_string()
        }
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
}

/// `"1 activity"`, `"3 activities"`
#[must_use]
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// `"1 day"`, `"3 days"`
#[must_use]
pub fn format_duration(days: u32) -> String {
    pluralize(days as usize, "day", "days")
}

/// Upper-case the first character, leave the rest untouched
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("09:00", "9:00 AM")]
    #[case("14:05", "2:05 PM")]
    #[case("00:30", "12:30 AM")]
    #[case("12:00", "12:00 PM")]
    #[case("23:59:59", "11:59 PM")]
    fn test_format_time(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_time(input), expected);
    }

    #[test]
    fn test_format_time_keeps_malformed_input() {
        assert_eq!(format_time("noon"), "noon");
        assert_eq!(format_time(""), "");
    }

    #[rstest]
    #[case("2024-03-15", "Friday, March 15, 2024")]
    #[case("2025-01-01", "Wednesday, January 1, 2025")]
    #[case("2024-03-15T08:00:00+08:00", "Friday, March 15, 2024")]
    fn test_format_date(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_date(input), expected);
    }

    #[test]
    fn test_format_date_keeps_malformed_input() {
        assert_eq!(format_date("sometime in May"), "sometime in May");
    }

    #[rstest]
    #[case(1, "1 activity")]
    #[case(2, "2 activities")]
    #[case(0, "0 activities")]
    fn test_pluralize(#[case] count: usize, #[case] expected: &str) {
        assert_eq!(pluralize(count, "activity", "activities"), expected);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1), "1 day");
        assert_eq!(format_duration(3), "3 days");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("booking"), "Booking");
        assert_eq!(capitalize_first("Agoda"), "Agoda");
        assert_eq!(capitalize_first(""), "");
    }
}
