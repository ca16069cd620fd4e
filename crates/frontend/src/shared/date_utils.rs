/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{NaiveDate, SecondsFormat, Utc};

/// Format ISO datetime string to YYYY-MM-DD HH:MM:SS format
/// Example: "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok() {
            let time = time_part.get(..8).unwrap_or(time_part);
            return format!("{} {}", date_part, time);
        }
    }
    datetime_str.to_string()
}

/// Format ISO date string to YYYY-MM-DD format
/// Example: "2024-03-15T14:02:26.123Z" -> "2024-03-15"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok() {
        return date_part.to_string();
    }
    date_str.to_string()
}

/// Current UTC day as `yyyy-mm-dd`, the value of a date input
pub fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Midnight UTC of a `yyyy-mm-dd` day: "2024-03-15" -> "2024-03-15T00:00:00.000Z"
pub fn day_start_timestamp(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let start = day.and_hms_opt(0, 0, 0)?.and_utc();
    Some(start.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "2024-03-15 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59Z"),
            "2024-12-31 23:59:59"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59.123456+00:00"),
            "2024-12-31 23:59:59"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "2024-03-15");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "2024-03-15");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_day_start_timestamp() {
        assert_eq!(
            day_start_timestamp("2024-03-15").as_deref(),
            Some("2024-03-15T00:00:00.000Z")
        );
        assert_eq!(day_start_timestamp(""), None);
        assert_eq!(day_start_timestamp("2024-02-30"), None);
    }

    #[test]
    fn test_today_is_a_valid_day() {
        assert!(day_start_timestamp(&today_iso()).is_some());
    }
}
