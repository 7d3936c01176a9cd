//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Label for posts whose date could not be parsed
pub const UNDATED: &str = "Undated";

/// Parse a front-matter date string in various formats
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Format date in full format (like "January 5, 2024")
pub fn full_date(date: Option<&NaiveDateTime>) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => UNDATED.to_string(),
    }
}

/// Group key for monthly archives (like "January 2024")
pub fn month_key(date: Option<&NaiveDateTime>) -> String {
    match date {
        Some(date) => date.format("%B %Y").to_string(),
        None => UNDATED.to_string(),
    }
}

/// Group key for yearly archives (like "2024")
pub fn year_key(date: Option<&NaiveDateTime>) -> String {
    match date {
        Some(date) => date.format("%Y").to_string(),
        None => UNDATED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(expected));
        assert_eq!(parse_date(" 2024/01/15 "), Some(expected));
        assert_eq!(
            parse_date("2024-01-15 10:30:00").map(|d| d.format("%H:%M").to_string()),
            Some("10:30".to_string())
        );
        assert_eq!(
            parse_date("2024-01-15T10:30:00+02:00").map(|d| d.format("%H").to_string()),
            Some("08".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_date("someday"), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_keys() {
        let date = parse_date("2024-03-05").unwrap();
        assert_eq!(full_date(Some(&date)), "March 5, 2024");
        assert_eq!(month_key(Some(&date)), "March 2024");
        assert_eq!(year_key(Some(&date)), "2024");
        assert_eq!(month_key(None), UNDATED);
    }
}
