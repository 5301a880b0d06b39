//! Date helper functions

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// The textual format a post date is expected in
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time layouts that YAML timestamps are written in
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a post date
///
/// Accepts `YYYY-MM-DD` plus already-structured timestamps
/// (`YYYY-MM-DD HH:MM:SS`, ISO 8601, RFC 3339). A time without seconds
/// is not a timestamp and is rejected.
pub fn parse_post_date(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, POST_DATE_FORMAT) {
        return local_from_naive(d.and_hms_opt(0, 0, 0)?);
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(dt);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Resolve the publication date of a post
///
/// Missing or unparseable values fall back to `now`; this never fails.
pub fn resolve_date(raw: Option<&str>, now: DateTime<Local>) -> DateTime<Local> {
    match raw {
        Some(s) => parse_post_date(s).unwrap_or_else(|| {
            tracing::debug!("Unrecognized date {:?}, using load time", s);
            now
        }),
        None => now,
    }
}

/// Format a date with a chrono format string
pub fn format_date(date: &DateTime<Local>, format: &str) -> String {
    date.format(format).to_string()
}

fn local_from_naive(dt: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&dt).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_only() {
        let dt = parse_post_date("2024-01-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_timestamp() {
        let dt = parse_post_date("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        assert!(parse_post_date("2024-01-15T10:30:00").is_some());
        assert!(parse_post_date("2024-01-15T10:30:00+09:00").is_some());
    }

    #[test]
    fn test_time_without_seconds_falls_back() {
        assert!(parse_post_date("2024-01-15 10:30").is_none());
        let now = Local::now();
        assert_eq!(resolve_date(Some("2024-01-15 10:30"), now), now);
    }

    #[test]
    fn test_resolve_invalid_falls_back() {
        let now = Local::now();
        assert_eq!(resolve_date(Some("not-a-date"), now), now);
        assert_eq!(resolve_date(Some("2024-13-45"), now), now);
        assert_eq!(resolve_date(None, now), now);
    }

    #[test]
    fn test_format_date() {
        let date = Local.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "%Y年%m月%d日"), "2024年01月05日");
        assert_eq!(format_date(&date, "%B %d, %Y"), "January 05, 2024");
    }
}
