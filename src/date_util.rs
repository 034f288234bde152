use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Leniently parse a timestamp string into a UTC instant.
///
/// Accepts RFC 3339 (`2025-01-05T09:30:00Z`, offset forms), bare
/// datetimes (`2025-01-05T09:30:00`), and date-only strings
/// (`2025-01-05`, read as midnight UTC). Returns `None` for anything
/// else — callers treat unparseable timestamps as absent.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Parse a timestamp string down to its calendar day.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    parse_instant(s).map(|dt| dt.date_naive())
}

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Fractional days from `from` to `to`.
pub fn span_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 86_400.0
}

/// Day-granularity "past deadline" test: a deadline expiring today is
/// not past until the day boundary rolls over.
pub fn is_past_day(deadline: NaiveDate, now: NaiveDate) -> bool {
    now > deadline
}

/// True if `d` falls in the given calendar month.
pub fn in_month(d: NaiveDate, year: i32, month: u32) -> bool {
    d.year() == year && d.month() == month
}

/// The calendar month before the given one.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_rfc3339() {
        let dt = parse_instant("2025-01-05T09:30:00Z").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());

        let dt = parse_instant("2025-01-05T09:30:00+02:00").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_instant_naive_datetime() {
        let dt = parse_instant("2025-01-05T09:30:00").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());

        let dt = parse_instant("2025-01-05T09:30:00.123").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_instant_date_only() {
        let dt = parse_instant("2025-01-05").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_instant_garbage() {
        assert!(parse_instant("not-a-date").is_none());
        assert!(parse_instant("").is_none());
        assert!(parse_instant("2025-13-40").is_none());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2025-06-15T23:59:00Z"),
            Some(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
        );
        assert_eq!(parse_day("garbage"), None);
    }

    #[test]
    fn test_days_between() {
        let a = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(days_between(a, b), 5);
        assert_eq!(days_between(b, a), -5);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_span_days() {
        let from = parse_instant("2025-01-01T00:00:00Z").unwrap();
        let to = parse_instant("2025-01-04T00:00:00Z").unwrap();
        assert_eq!(span_days(from, to), 3.0);

        let to = parse_instant("2025-01-01T12:00:00Z").unwrap();
        assert_eq!(span_days(from, to), 0.5);
    }

    #[test]
    fn test_is_past_day_boundary() {
        let deadline = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        // Due today: not yet past
        assert!(!is_past_day(deadline, deadline));
        assert!(is_past_day(
            deadline,
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
        ));
        assert!(!is_past_day(
            deadline,
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        ));
    }

    #[test]
    fn test_in_month() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert!(in_month(d, 2025, 2));
        assert!(!in_month(d, 2025, 3));
        assert!(!in_month(d, 2024, 2));
    }

    #[test]
    fn test_previous_month() {
        assert_eq!(previous_month(2025, 6), (2025, 5));
        assert_eq!(previous_month(2025, 1), (2024, 12)); // January rollover
    }
}
