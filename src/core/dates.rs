//! Lenient date parsing for provider timestamps.
//!
//! Providers send ISO-8601 in a few shapes (with or without offset, with or
//! without time). A value counts as a date when any accepted shape parses.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Minute-precision layouts with an offset, which RFC 3339 lacks.
const OFFSET_MINUTE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M%:z"];

/// Local date-time layouts, tried in order. Offset-less values are UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a provider date or timestamp, normalized to UTC.
///
/// Returns `None` when the text is not a recognizable date.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // RFC 3339 requires a colon in the offset; accept "+0200" too.
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_MINUTE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Some(minutes) = text.strip_suffix('Z') {
        if let Ok(naive) = NaiveDateTime::parse_from_str(minutes, "%Y-%m-%dT%H:%M") {
            return Some(naive.and_utc());
        }
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

/// Whether `text` is a parsable date.
pub fn is_date(text: &str) -> bool {
    parse_timestamp(text).is_some()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d);
    }
    // A bare year ("2025") means January 1.
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1);
    }
    // Year-month ("2025-04") means the first of the month.
    let (year, month) = text.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_rfc3339_with_zulu() {
        assert_eq!(
            parse_timestamp("2025-04-01T12:30:00Z"),
            Some(Utc.with_ymd_and_hms(2025, 4, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        assert_eq!(
            parse_timestamp("2025-04-01T14:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2025, 4, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2025-04-01T14:30:00+0200"),
            Some(Utc.with_ymd_and_hms(2025, 4, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn accepts_other_shapes() {
        assert!(is_date("2025-04-01"));
        assert!(is_date("2025-04"));
        assert!(is_date("2025-04-01T12:30:00"));
        assert!(is_date("2025-04-01 12:30:00.250"));
        assert!(is_date("2025-04-01T12:30"));
        assert!(is_date("Tue, 1 Apr 2025 12:30:00 +0000"));
    }

    #[test]
    fn accepts_minute_precision_with_offset() {
        let expected = Some(Utc.with_ymd_and_hms(2025, 4, 1, 12, 30, 0).unwrap());
        assert_eq!(parse_timestamp("2025-04-01T12:30Z"), expected);
        assert_eq!(parse_timestamp("2025-04-01T14:30+02:00"), expected);
        assert_eq!(parse_timestamp("2025-04-01T14:30+0200"), expected);
        assert_eq!(parse_timestamp("2025-04-01T12:30"), expected);
    }

    #[test]
    fn bare_year_is_january_first() {
        assert_eq!(
            parse_timestamp("2025"),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(!is_date("202"));
        assert!(!is_date("20x5"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_date("invalid-date-format"));
        assert!(!is_date("not-a-valid-timestamp"));
        assert!(!is_date(""));
        assert!(!is_date("2025-13-01"));
        assert!(!is_date("2025-02-30"));
        assert!(!is_date("abcd-ef"));
    }
}
