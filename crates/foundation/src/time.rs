//! Calendar dates attached to geometries.
//!
//! Dates arrive as ISO-8601 text. Parsing is lenient about the encoding (plain
//! date, RFC 3339 timestamp, or a naive timestamp) and reduces everything to a
//! UTC calendar date, which is all the recency classification needs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO-8601 date or timestamp into its UTC calendar date.
///
/// Naive timestamps (no offset) are read as UTC. Returns `None` for anything
/// unparseable.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Age class of a date relative to a threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Recency {
    /// Strictly before the threshold.
    Old,
    /// On or after the threshold.
    New,
    /// Date could not be parsed; fails both comparisons.
    Unknown,
}

/// Threshold separating old from new dates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RecencyThreshold {
    pub date: NaiveDate,
}

impl RecencyThreshold {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn classify(&self, date: Option<NaiveDate>) -> Recency {
        match date {
            Some(d) if d < self.date => Recency::Old,
            Some(_) => Recency::New,
            None => Recency::Unknown,
        }
    }

    pub fn classify_str(&self, text: &str) -> Recency {
        self.classify(parse_calendar_date(text))
    }
}

impl Default for RecencyThreshold {
    fn default() -> Self {
        Self::new(default_old_threshold())
    }
}

/// 2020-01-01: dates before it are "old".
pub fn default_old_threshold() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::{Recency, RecencyThreshold, parse_calendar_date};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_calendar_date("2019-06-01"), Some(ymd(2019, 6, 1)));
        assert_eq!(
            parse_calendar_date("2021-01-01T10:30:00Z"),
            Some(ymd(2021, 1, 1))
        );
        assert_eq!(
            parse_calendar_date("2020-06-15T08:00:00"),
            Some(ymd(2020, 6, 15))
        );
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        // 23:30 at -02:00 is already the next day in UTC.
        assert_eq!(
            parse_calendar_date("2019-12-31T23:30:00-02:00"),
            Some(ymd(2020, 1, 1))
        );
    }

    #[test]
    fn garbage_does_not_parse() {
        assert_eq!(parse_calendar_date("not a date"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("2019-13-45"), None);
    }

    #[test]
    fn threshold_boundary_is_new() {
        let t = RecencyThreshold::default();
        assert_eq!(t.classify_str("2019-12-31"), Recency::Old);
        assert_eq!(t.classify_str("2020-01-01"), Recency::New);
        assert_eq!(t.classify_str("2021-01-01"), Recency::New);
        assert_eq!(t.classify_str("??"), Recency::Unknown);
    }
}
