//! Canonical timestamp handling.
//!
//! Every timestamp in the catalog uses the text form `YYYY-MM-DD HH:MM:SS`
//! interpreted as UTC. Values produced here are truncated to whole seconds
//! so that formatting and re-parsing a timestamp is lossless.

use chrono::{NaiveDateTime, Timelike, Utc};

/// The canonical catalog timestamp layout.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp from its canonical text form.
pub fn parse_date_time(s: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
}

/// Format a timestamp into its canonical text form.
pub fn format_date_time(dt: NaiveDateTime) -> String {
    dt.format(DATE_TIME_FORMAT).to_string()
}

/// The current UTC wall-clock time at second precision.
pub fn now_utc() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// The epoch placeholder carried by records whose provenance stamps have
/// not been assigned yet.
pub fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_form() {
        let dt = parse_date_time("2017-09-07 21:42:09").unwrap();
        assert_eq!(format_date_time(dt), "2017-09-07 21:42:09");
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert!(parse_date_time("2017-09-07T21:42:09").is_err());
        assert!(parse_date_time("07/09/2017 21:42").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn test_now_round_trips() {
        let now = now_utc();
        let parsed = parse_date_time(&format_date_time(now)).unwrap();
        assert_eq!(parsed, now);
    }
}
