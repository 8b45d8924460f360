//! HTTP-date handling for `Last-Modified` and the `If-*-Since` headers.
//!
//! Parsing accepts the three formats of
//! [RFC 7231 §7.1.1.1](https://tools.ietf.org/html/rfc7231#section-7.1.1.1):
//! IMF-fixdate, the obsolete RFC 850 form and ANSI C `asctime()`.

use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Parses an HTTP-date, returning `None` when `value` is not one.
///
/// ```
/// use conditional_core::parse_http_date;
///
/// let date = parse_http_date("Mon, 20 Jan 2020 20:01:20 GMT").unwrap();
/// assert_eq!(date.timestamp(), 1_579_550_480);
/// assert!(parse_http_date("yesterday").is_none());
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    httpdate::parse_http_date(value.trim())
        .ok()
        .map(DateTime::<Utc>::from)
}

/// Formats `date` as an IMF-fixdate, truncating sub-second precision.
pub fn format_http_date(date: DateTime<Utc>) -> String {
    httpdate::fmt_http_date(SystemTime::from(date))
}

/// Reports whether `date` is the Unix epoch, which counts as "no
/// Last-Modified was set".
pub fn is_unspecified(date: DateTime<Utc>) -> bool {
    date.timestamp() == 0 && date.timestamp_subsec_nanos() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_all_http_date_formats() {
        let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();

        assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"), Some(expected));
        assert_eq!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"), Some(expected));
        assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_http_date(""), None);
        assert_eq!(parse_http_date("2020-01-20T20:01:20Z"), None);
        assert_eq!(parse_http_date("Mon, 32 Jan 2020 20:01:20 GMT"), None);
    }

    #[test]
    fn formats_imf_fixdate() {
        let date = Utc.with_ymd_and_hms(2018, 1, 5, 11, 25, 15).unwrap();
        assert_eq!(format_http_date(date), "Fri, 05 Jan 2018 11:25:15 GMT");
    }

    #[test]
    fn epoch_is_unspecified() {
        assert!(is_unspecified(DateTime::<Utc>::from_timestamp(0, 0).unwrap()));
        assert!(!is_unspecified(DateTime::<Utc>::from_timestamp(0, 1).unwrap()));
        assert!(!is_unspecified(DateTime::<Utc>::from_timestamp(1, 0).unwrap()));
    }
}
