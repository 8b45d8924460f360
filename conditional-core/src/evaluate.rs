//! The precondition decision procedure of
//! [RFC 7232 §6](https://tools.ietf.org/html/rfc7232#section-6).
//!
//! Each header is checked by its own function returning a [`Condition`].
//! [`evaluate`] runs them in the order the RFC mandates and reduces their
//! results to an [`Outcome`]:
//!
//! 1. `If-Match`, falling back to `If-Unmodified-Since` when neutral.
//!    `False` ends evaluation with `412`.
//! 2. `If-None-Match`. `False` ends evaluation with `304` for `GET`/`HEAD`
//!    and `412` otherwise; `True` ends it with [`Outcome::Proceed`].
//! 3. `If-Modified-Since`, only when `If-None-Match` was neutral. `False`
//!    ends evaluation with `304`.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use crate::condition::Condition;
use crate::date::parse_http_date;
use crate::etag::{ETagList, ListItem};
use crate::outcome::Outcome;
use crate::request::PreconditionHeaders;
use crate::validators::Validators;

/// Evaluates the preconditions of a request against the response validators.
///
/// `method` is compared case-sensitively with `"GET"` and `"HEAD"`.
///
/// ```
/// use conditional_core::{Outcome, RequestPreconditions, Validators, evaluate};
///
/// let validators = Validators::new().with_etag("\"b\"");
///
/// let request = RequestPreconditions::new().with_if_match("\"a\", \"b\", \"c\"");
/// assert_eq!(evaluate(&request, "PUT", &validators), Outcome::Proceed);
///
/// let request = RequestPreconditions::new().with_if_match("\"000000\"");
/// assert_eq!(evaluate(&request, "PUT", &validators), Outcome::PreconditionFailed);
/// ```
pub fn evaluate<H>(headers: &H, method: &str, validators: &Validators) -> Outcome
where
    H: PreconditionHeaders + ?Sized,
{
    let outcome = decide(headers, method, validators);
    if !outcome.is_proceed() {
        debug!(method, %outcome, "request precondition short-circuits response");
    }
    outcome
}

fn decide<H>(headers: &H, method: &str, validators: &Validators) -> Outcome
where
    H: PreconditionHeaders + ?Sized,
{
    let etag = validators.etag();
    let last_modified = validators.last_modified();

    let guard = check_if_match(headers.if_match(), etag).or_else(|| {
        check_if_unmodified_since(headers.if_unmodified_since(), last_modified)
    });
    trace!(condition = ?guard, "If-Match / If-Unmodified-Since");
    if guard == Condition::False {
        return Outcome::PreconditionFailed;
    }

    let none_match = check_if_none_match(headers.if_none_match(), etag);
    trace!(condition = ?none_match, "If-None-Match");
    match none_match {
        Condition::False if is_get_or_head(method) => Outcome::NotModified,
        Condition::False => Outcome::PreconditionFailed,
        Condition::True => Outcome::Proceed,
        Condition::Neutral => {
            let modified =
                check_if_modified_since(method, headers.if_modified_since(), last_modified);
            trace!(condition = ?modified, "If-Modified-Since");
            match modified {
                Condition::False => Outcome::NotModified,
                Condition::True | Condition::Neutral => Outcome::Proceed,
            }
        }
    }
}

/// Checks `If-Match` (RFC 7232 §3.1) using strong comparison.
///
/// Absent or empty ⇒ `Neutral`; `*` or a strongly matching tag ⇒ `True`;
/// otherwise `False`, including when the list is malformed.
pub fn check_if_match(header: Option<&str>, etag: &str) -> Condition {
    let Some(value) = present(header) else {
        return Condition::Neutral;
    };

    let matched = ETagList::new(value).any(|item| match item {
        ListItem::Any => true,
        ListItem::Tag(tag) => tag.strong_match(etag),
    });
    Condition::from(matched)
}

/// Checks `If-None-Match` (RFC 7232 §3.2) using weak comparison.
///
/// Absent or empty ⇒ `Neutral`; `*` or a weakly matching tag ⇒ `False`;
/// otherwise `True`.
pub fn check_if_none_match(header: Option<&str>, etag: &str) -> Condition {
    let Some(value) = present(header) else {
        return Condition::Neutral;
    };

    let matched = ETagList::new(value).any(|item| match item {
        ListItem::Any => true,
        ListItem::Tag(tag) => tag.weak_match(etag),
    });
    Condition::from(!matched)
}

/// Checks `If-Unmodified-Since` (RFC 7232 §3.4).
///
/// `Neutral` when the header is absent or unparseable, or when no
/// last-modified timestamp is known.
pub fn check_if_unmodified_since(
    header: Option<&str>,
    last_modified: Option<DateTime<Utc>>,
) -> Condition {
    let (Some(value), Some(last_modified)) = (present(header), last_modified) else {
        return Condition::Neutral;
    };

    match parse_http_date(value) {
        Some(date) => Condition::from(unmodified_since(last_modified, date)),
        None => Condition::Neutral,
    }
}

/// Checks `If-Modified-Since` (RFC 7232 §3.3).
///
/// Only applies to `GET` and `HEAD`. `False` means the representation was
/// not modified since the given date.
pub fn check_if_modified_since(
    method: &str,
    header: Option<&str>,
    last_modified: Option<DateTime<Utc>>,
) -> Condition {
    if !is_get_or_head(method) {
        return Condition::Neutral;
    }
    let (Some(value), Some(last_modified)) = (present(header), last_modified) else {
        return Condition::Neutral;
    };

    match parse_http_date(value) {
        Some(date) => Condition::from(!unmodified_since(last_modified, date)),
        None => Condition::Neutral,
    }
}

// HTTP-dates have second precision, so compare against the start of the
// next second.
fn unmodified_since(last_modified: DateTime<Utc>, date: DateTime<Utc>) -> bool {
    last_modified < date + TimeDelta::seconds(1)
}

fn present(header: Option<&str>) -> Option<&str> {
    header.filter(|value| !value.is_empty())
}

fn is_get_or_head(method: &str) -> bool {
    method == "GET" || method == "HEAD"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DATE: &str = "Mon, 20 Jan 2020 20:01:20 GMT";

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 20, 20, 1, 20).unwrap()
    }

    #[test]
    fn if_match_absent_or_empty_is_neutral() {
        assert_eq!(check_if_match(None, "\"a\""), Condition::Neutral);
        assert_eq!(check_if_match(Some(""), "\"a\""), Condition::Neutral);
    }

    #[test]
    fn if_match_uses_strong_comparison() {
        assert_eq!(check_if_match(Some("\"a\""), "\"a\""), Condition::True);
        assert_eq!(check_if_match(Some("W/\"a\""), "W/\"a\""), Condition::False);
        assert_eq!(check_if_match(Some("\"a\""), "W/\"a\""), Condition::False);
        assert_eq!(check_if_match(Some("*"), ""), Condition::True);
    }

    #[test]
    fn if_match_without_response_etag_fails() {
        assert_eq!(check_if_match(Some("\"a\""), ""), Condition::False);
    }

    #[test]
    fn if_match_malformed_list_fails() {
        assert_eq!(check_if_match(Some("garbage"), "\"a\""), Condition::False);
        assert_eq!(check_if_match(Some("\"x\", junk, \"a\""), "\"a\""), Condition::False);
    }

    #[test]
    fn if_none_match_uses_weak_comparison() {
        assert_eq!(check_if_none_match(Some("W/\"a\""), "\"a\""), Condition::False);
        assert_eq!(check_if_none_match(Some("\"a\""), "W/\"a\""), Condition::False);
        assert_eq!(check_if_none_match(Some("\"b\""), "\"a\""), Condition::True);
        assert_eq!(check_if_none_match(Some("*"), ""), Condition::False);
        assert_eq!(check_if_none_match(None, "\"a\""), Condition::Neutral);
    }

    #[test]
    fn if_none_match_without_response_etag_holds() {
        assert_eq!(check_if_none_match(Some("\"a\""), ""), Condition::True);
    }

    #[test]
    fn if_unmodified_since_allows_one_second_of_truncation() {
        let header = Some(DATE);
        let subsec = date() + TimeDelta::milliseconds(999);
        assert_eq!(check_if_unmodified_since(header, Some(date())), Condition::True);
        assert_eq!(check_if_unmodified_since(header, Some(subsec)), Condition::True);
        assert_eq!(
            check_if_unmodified_since(header, Some(date() + TimeDelta::seconds(1))),
            Condition::False
        );
    }

    #[test]
    fn if_unmodified_since_fails_open() {
        assert_eq!(check_if_unmodified_since(Some("soon"), Some(date())), Condition::Neutral);
        assert_eq!(check_if_unmodified_since(Some(DATE), None), Condition::Neutral);
        assert_eq!(check_if_unmodified_since(None, Some(date())), Condition::Neutral);
    }

    #[test]
    fn if_modified_since_only_for_get_and_head() {
        let header = Some(DATE);
        assert_eq!(check_if_modified_since("GET", header, Some(date())), Condition::False);
        assert_eq!(check_if_modified_since("HEAD", header, Some(date())), Condition::False);
        assert_eq!(check_if_modified_since("POST", header, Some(date())), Condition::Neutral);
        assert_eq!(check_if_modified_since("get", header, Some(date())), Condition::Neutral);
    }

    #[test]
    fn if_modified_since_newer_representation_holds() {
        let newer = date() + TimeDelta::seconds(1);
        assert_eq!(check_if_modified_since("GET", Some(DATE), Some(newer)), Condition::True);
        assert_eq!(check_if_modified_since("GET", Some("x"), Some(newer)), Condition::Neutral);
    }
}
