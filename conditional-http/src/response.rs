use conditional_core::{
    EntityTag, Outcome, PreconditionHeaders, Validators, evaluate, parse_http_date,
};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, LAST_MODIFIED};
use http::{HeaderMap, Method, Response, StatusCode};
use tracing::debug;

use crate::request::header_str;

/// Reads the `ETag` and `Last-Modified` validators off response headers.
///
/// A `Last-Modified` value that is not an HTTP-date is ignored. A malformed
/// `ETag` is still used as-is; it simply never matches a well-formed request
/// tag.
pub fn validators_from_headers(headers: &HeaderMap) -> Validators {
    let mut validators = Validators::new();

    if let Some(etag) = header_str(headers.get(ETAG)) {
        if let Err(error) = EntityTag::parse(etag) {
            debug!(etag, %error, "response ETag is not a valid entity-tag");
        }
        validators = validators.with_etag(etag);
    }

    if let Some(value) = header_str(headers.get(LAST_MODIFIED)) {
        match parse_http_date(value) {
            Some(last_modified) => validators = validators.with_last_modified(last_modified),
            None => debug!(last_modified = value, "ignoring unparseable Last-Modified"),
        }
    }

    validators
}

/// Strips representation metadata before a `304 Not Modified` is sent
/// ([RFC 7232 §4.1](https://tools.ietf.org/html/rfc7232#section-4.1)).
///
/// `Content-Type` and `Content-Length` are always removed. `Last-Modified`
/// is removed only when an `ETag` is present to act as the validator.
pub fn not_modified(headers: &mut HeaderMap) {
    headers.remove(CONTENT_TYPE);
    headers.remove(CONTENT_LENGTH);
    if headers.get(ETAG).is_some_and(|etag| !etag.is_empty()) {
        headers.remove(LAST_MODIFIED);
    }
}

/// Turns `response` into a `304 Not Modified`, scrubbing its headers with
/// [`not_modified`]. The body is left to the caller.
pub fn into_not_modified<B>(mut response: Response<B>) -> Response<B> {
    not_modified(response.headers_mut());
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    response
}

/// Status code for `outcome`, or `None` when the request should proceed.
pub fn outcome_status(outcome: Outcome) -> Option<StatusCode> {
    match outcome {
        Outcome::Proceed => None,
        Outcome::NotModified => Some(StatusCode::NOT_MODIFIED),
        Outcome::PreconditionFailed => Some(StatusCode::PRECONDITION_FAILED),
    }
}

/// Evaluates request preconditions against the validators already set on
/// `response`.
///
/// Returns `true` when a precondition short-circuited the response: its
/// status is then `304` (with headers scrubbed by [`not_modified`]) or `412`.
/// Returns `false`, leaving `response` untouched, when the request should
/// proceed. The body is never modified.
pub fn check<H, B>(method: &Method, request: &H, response: &mut Response<B>) -> bool
where
    H: PreconditionHeaders + ?Sized,
{
    let validators = validators_from_headers(response.headers());
    match evaluate(request, method.as_str(), &validators) {
        Outcome::Proceed => false,
        Outcome::NotModified => {
            not_modified(response.headers_mut());
            *response.status_mut() = StatusCode::NOT_MODIFIED;
            true
        }
        Outcome::PreconditionFailed => {
            *response.status_mut() = StatusCode::PRECONDITION_FAILED;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn headers(pairs: &[(http::HeaderName, &'static str)]) -> HeaderMap {
        pairs
            .iter()
            .map(|(name, value)| (name.clone(), HeaderValue::from_static(value)))
            .collect()
    }

    #[test]
    fn reads_validators() {
        let map = headers(&[
            (ETAG, "\"strong\""),
            (LAST_MODIFIED, "Fri, 05 Jan 2018 11:25:15 GMT"),
        ]);

        let validators = validators_from_headers(&map);
        assert_eq!(validators.etag(), "\"strong\"");
        assert_eq!(
            validators.last_modified(),
            Some(Utc.with_ymd_and_hms(2018, 1, 5, 11, 25, 15).unwrap())
        );
    }

    #[test]
    fn ignores_unparseable_last_modified() {
        let map = headers(&[(LAST_MODIFIED, "yesterday")]);
        assert_eq!(validators_from_headers(&map), Validators::new());
    }

    #[test]
    fn keeps_malformed_etag_verbatim() {
        let map = headers(&[(ETAG, "unquoted")]);
        assert_eq!(validators_from_headers(&map).etag(), "unquoted");
    }

    #[test]
    fn not_modified_clears_headers() {
        let mut map = headers(&[
            (CONTENT_TYPE, "text/plain"),
            (CONTENT_LENGTH, "33"),
            (ETAG, "\"strong\""),
            (LAST_MODIFIED, "Fri, 05 Jan 2018 11:25:15 GMT"),
        ]);

        not_modified(&mut map);
        assert_eq!(map, headers(&[(ETAG, "\"strong\"")]));
    }

    #[test]
    fn not_modified_keeps_last_modified_without_etag() {
        let mut map = headers(&[
            (CONTENT_TYPE, "text/plain"),
            (CONTENT_LENGTH, "33"),
            (LAST_MODIFIED, "Fri, 05 Jan 2018 11:25:15 GMT"),
        ]);

        not_modified(&mut map);
        assert_eq!(
            map,
            headers(&[(LAST_MODIFIED, "Fri, 05 Jan 2018 11:25:15 GMT")])
        );
    }

    #[test]
    fn outcome_statuses() {
        assert_eq!(outcome_status(Outcome::Proceed), None);
        assert_eq!(
            outcome_status(Outcome::NotModified),
            Some(StatusCode::NOT_MODIFIED)
        );
        assert_eq!(
            outcome_status(Outcome::PreconditionFailed),
            Some(StatusCode::PRECONDITION_FAILED)
        );
    }
}
