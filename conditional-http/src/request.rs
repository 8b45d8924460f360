use conditional_core::{Outcome, PreconditionHeaders, Validators, evaluate};
use http::header::{IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request};

/// Borrowed view of the precondition headers in a [`HeaderMap`].
///
/// The first value of each header is used. Values that are not valid UTF-8
/// are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct HttpPreconditions<'a> {
    headers: &'a HeaderMap,
}

impl<'a> HttpPreconditions<'a> {
    /// Wraps a request's header map.
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

impl PreconditionHeaders for HttpPreconditions<'_> {
    fn if_match(&self) -> Option<&str> {
        header_str(self.headers.get(IF_MATCH))
    }

    fn if_none_match(&self) -> Option<&str> {
        header_str(self.headers.get(IF_NONE_MATCH))
    }

    fn if_modified_since(&self) -> Option<&str> {
        header_str(self.headers.get(IF_MODIFIED_SINCE))
    }

    fn if_unmodified_since(&self) -> Option<&str> {
        header_str(self.headers.get(IF_UNMODIFIED_SINCE))
    }
}

/// Owned snapshot of a request's method and precondition headers.
///
/// Middleware takes this before handing the request to the inner service,
/// then evaluates it once the response is known.
#[derive(Debug, Clone)]
pub struct OwnedPreconditions {
    method: Method,
    if_match: Option<HeaderValue>,
    if_none_match: Option<HeaderValue>,
    if_modified_since: Option<HeaderValue>,
    if_unmodified_since: Option<HeaderValue>,
}

impl OwnedPreconditions {
    /// Captures the preconditions of `request`.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_parts(request.method(), request.headers())
    }

    /// Captures the preconditions from a method and a header map.
    pub fn from_parts(method: &Method, headers: &HeaderMap) -> Self {
        let copy = |name: HeaderName| headers.get(name).cloned();
        Self {
            method: method.clone(),
            if_match: copy(IF_MATCH),
            if_none_match: copy(IF_NONE_MATCH),
            if_modified_since: copy(IF_MODIFIED_SINCE),
            if_unmodified_since: copy(IF_UNMODIFIED_SINCE),
        }
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns `true` when none of the four precondition headers were sent.
    pub fn is_unconditional(&self) -> bool {
        self.if_match.is_none()
            && self.if_none_match.is_none()
            && self.if_modified_since.is_none()
            && self.if_unmodified_since.is_none()
    }

    /// Evaluates the snapshot against `validators`.
    pub fn evaluate(&self, validators: &Validators) -> Outcome {
        evaluate(self, self.method.as_str(), validators)
    }
}

impl PreconditionHeaders for OwnedPreconditions {
    fn if_match(&self) -> Option<&str> {
        header_str(self.if_match.as_ref())
    }

    fn if_none_match(&self) -> Option<&str> {
        header_str(self.if_none_match.as_ref())
    }

    fn if_modified_since(&self) -> Option<&str> {
        header_str(self.if_modified_since.as_ref())
    }

    fn if_unmodified_since(&self) -> Option<&str> {
        header_str(self.if_unmodified_since.as_ref())
    }
}

/// Evaluates the preconditions of `request` against `validators`.
pub fn evaluate_request<B>(request: &Request<B>, validators: &Validators) -> Outcome {
    evaluate(
        &HttpPreconditions::new(request.headers()),
        request.method().as_str(),
        validators,
    )
}

// `HeaderValue::to_str` rejects obs-text, which entity tags allow, so go
// through UTF-8 instead.
pub(crate) fn header_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
}
