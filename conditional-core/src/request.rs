//! Read-only view of the precondition headers of a request.

/// Access to the four precondition headers of a request.
///
/// Each method returns the raw header value, or `None` when the header is
/// absent. An empty value is treated the same as an absent one by the
/// evaluator.
///
/// # For Implementors
///
/// Return the first value when a header occurs more than once. Values that
/// cannot be represented as `&str` should be reported as absent.
pub trait PreconditionHeaders {
    /// The `If-Match` header.
    fn if_match(&self) -> Option<&str>;
    /// The `If-None-Match` header.
    fn if_none_match(&self) -> Option<&str>;
    /// The `If-Modified-Since` header.
    fn if_modified_since(&self) -> Option<&str>;
    /// The `If-Unmodified-Since` header.
    fn if_unmodified_since(&self) -> Option<&str>;
}

impl<T> PreconditionHeaders for &T
where
    T: PreconditionHeaders + ?Sized,
{
    fn if_match(&self) -> Option<&str> {
        (**self).if_match()
    }

    fn if_none_match(&self) -> Option<&str> {
        (**self).if_none_match()
    }

    fn if_modified_since(&self) -> Option<&str> {
        (**self).if_modified_since()
    }

    fn if_unmodified_since(&self) -> Option<&str> {
        (**self).if_unmodified_since()
    }
}

/// Precondition headers held in plain strings.
///
/// Handy for callers without an HTTP library at hand, and in tests.
///
/// ```
/// use conditional_core::{PreconditionHeaders, RequestPreconditions};
///
/// let request = RequestPreconditions::new()
///     .with_if_match("\"v2\"")
///     .with_if_unmodified_since("Mon, 20 Jan 2020 20:01:20 GMT");
/// assert_eq!(request.if_match(), Some("\"v2\""));
/// assert_eq!(request.if_none_match(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPreconditions {
    if_match: Option<String>,
    if_none_match: Option<String>,
    if_modified_since: Option<String>,
    if_unmodified_since: Option<String>,
}

impl RequestPreconditions {
    /// Creates a request without preconditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `If-Match`.
    pub fn with_if_match(mut self, value: impl Into<String>) -> Self {
        self.if_match = Some(value.into());
        self
    }

    /// Sets `If-None-Match`.
    pub fn with_if_none_match(mut self, value: impl Into<String>) -> Self {
        self.if_none_match = Some(value.into());
        self
    }

    /// Sets `If-Modified-Since`.
    pub fn with_if_modified_since(mut self, value: impl Into<String>) -> Self {
        self.if_modified_since = Some(value.into());
        self
    }

    /// Sets `If-Unmodified-Since`.
    pub fn with_if_unmodified_since(mut self, value: impl Into<String>) -> Self {
        self.if_unmodified_since = Some(value.into());
        self
    }
}

impl PreconditionHeaders for RequestPreconditions {
    fn if_match(&self) -> Option<&str> {
        self.if_match.as_deref()
    }

    fn if_none_match(&self) -> Option<&str> {
        self.if_none_match.as_deref()
    }

    fn if_modified_since(&self) -> Option<&str> {
        self.if_modified_since.as_deref()
    }

    fn if_unmodified_since(&self) -> Option<&str> {
        self.if_unmodified_since.as_deref()
    }
}
