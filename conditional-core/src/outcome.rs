//! Final decision of a precondition evaluation.

use std::fmt;

/// What the server should do with a conditional request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No precondition short-circuits the request; handle it normally.
    Proceed,
    /// Answer with `304 Not Modified`.
    NotModified,
    /// Answer with `412 Precondition Failed`.
    PreconditionFailed,
}

impl Outcome {
    /// HTTP status code to send, or `None` for [`Outcome::Proceed`].
    pub fn status_code(self) -> Option<u16> {
        match self {
            Outcome::Proceed => None,
            Outcome::NotModified => Some(304),
            Outcome::PreconditionFailed => Some(412),
        }
    }

    /// Returns `true` for [`Outcome::Proceed`].
    pub fn is_proceed(self) -> bool {
        self == Outcome::Proceed
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Proceed => "proceed",
            Outcome::NotModified => "not-modified",
            Outcome::PreconditionFailed => "precondition-failed",
        })
    }
}
