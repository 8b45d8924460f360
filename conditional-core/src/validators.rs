//! Response validators: the entity tag and last-modified timestamp of the
//! selected representation.

use chrono::{DateTime, Utc};

use crate::date::is_unspecified;

/// The validator pair of a response
/// ([RFC 7232 §2](https://tools.ietf.org/html/rfc7232#section-2)).
///
/// Either validator may be missing. A missing entity tag compares as the
/// empty string. A missing last-modified timestamp and one equal to the Unix
/// epoch both disable the date-based preconditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validators {
    etag: Option<String>,
    last_modified: Option<DateTime<Utc>>,
}

impl Validators {
    /// Creates an empty validator pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entity tag, as it would appear in the `ETag` header
    /// (quotes and optional `W/` included).
    pub fn with_etag(self, etag: impl Into<String>) -> Self {
        Validators {
            etag: Some(etag.into()),
            ..self
        }
    }

    /// Sets the last-modified timestamp.
    pub fn with_last_modified(self, last_modified: DateTime<Utc>) -> Self {
        Validators {
            last_modified: Some(last_modified),
            ..self
        }
    }

    /// The entity tag, or `""` when none is set.
    pub fn etag(&self) -> &str {
        self.etag.as_deref().unwrap_or_default()
    }

    /// The last-modified timestamp, or `None` when unset or equal to the
    /// Unix epoch.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified.filter(|date| !is_unspecified(*date))
    }
}
