#![warn(missing_docs)]
//! # conditional-core
//!
//! Protocol-level core of HTTP conditional requests (RFC 7232 §§2–6).
//!
//! Given the validators of a response (an entity tag and/or a last-modified
//! timestamp) and the preconditions carried by a request (`If-Match`,
//! `If-None-Match`, `If-Modified-Since`, `If-Unmodified-Since`), the
//! [`evaluate()`] function decides whether the server should answer with
//! `304 Not Modified`, `412 Precondition Failed`, or proceed normally.
//!
//! This crate knows nothing about a concrete HTTP library. Requests are seen
//! through the [`PreconditionHeaders`] trait; the `conditional-http` crate
//! implements it for [`http::HeaderMap`] and adds response-side plumbing.
//!
//! ## Architecture
//!
//! - **Match** entity tags from header values ([`etag`])
//! - **Check** each precondition into a tri-state [`Condition`] ([`evaluate`](mod@evaluate))
//! - **Reduce** the checks, in RFC order, into an [`Outcome`]
//!
//! Malformed input never errors: a broken entity-tag list stops scanning and
//! an unparseable date makes its precondition [`Condition::Neutral`].
//!
//! ## Example
//!
//! ```
//! use conditional_core::{Outcome, RequestPreconditions, Validators, evaluate};
//!
//! let validators = Validators::new().with_etag("\"123456\"");
//! let request = RequestPreconditions::new().with_if_none_match("\"123456\"");
//!
//! assert_eq!(evaluate(&request, "GET", &validators), Outcome::NotModified);
//! assert_eq!(evaluate(&request, "PUT", &validators), Outcome::PreconditionFailed);
//! ```
//!
//! [`http::HeaderMap`]: https://docs.rs/http/latest/http/header/struct.HeaderMap.html

pub mod condition;
pub mod date;
pub mod etag;
pub mod evaluate;
pub mod outcome;
pub mod request;
pub mod validators;

pub use condition::Condition;
pub use date::{format_http_date, is_unspecified, parse_http_date};
pub use etag::{ETagList, EntityTag, InvalidEntityTag, ListItem, scan, strong_match, weak_match};
pub use evaluate::{
    check_if_match, check_if_modified_since, check_if_none_match, check_if_unmodified_since,
    evaluate,
};
pub use outcome::Outcome;
pub use request::{PreconditionHeaders, RequestPreconditions};
pub use validators::Validators;
