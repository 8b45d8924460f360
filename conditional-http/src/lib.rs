//! Conditional requests for the [`http`] crate.
//!
//! This crate connects [`conditional_core`]'s decision procedure to
//! [`http::Request`] and [`http::Response`]:
//!
//! - [`HttpPreconditions`] and [`OwnedPreconditions`] expose request headers
//!   to the evaluator
//! - [`validators_from_headers`] reads `ETag` and `Last-Modified` off a response
//! - [`check`] evaluates and, when a precondition short-circuits, rewrites the
//!   response status (and for `304` strips representation metadata with
//!   [`not_modified`])
//! - [`ConditionalBody`] lets middleware drop the body of a short-circuited
//!   response
//! - [`ConditionalConfig`] holds the serde-loadable middleware settings
//!
//! # Example
//!
//! ```
//! use conditional_http::{HttpPreconditions, check};
//! use http::{Request, Response, StatusCode, header};
//!
//! let request = Request::get("/report")
//!     .header(header::IF_NONE_MATCH, "\"v7\"")
//!     .body(())
//!     .unwrap();
//!
//! let mut response = Response::builder()
//!     .header(header::ETAG, "\"v7\"")
//!     .header(header::CONTENT_TYPE, "text/plain")
//!     .body("report")
//!     .unwrap();
//!
//! let done = check(
//!     request.method(),
//!     &HttpPreconditions::new(request.headers()),
//!     &mut response,
//! );
//! assert!(done);
//! assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
//! assert!(response.headers().get(header::CONTENT_TYPE).is_none());
//! ```

pub mod body;
pub mod config;
mod request;
mod response;

pub use body::ConditionalBody;
pub use conditional_core::{Outcome, Validators};
pub use config::{ConditionalConfig, ConfigError};
pub use request::{HttpPreconditions, OwnedPreconditions, evaluate_request};
pub use response::{
    check, into_not_modified, not_modified, outcome_status, validators_from_headers,
};
