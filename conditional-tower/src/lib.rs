//! Tower middleware for conditional HTTP requests.
//!
//! [`Conditional`] is a Tower [`Layer`] that evaluates the request's
//! `If-Match`, `If-None-Match`, `If-Modified-Since` and `If-Unmodified-Since`
//! headers against the `ETag` and `Last-Modified` of the response produced by
//! the wrapped service. When a precondition decides the outcome, the response
//! is rewritten into `304 Not Modified` or `412 Precondition Failed` and its
//! body is dropped.
//!
//! # Quick Start
//!
//! ```
//! use conditional_tower::Conditional;
//! use tower::{ServiceBuilder, service_fn};
//!
//! let service = ServiceBuilder::new()
//!     .layer(Conditional::new())
//!     .service(service_fn(|_req: http::Request<()>| async {
//!         let response = http::Response::builder()
//!             .header(http::header::ETAG, "\"v1\"")
//!             .body(String::from("Hello"))
//!             .unwrap();
//!         Ok::<_, std::convert::Infallible>(response)
//!     }));
//! # let _ = service;
//! ```
//!
//! # Evaluation happens after the handler
//!
//! The validators are read from the response, so the wrapped service always
//! runs. Handlers with side effects (a `PUT` guarded by `If-Match`, for
//! instance) should evaluate preconditions themselves with
//! [`conditional_http::check`] before mutating anything.
//!
//! # Configuration
//!
//! See [`ConditionalConfig`]. By default only `2xx` responses are evaluated.
//!
//! [`Layer`]: tower::Layer

#![warn(missing_docs)]

pub mod future;
pub mod layer;
pub mod service;

pub use conditional_http::{ConditionalBody, ConditionalConfig};
pub use future::ConditionalFuture;
pub use layer::{Conditional, ConditionalBuilder};
pub use service::ConditionalService;
