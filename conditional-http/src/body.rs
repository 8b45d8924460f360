//! Response body that can be swapped for an empty one.
//!
//! A `304` or `412` produced by middleware must not carry the representation
//! the inner service generated. [`ConditionalBody`] lets the middleware keep a
//! single response type while dropping that body.

use std::pin::Pin;
use std::task::{Context, Poll};

use http_body::{Body as HttpBody, Frame, SizeHint};
use pin_project::pin_project;

/// Either the inner service's body or nothing at all.
#[pin_project(project = ConditionalBodyProj)]
#[derive(Debug)]
pub enum ConditionalBody<B> {
    /// The body produced by the inner service, streamed unchanged.
    Inner(#[pin] B),
    /// No body; ends immediately.
    Empty,
}

impl<B> ConditionalBody<B> {
    /// Wraps a body to be passed through.
    pub fn inner(body: B) -> Self {
        ConditionalBody::Inner(body)
    }

    /// An empty body.
    pub fn empty() -> Self {
        ConditionalBody::Empty
    }
}

impl<B> Default for ConditionalBody<B> {
    fn default() -> Self {
        ConditionalBody::Empty
    }
}

impl<B> HttpBody for ConditionalBody<B>
where
    B: HttpBody,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            ConditionalBodyProj::Inner(body) => body.poll_frame(cx),
            ConditionalBodyProj::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            ConditionalBody::Inner(body) => body.is_end_stream(),
            ConditionalBody::Empty => true,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            ConditionalBody::Inner(body) => body.size_hint(),
            ConditionalBody::Empty => SizeHint::with_exact(0),
        }
    }
}
