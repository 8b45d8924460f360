//! Response future for [`ConditionalService`](crate::ConditionalService).

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use conditional_http::{ConditionalBody, ConditionalConfig, OwnedPreconditions, check};
use futures::ready;
use http::header::CONTENT_LENGTH;
use http::{Response, StatusCode};
use pin_project::pin_project;
use tracing::{debug, trace};

/// Waits for the inner service and applies the request's preconditions to
/// its response.
#[pin_project]
pub struct ConditionalFuture<F> {
    #[pin]
    inner: F,
    preconditions: Option<OwnedPreconditions>,
    config: ConditionalConfig,
}

impl<F> ConditionalFuture<F> {
    /// Wraps the inner service's future. `None` preconditions pass the
    /// response through untouched.
    pub fn new(
        inner: F,
        preconditions: Option<OwnedPreconditions>,
        config: ConditionalConfig,
    ) -> Self {
        ConditionalFuture {
            inner,
            preconditions,
            config,
        }
    }
}

impl<F, ResBody, E> Future for ConditionalFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ConditionalBody<ResBody>>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.inner.poll(cx));

        let response = match result {
            Ok(response) => response,
            Err(error) => return Poll::Ready(Err(error)),
        };

        let response = match this.preconditions.take() {
            Some(preconditions) => finalize(response, &preconditions, this.config),
            None => response.map(ConditionalBody::Inner),
        };

        Poll::Ready(Ok(response))
    }
}

fn finalize<B>(
    mut response: Response<B>,
    preconditions: &OwnedPreconditions,
    config: &ConditionalConfig,
) -> Response<ConditionalBody<B>> {
    if !config.applies_to(response.status()) {
        trace!(status = %response.status(), "skipping precondition evaluation");
        return response.map(ConditionalBody::Inner);
    }

    if !check(preconditions.method(), preconditions, &mut response) {
        return response.map(ConditionalBody::Inner);
    }

    debug!(
        method = %preconditions.method(),
        status = %response.status(),
        "precondition short-circuited response"
    );

    // the body is dropped, so its length no longer describes the message
    if response.status() == StatusCode::PRECONDITION_FAILED {
        response.headers_mut().remove(CONTENT_LENGTH);
    }

    response.map(|_| ConditionalBody::Empty)
}
