//! The service produced by [`Conditional`](crate::Conditional).

use std::task::{Context, Poll};

use conditional_http::{ConditionalBody, ConditionalConfig, OwnedPreconditions};
use http::{Request, Response};
use http_body::Body as HttpBody;
use tower::Service;

use crate::future::ConditionalFuture;

/// Evaluates request preconditions against the inner service's response.
#[derive(Debug)]
pub struct ConditionalService<S> {
    upstream: S,
    config: ConditionalConfig,
}

impl<S> ConditionalService<S> {
    /// Wraps `upstream`.
    pub fn new(upstream: S, config: ConditionalConfig) -> Self {
        ConditionalService { upstream, config }
    }

    /// The wrapped service.
    pub fn get_ref(&self) -> &S {
        &self.upstream
    }

    /// Unwraps the inner service.
    pub fn into_inner(self) -> S {
        self.upstream
    }
}

impl<S> Clone for ConditionalService<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            config: self.config,
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for ConditionalService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: HttpBody,
{
    type Response = Response<ConditionalBody<ResBody>>;
    type Error = S::Error;
    type Future = ConditionalFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.upstream.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // Headers are captured before the request moves into the inner service.
        let preconditions = if self.config.enabled {
            Some(OwnedPreconditions::from_request(&req)).filter(|p| !p.is_unconditional())
        } else {
            None
        };

        ConditionalFuture::new(self.upstream.call(req), preconditions, self.config)
    }
}
