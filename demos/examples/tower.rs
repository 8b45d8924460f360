//! Tower Service Example
//!
//! Demonstrates the conditional-tower layer with a plain Tower service and a
//! Hyper server.
//!
//! Features shown:
//!   - Direct tower::Service trait implementation
//!   - Hyper HTTP server integration (without Axum)
//!   - Strong ETag and Last-Modified validators set by the handler
//!
//! Run:
//!   cargo run -p conditional-demos --example tower
//!
//! Endpoints:
//!   - http://localhost:3001/         - Greeting with a strong ETag
//!   - http://localhost:3001/started  - Server start time with Last-Modified
//!   - http://localhost:3001/health   - Health check (no validators)
//!
//! Try it:
//!   curl -v -H 'If-None-Match: "hello-v1"' http://localhost:3001/    # 304
//!   curl -v -H 'If-Match: "hello-v0"' http://localhost:3001/         # 412
//!   curl -v -H "If-Modified-Since: $(date -u '+%a, %d %b %Y %H:%M:%S GMT')" \
//!     http://localhost:3001/started                                  # 304

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use conditional_core::format_http_date;
use conditional_tower::Conditional;
use http::header::{CONTENT_TYPE, ETAG, LAST_MODIFIED};
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower::{Service, ServiceBuilder};

/// Simple handler service that routes requests based on path
#[derive(Clone)]
struct HelloService {
    started: DateTime<Utc>,
}

impl<B> Service<Request<B>> for HelloService
where
    B: Send + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let path = req.uri().path().to_string();
        let started = self.started;

        Box::pin(async move {
            let response = match path.as_str() {
                "/" => Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "text/plain")
                    .header(ETAG, "\"hello-v1\"")
                    .body(Full::new(Bytes::from("Hello from Tower!")))
                    .unwrap(),

                "/started" => Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "text/plain")
                    .header(LAST_MODIFIED, format_http_date(started))
                    .body(Full::new(Bytes::from(format!(
                        "Started at: {}",
                        started.to_rfc3339()
                    ))))
                    .unwrap(),

                "/health" => Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "text/plain")
                    .body(Full::new(Bytes::from("OK")))
                    .unwrap(),

                _ => Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .header(CONTENT_TYPE, "text/plain")
                    .body(Full::new(Bytes::from("Not Found")))
                    .unwrap(),
            };

            Ok(response)
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subscriber = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter("info,conditional_core=trace,conditional_tower=trace")
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let service = ServiceBuilder::new()
        .layer(Conditional::new())
        .service(HelloService {
            started: Utc::now(),
        });

    let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let svc = service.clone();

        tokio::task::spawn(async move {
            let hyper_service = TowerToHyperService::new(svc);

            if let Err(err) = http1::Builder::new()
                .serve_connection(io, hyper_service)
                .await
            {
                tracing::error!(?err, "Error serving connection");
            }
        });
    }
}
