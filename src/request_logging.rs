//! Per-request access logging for the HTTP API.
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{Request, Response};
use tower::{Layer, Service};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Wraps every request in an `http_request` span tagged with a fresh
/// request id, and logs its outcome when the response is ready.
#[derive(Clone, Copy)]
pub struct RequestLoggingLayer;

impl<S> Layer<S> for RequestLoggingLayer {
    type Service = RequestLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggingService { inner }
    }
}

#[derive(Clone)]
pub struct RequestLoggingService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLoggingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let span = info_span!(
            "http_request",
            request_id = %Uuid::new_v4().simple(),
            http.method = %req.method(),
            http.path = %req.uri().path(),
        );

        // Drive the instance that poll_ready prepared; keep a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(
            async move {
                let result = inner.call(req).await;
                let duration_ms = start.elapsed().as_millis();
                match &result {
                    Ok(response) if response.status().is_server_error() => warn!(
                        http.status = response.status().as_u16(),
                        duration_ms = %duration_ms,
                        "HTTP request errored"
                    ),
                    Ok(response) => info!(
                        http.status = response.status().as_u16(),
                        duration_ms = %duration_ms,
                        "HTTP request completed"
                    ),
                    Err(_) => warn!(duration_ms = %duration_ms, "HTTP request failed"),
                }
                result
            }
            .instrument(span),
        )
    }
}
