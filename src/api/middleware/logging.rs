//! Logging middleware for request/response tracing.
//!
//! Logs incoming requests and outgoing responses with timing information
//! and request correlation via request IDs.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Level, debug, info, span};

use super::RequestId;

/// Logs method, path and request id on the way in; status and duration on
/// the way out, inside one correlation span.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    // Liveness probes would otherwise dominate the log at info level
    let probe = uri.path() == "/health";

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );
    let _enter = span.enter();

    if !probe {
        info!(
            method = %method,
            path = %uri.path(),
            request_id = %request_id,
            "Request received"
        );
    }

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    if probe {
        debug!(
            status = %response.status().as_u16(),
            duration_ms = %duration.as_millis(),
            "Probe handled"
        );
    } else {
        info!(
            status = %response.status().as_u16(),
            duration_ms = %duration.as_millis(),
            request_id = %request_id,
            "Response sent"
        );
    }

    response
}
