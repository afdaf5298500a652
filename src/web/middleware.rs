//! HTTP middleware

use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Logs every request with its status and duration
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    debug!(method = %method, uri = %uri, "HTTP request started");

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    if status >= 400 {
        warn!(
            method = %method,
            uri = %uri,
            status = status,
            duration_ms = duration_ms,
            "HTTP request completed with error"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = status,
            duration_ms = duration_ms,
            "HTTP request completed"
        );
    }

    response
}
