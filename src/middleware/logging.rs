//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Header carrying the request id, echoed back on the response
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Log every request with its outcome and latency.
///
/// Reuses the caller's `x-request-id` when present and generates one otherwise.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    match status {
        s if s.is_server_error() => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        ),
        s if s.is_client_error() && s != StatusCode::NOT_FOUND => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request rejected"
        ),
        s => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}
