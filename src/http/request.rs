//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Log every inbound request before dispatch, credentials redacted
//! - Prepare the outbound body for forwarding
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Original request preserved; the logging path only sees a copy

use axum::{
    body::{Body, HttpBody},
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::security::headers::redact;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Set on responses to the upstream URL the proxy used.
pub const X_REDIRECTED: &str = "x-redirected";

/// Generates a UUID v4 request ID for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request observer: logs method, URL and redacted headers, then dispatches.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    tracing::info!(
        method = %request.method(),
        url = %request.uri(),
        header = ?redact(request.headers()),
        "got request"
    );
    next.run(request).await
}

/// Host the client addressed, used to point auth challenges back at us.
pub fn request_host(headers: &HeaderMap, uri: &axum::http::Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default()
}

/// Streamed upstream body, or `None` when the client sent no body.
pub fn outbound_body(body: Body) -> Option<reqwest::Body> {
    if body.is_end_stream() {
        return None;
    }
    Some(reqwest::Body::wrap_stream(body.into_data_stream()))
}
