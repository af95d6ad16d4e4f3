//! Header manipulation.
//!
//! # Responsibilities
//! - Redact `Authorization` before headers reach the logs
//! - Strip `Host` and hop-by-hop headers when relaying to upstream
//! - Strip hop-by-hop headers when relaying the upstream response

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Replacement logged in place of credentials.
pub const REDACTED: &str = "REDACTED";

/// Headers that only describe a single connection and must not be relayed.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-connection"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Copy of `headers` safe to log. The input is never modified.
pub fn redact(headers: &HeaderMap) -> HeaderMap {
    let mut copy = headers.clone();
    if copy.contains_key(header::AUTHORIZATION) {
        copy.insert(header::AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }
    copy
}

/// Inbound headers to send upstream: everything except `Host` and
/// hop-by-hop headers. Credentials pass through.
pub fn forward_request_headers(headers: &HeaderMap) -> HeaderMap {
    filtered(headers, |name| *name != header::HOST && !is_hop_by_hop(name))
}

/// Upstream response headers to relay to the client.
pub fn copy_response_headers(headers: &HeaderMap) -> HeaderMap {
    filtered(headers, |name| !is_hop_by_hop(name))
}

fn filtered(headers: &HeaderMap, keep: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if keep(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}
