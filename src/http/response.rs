//! Response handling and transformation.
//!
//! # Responsibilities
//! - Copy upstream headers for the client (hop-by-hop stripped)
//! - Apply the Www-Authenticate and Link rewrites
//! - Stream or replace the upstream body
//! - Map proxy failures to 500 responses
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the body; the tag-list rewrite is
//!   the single buffered exception and lives in the proxy handler
//! - Error responses carry no upstream headers

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ProxyError;
use crate::http::request::X_REDIRECTED;
use crate::rewrite::headers::{rewrite_link, rewrite_www_authenticate};
use crate::rewrite::OrgMapper;

/// Rewrite every value of `name` in place with `f`. Values that are not
/// valid UTF-8, or whose rewrite is not a valid header value, are kept.
pub fn rewrite_header_values(headers: &mut HeaderMap, name: HeaderName, f: impl Fn(&str) -> String) {
    let rewritten: Vec<HeaderValue> = headers
        .get_all(&name)
        .iter()
        .map(|value| {
            value
                .to_str()
                .ok()
                .and_then(|s| HeaderValue::from_str(&f(s)).ok())
                .unwrap_or_else(|| value.clone())
        })
        .collect();
    if rewritten.is_empty() {
        return;
    }
    headers.remove(&name);
    for value in rewritten {
        headers.append(name.clone(), value);
    }
}

/// Point the auth challenge realm at the host the client used.
pub fn rewrite_www_authenticate_header(headers: &mut HeaderMap, upstream_host: &str, request_host: &str) {
    rewrite_header_values(headers, header::WWW_AUTHENTICATE, |value| {
        rewrite_www_authenticate(value, upstream_host, request_host)
    });
}

/// Point pagination links back at the alias.
pub fn rewrite_link_header(headers: &mut HeaderMap, mapper: &OrgMapper, alias: Option<&str>) {
    rewrite_header_values(headers, header::LINK, |value| rewrite_link(value, mapper, alias));
}

/// Set `X-Redirected` to the upstream URL used.
pub fn set_redirected(headers: &mut HeaderMap, url: &str) {
    if let Ok(value) = HeaderValue::from_str(url) {
        headers.insert(HeaderName::from_static(X_REDIRECTED), value);
    }
}

/// Assemble the client response.
pub fn build_response(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// 500 with the error text, tagged with the upstream URL when one was chosen.
pub fn error_response(err: ProxyError, upstream_url: &str) -> Response {
    tracing::error!(url = %upstream_url, error = %err, "Error sending request");
    let mut response = err.into_response();
    set_redirected(response.headers_mut(), upstream_url);
    response
}
