//! Namespaced resource proxy: `/v2/{org}/{repo}/{rest...}`.
//!
//! # Responsibilities
//! - Resolve the alias and retarget the request to the upstream organization
//! - Relay credentials, observe 3xx answers directly (no redirect following)
//! - Rewrite Www-Authenticate and Link headers on the way back
//! - Rewrite tag-list bodies so `name` no longer carries the organization
//!
//! # Design Decisions
//! - Unknown aliases are forwarded with an empty organization segment and
//!   the upstream's answer (normally 404) is relayed as-is
//! - Only successful tag-list responses are decoded; error bodies and HEAD
//!   answers stream through
//! - A body that fails to decode is a 500, never a partial passthrough

use std::convert::Infallible;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
};
use futures_util::stream;

use crate::error::ProxyError;
use crate::http::request::{outbound_body, request_host};
use crate::http::response::{
    build_response, error_response, rewrite_link_header, rewrite_www_authenticate_header,
    set_redirected,
};
use crate::http::server::AppState;
use crate::rewrite::rewrite_list_body;
use crate::routing::ProxyTarget;
use crate::security::headers::{copy_response_headers, forward_request_headers, redact};

const TAGS_LIST: &str = "/tags/list";

/// Upstream URL for a namespaced request. The query is appended verbatim.
pub fn upstream_url(state: &AppState, target: &ProxyTarget, query: Option<&str>) -> String {
    let canonical = state.mapper.lookup(&target.org).unwrap_or_default();
    let mut url = state
        .upstream
        .url(&format!("/v2/{canonical}/{}/{}", target.repo, target.rest));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

pub async fn proxy(state: &AppState, request: Request<Body>, target: ProxyTarget) -> Response {
    let (parts, body) = request.into_parts();

    let canonical = state.mapper.lookup(&target.org);
    let url = upstream_url(state, &target, parts.uri.query());
    let list_request = parts.method != Method::HEAD && parts.uri.path().contains(TAGS_LIST);

    let mut headers = forward_request_headers(&parts.headers);
    if list_request {
        // The list body is decoded below, so ask for identity encoding.
        headers.remove(header::ACCEPT_ENCODING);
    }

    tracing::info!(
        method = %parts.method,
        url = %url,
        header = ?redact(&headers),
        "sending request"
    );

    let mut out = state
        .upstream
        .direct()
        .request(parts.method.clone(), &url)
        .headers(headers);
    if let Some(body) = outbound_body(body) {
        out = out.body(body);
    }
    let back = match out.send().await {
        Ok(back) => back,
        Err(e) => return error_response(ProxyError::Upstream(e), &url),
    };

    let status = back.status();
    tracing::info!(
        method = %parts.method,
        url = %parts.uri,
        status = %status,
        header = ?redact(back.headers()),
        "got response"
    );

    let mut headers = copy_response_headers(back.headers());
    set_redirected(&mut headers, &url);
    rewrite_www_authenticate_header(
        &mut headers,
        state.upstream.host(),
        &request_host(&parts.headers, &parts.uri),
    );
    rewrite_link_header(&mut headers, &state.mapper, Some(&target.org));

    if !(list_request && status.is_success()) {
        return build_response(status, headers, Body::from_stream(back.bytes_stream()));
    }

    // Tag list: the one buffered path. Materialize, rewrite, re-encode.
    let raw = match back.bytes().await {
        Ok(raw) => raw,
        Err(e) => return error_response(ProxyError::Upstream(e), &url),
    };
    let rewritten = match rewrite_list_body(&raw, &state.mapper, canonical) {
        Ok(rewritten) => rewritten,
        Err(e) => return error_response(e, &url),
    };

    // The new body is shorter than the one the upstream measured. Sent as a
    // stream so no length is re-derived for it either.
    headers.remove(header::CONTENT_LENGTH);
    let body = stream::iter([Ok::<_, Infallible>(rewritten)]);
    build_response(status, headers, Body::from_stream(body))
}
