//! `/token` exchange with scope alias rewrite.

use axum::{
    body::Body,
    http::Request,
    response::Response,
};

use crate::error::ProxyError;
use crate::http::request::outbound_body;
use crate::http::response::{build_response, error_response, set_redirected};
use crate::http::server::AppState;
use crate::rewrite::scope::rewrite_token_query;
use crate::security::headers::{copy_response_headers, forward_request_headers, redact};

/// Forward a token request upstream. Credentials and the rest of the query
/// pass through; only `scope` aliases are replaced.
pub async fn token(state: &AppState, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let query = rewrite_token_query(parts.uri.query().unwrap_or_default(), &state.mapper);
    let url = if query.is_empty() {
        state.upstream.url("/token")
    } else {
        state.upstream.url(&format!("/token?{query}"))
    };
    let headers = forward_request_headers(&parts.headers);

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
        url = %url,
        status = %status,
        header = ?redact(back.headers()),
        "got response"
    );

    let mut headers = copy_response_headers(back.headers());
    set_redirected(&mut headers, &url);

    build_response(status, headers, Body::from_stream(back.bytes_stream()))
}
