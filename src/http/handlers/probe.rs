//! `/v2` capability check, forwarded to the upstream root.

use axum::{
    body::Body,
    http::Request,
    response::Response,
};

use crate::error::ProxyError;
use crate::http::request::request_host;
use crate::http::response::{build_response, error_response, rewrite_www_authenticate_header, set_redirected};
use crate::http::server::AppState;
use crate::security::headers::{copy_response_headers, redact};

/// Forward `{method} /v2/` upstream without alias rewriting or request
/// headers, and relay the answer with the auth realm pointed at us.
pub async fn api_probe(state: &AppState, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let url = state.upstream.url("/v2/");

    tracing::info!(method = %parts.method, url = %url, "sending request");

    let back = match state
        .upstream
        .following()
        .request(parts.method.clone(), &url)
        .send()
        .await
    {
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
    rewrite_www_authenticate_header(
        &mut headers,
        state.upstream.host(),
        &request_host(&parts.headers, &parts.uri),
    );

    build_response(status, headers, Body::from_stream(back.bytes_stream()))
}
