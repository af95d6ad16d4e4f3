//! Catch-all: send the client to the upstream host.

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Redirect, Response},
};

use crate::http::server::AppState;
use crate::rewrite::path::rewrite_first_segment;

/// Upstream URL for a path outside the registry API. A leading alias
/// segment becomes its canonical name; everything else is kept.
pub fn redirect_target(state: &AppState, path: &str, query: Option<&str>) -> String {
    let path = rewrite_first_segment(path, &state.mapper);
    let mut url = state.upstream.url(&path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// 307 to the upstream. Never proxies.
pub fn redirect(state: &AppState, request: Request<Body>) -> Response {
    let url = redirect_target(state, request.uri().path(), request.uri().query());
    tracing::info!(from = %request.uri(), to = %url, "Redirecting");
    Redirect::temporary(&url).into_response()
}
