//! HTTP → HTTPS redirect listener.
//!
//! # Design Decisions
//! - Host matching is case-insensitive and ignores the port
//! - Only configured hosts are redirected; anything else gets 404

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
struct RedirectState {
    hosts: Arc<Vec<String>>,
    https_port: u16,
}

/// `https://` URL for a request to an allowed host, or `None`.
pub fn https_target(host: Option<&str>, uri: &Uri, hosts: &[String], https_port: u16) -> Option<String> {
    let host = host?;
    let name = host.rsplit_once(':').map_or(host, |(name, _)| name);
    if !hosts.iter().any(|allowed| allowed.eq_ignore_ascii_case(name)) {
        return None;
    }
    let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
    if https_port == 443 {
        Some(format!("https://{name}{path}"))
    } else {
        Some(format!("https://{name}:{https_port}{path}"))
    }
}

async fn redirect_to_https(State(state): State<RedirectState>, request: Request<Body>) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok());
    match https_target(host, request.uri(), &state.hosts, state.https_port) {
        Some(url) => Redirect::permanent(&url).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown host").into_response(),
    }
}

pub fn https_redirect_router(hosts: Vec<String>, https_port: u16) -> Router {
    Router::new().fallback(redirect_to_https).with_state(RedirectState {
        hosts: Arc::new(hosts),
        https_port,
    })
}

/// Serve the redirect router on `listener` until `shutdown` fires.
pub async fn run_https_redirect(
    listener: TcpListener,
    hosts: Vec<String>,
    https_port: u16,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    tracing::info!(address = %listener.local_addr()?, "HTTPS redirect listener starting");
    axum::serve(listener, https_redirect_router(hosts, https_port))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Vec<String> {
        vec!["r.appscode.com".to_string()]
    }

    #[test]
    fn test_allowed_host_redirected() {
        let uri: Uri = "/v2/appscode/nginx/tags/list?n=1".parse().unwrap();
        assert_eq!(
            https_target(Some("R.AppsCode.com:80"), &uri, &hosts(), 443).as_deref(),
            Some("https://R.AppsCode.com/v2/appscode/nginx/tags/list?n=1")
        );
        assert_eq!(
            https_target(Some("r.appscode.com"), &"/".parse().unwrap(), &hosts(), 8443).as_deref(),
            Some("https://r.appscode.com:8443/")
        );
    }

    #[test]
    fn test_unknown_host_rejected() {
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(https_target(Some("evil.example"), &uri, &hosts(), 443), None);
        assert_eq!(https_target(None, &uri, &hosts(), 443), None);
    }
}
