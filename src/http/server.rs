//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatching handler
//! - Wire up middleware (request ID, tracing, timeout, request observer)
//! - Bind server to listener (plain or TLS)
//! - Dispatch requests through the routing table to the four handlers

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    middleware,
    response::Response,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::error::ServerError;
use crate::http::client::UpstreamClient;
use crate::http::handlers;
use crate::http::request::{log_request, UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::rewrite::OrgMapper;
use crate::routing::{Route, Router as RouteTable};

/// How long in-flight requests get to finish after shutdown is signalled.
const GRACEFUL_SHUTDOWN: Duration = Duration::from_secs(10);

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub mapper: Arc<OrgMapper>,
    pub upstream: Arc<UpstreamClient>,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Result<Self, ServerError> {
        Ok(Self {
            mapper: Arc::new(OrgMapper::new(config.org_mapping.clone())),
            upstream: Arc::new(UpstreamClient::new(&config.upstream, &config.timeouts)?),
            routes: Arc::new(RouteTable::new()),
        })
    }
}

/// HTTP server for the registry redirector.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;

        tracing::info!(
            upstream = %state.upstream.host(),
            aliases = state.mapper.len(),
            "Proxy state initialized"
        );

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let x_request_id = HeaderName::from_static(X_REQUEST_ID);
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware::from_fn(log_request))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, UuidRequestId))
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` with the given certificate until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Resolve the route for a request and run its handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = state.routes.resolve(request.uri().path());
    let route_name = route.name();

    let response = match route {
        Route::ApiProbe => handlers::api_probe(&state, request).await,
        Route::Token => handlers::token(&state, request).await,
        Route::Proxy(target) => handlers::proxy(&state, request, target).await,
        Route::Redirect => handlers::redirect(&state, request),
    };

    metrics::record_request(route_name, &method, response.status().as_u16(), start);
    response
}
