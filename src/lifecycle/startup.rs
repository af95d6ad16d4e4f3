//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize metrics (logging is installed by the binary)
//! - Build shared state once
//! - Bind listeners and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::error::ServerError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{redirect, tls};
use crate::observability::metrics;

/// Run the proxy with a validated configuration until a shutdown signal.
pub async fn run(config: ProxyConfig) -> Result<(), ServerError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            signals::wait_for_signal().await;
            shutdown.trigger();
        });
    }

    let ssl = config.ssl.clone();
    let bind_address = config.listener.bind_address.clone();
    let plain_address = config.listener.socket_address();
    let server = HttpServer::new(config)?;

    if !ssl.enabled {
        let listener = TcpListener::bind(&plain_address).await?;
        tracing::info!(address = %listener.local_addr()?, "Listening for connections");
        server.run(listener, shutdown.subscribe()).await?;
        return Ok(());
    }

    tracing::info!(
        hosts = ?ssl.hosts,
        cert_dir = %ssl.cert_dir,
        email = ?ssl.email,
        "SSL enabled"
    );
    let tls_config = tls::load_tls_config(Path::new(&ssl.cert_dir))
        .await
        .map_err(ServerError::Tls)?;
    let https_addr: SocketAddr = format!("{}:{}", bind_address, ssl.https_port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let http_listener = TcpListener::bind(format!("{}:{}", bind_address, ssl.http_port)).await?;

    let redirect_task = tokio::spawn(redirect::run_https_redirect(
        http_listener,
        ssl.hosts.clone(),
        ssl.https_port,
        shutdown.subscribe(),
    ));

    server.run_tls(https_addr, tls_config, shutdown.subscribe()).await?;

    shutdown.trigger();
    match redirect_task.await {
        Ok(result) => result?,
        Err(e) => tracing::error!(error = %e, "HTTPS redirect listener task failed"),
    }
    Ok(())
}
