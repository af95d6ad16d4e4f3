//! Container registry vanity-host redirector.
//!
//! ```text
//!   client ──▶ /v2/{alias}/{repo}/...  ──▶ routing ──▶ proxy handler ──▶ upstream /v2/{org}/{repo}/...
//!          ◀── Www-Authenticate, Link,  ◀── rewrite ◀───────────────────── upstream response
//!              tag-list name rewritten
//! ```

use clap::Parser;

use registry_redirect::config::Cli;
use registry_redirect::lifecycle::startup;
use registry_redirect::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().load()?;

    logging::init_logging(&config.observability);

    tracing::info!("registry-redirect v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        upstream = %config.upstream.host,
        aliases = config.org_mapping.len(),
        ssl = config.ssl.enabled,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
