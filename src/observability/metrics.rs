//! Metrics collection and exposition.
//!
//! # Metrics
//! - `registry_redirect_requests_total` (counter): by route, method, status
//! - `registry_redirect_request_duration_seconds` (histogram): by route

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "registry_redirect_requests_total";
pub const REQUEST_DURATION: &str = "registry_redirect_request_duration_seconds";

/// Install the Prometheus recorder with an HTTP scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(REQUESTS_TOTAL, "Total requests handled, by route and status");
    describe_histogram!(REQUEST_DURATION, "Time to produce response headers, by route");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(route: &'static str, method: &str, status: u16, start: Instant) {
    counter!(
        REQUESTS_TOTAL,
        "route" => route,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "route" => route).record(start.elapsed().as_secs_f64());
}
