//! Metrics collection and exposition.
//!
//! # Metrics
//! - `warehouse_fetch_attempts_total` (counter): attempts by endpoint, result
//! - `warehouse_fetch_outcomes_total` (counter): outcomes by endpoint, outcome
//! - `warehouse_fetch_duration_seconds` (histogram): wall time per fetch, retries included
//! - `warehouse_dashboard_refresh_total` (counter): refresher cycles by outcome
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one attempt. `result` is `ok` or an error kind.
pub fn record_attempt(endpoint: &str, result: &'static str) {
    ::metrics::counter!(
        "warehouse_fetch_attempts_total",
        "endpoint" => endpoint.to_string(),
        "result" => result
    )
    .increment(1);
}

/// Record the terminal outcome of a fetch.
pub fn record_outcome(endpoint: &str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "warehouse_fetch_outcomes_total",
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "warehouse_fetch_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one refresher cycle.
pub fn record_dashboard_refresh(outcome: &'static str) {
    ::metrics::counter!("warehouse_dashboard_refresh_total", "outcome" => outcome).increment(1);
}
