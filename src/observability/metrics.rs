//! Metrics collection and exposition.
//!
//! # Metrics
//! - `greeter_operations_total` (counter): operations by name and outcome
//! - `greeter_operation_duration_seconds` (histogram): latency per operation
//! - `greeter_stage` (gauge): 0=uninitialized, 1=session ready, 2=connected, 3=deployed
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
    {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome and latency of one session operation.
pub fn record_operation(operation: &'static str, success: bool, started: Instant) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("greeter_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("greeter_operation_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}

/// Record the current session stage.
pub fn record_stage(stage: u8) {
    metrics::gauge!("greeter_stage").set(stage as f64);
}
