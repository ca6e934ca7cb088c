//! Metrics collection and exposition.
//!
//! # Metrics
//! - `intake_requests_total` (counter): responses by method, status
//! - `intake_request_duration_seconds` (histogram): latency distribution
//! - `intake_uploads_total` (counter): uploads by outcome
//!   (`accepted`, `rejected`, `failed`)
//! - `intake_upload_bytes` (histogram): accepted file sizes

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    counter!("intake_requests_total", &labels).increment(1);
    histogram!("intake_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

pub fn record_upload(outcome: &'static str, bytes: Option<u64>) {
    counter!("intake_uploads_total", "outcome" => outcome).increment(1);
    if let Some(bytes) = bytes {
        histogram!("intake_upload_bytes").record(bytes as f64);
    }
}
