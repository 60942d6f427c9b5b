//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tagger_requests_total` (counter): requests by method, route, status
//! - `tagger_request_duration_seconds` (histogram): latency by route
//! - `tagger_model_calls_total` (counter): model calls by outcome
//! - `tagger_model_call_duration_seconds` (histogram): model latency
//! - `tagger_auth_failures_total` (counter): rejected tokens by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, route: &str, status: u16, started: Instant) {
    counter!(
        "tagger_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("tagger_request_duration_seconds", "route" => route.to_string())
        .record(started.elapsed().as_secs_f64());
}

pub fn record_model_call(outcome: &'static str, started: Instant) {
    counter!("tagger_model_calls_total", "outcome" => outcome).increment(1);
    histogram!("tagger_model_call_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_auth_failure(kind: &'static str) {
    counter!("tagger_auth_failures_total", "kind" => kind).increment(1);
}
