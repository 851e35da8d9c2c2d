//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_requests_total` (counter): resolved requests by outcome
//! - `redirect_request_duration_seconds` (histogram): resolve latency by outcome
//!
//! Outcome is one of `found`, `not_found` or `error`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "redirect_requests_total";
pub const REQUEST_DURATION: &str = "redirect_request_duration_seconds";

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(REQUESTS_TOTAL, Unit::Count, "Redirect requests by outcome");
    describe_histogram!(REQUEST_DURATION, Unit::Seconds, "Time spent resolving a redirect");

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one resolved request.
pub fn record_redirect(outcome: &'static str, start_time: Instant) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(REQUEST_DURATION, "outcome" => outcome).record(start_time.elapsed().as_secs_f64());
}
