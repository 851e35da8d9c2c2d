//! Startup orchestration.
//!
//! # Responsibilities
//! - Install logging and (optionally) the metrics exporter
//! - Bind the listener last, once everything else is ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A broken metrics exporter is logged, not fatal

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ObservabilityConfig};
use crate::observability::metrics;

/// Start the Prometheus exporter when enabled.
pub fn start_metrics(config: &ObservabilityConfig) {
    if !config.metrics_enabled {
        return;
    }
    match config.metrics_address.parse::<SocketAddr>() {
        Ok(addr) => {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics exporter");
            }
        }
        Err(_) => tracing::error!(
            metrics_address = %config.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}

/// Bind the TCP listener for the HTTP server.
pub async fn bind_listener(config: &ListenerConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}
