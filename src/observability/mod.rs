//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver and adapters produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (redirect counters and latency histograms)
//!
//! Consumers:
//!     → stdout / stderr log collection
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the request span
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
