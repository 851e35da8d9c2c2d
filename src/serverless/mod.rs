//! Single-invocation adapter.
//!
//! # Data Flow
//! ```text
//! API gateway event (JSON)
//!     → event.rs (pathParameters → RedirectRequest)
//!     → resolver
//!     → http::response::RedirectReply
//!     → event.rs (GatewayResponse JSON: statusCode, headers, body)
//! ```
//!
//! # Design Decisions
//! - Same resolver and outcome mapping as the HTTP server
//! - `channel` is accepted as an alias for `segment1`

pub mod event;

use std::time::Instant;

use thiserror::Error;

pub use event::{GatewayEvent, GatewayResponse};

use crate::http::response::RedirectReply;
use crate::observability::metrics;
use crate::resolver::Resolver;

/// Error type for a single invocation.
#[derive(Debug, Error)]
pub enum ServerlessError {
    #[error("error reading event: {0}")]
    Io(#[from] std::io::Error),
    #[error("error decoding event: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("error encoding response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Resolve one gateway event.
pub async fn handle_event(resolver: &Resolver, event: &GatewayEvent) -> GatewayResponse {
    let start_time = Instant::now();
    let request = event.redirect_request();
    let reply = RedirectReply::from(resolver.resolve(&request).await);
    tracing::debug!(
        segment1 = request.segment1.as_deref(),
        segment2 = request.segment2.as_deref(),
        status = reply.status.as_u16(),
        "Resolved invocation"
    );
    metrics::record_redirect(reply.outcome(), start_time);
    GatewayResponse::from(reply)
}

/// Decode an event from JSON, resolve it and encode the response.
pub async fn handle_json(resolver: &Resolver, input: &[u8]) -> Result<String, ServerlessError> {
    let event: GatewayEvent = serde_json::from_slice(input).map_err(ServerlessError::Decode)?;
    let response = handle_event(resolver, &event).await;
    serde_json::to_string(&response).map_err(ServerlessError::Encode)
}
