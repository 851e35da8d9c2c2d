//! Release lookup subsystem.
//!
//! # Data Flow
//! ```text
//! resolver (no path segments)
//!     → ReleaseSource::latest_release
//!     → github.rs (one GET against the releases API, bounded timeout)
//!     → types.rs (ReleaseInfo / Asset, suffix matching)
//! ```
//!
//! # Design Decisions
//! - One request per lookup, never cached and never retried
//! - Transport, status and decode failures stay distinct in `ReleaseError`
//! - The source is a trait so the resolver can be driven without a network

pub mod github;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

pub use github::GitHubReleases;
pub use types::{Asset, AssetKind, ReleaseInfo};

/// Error type for release lookups.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("error building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("error on HTTP request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected response status {0}")]
    Status(reqwest::StatusCode),
    #[error("error decoding response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("repository `{0}` is not of the form owner/name")]
    InvalidRepo(String),
    #[error("`{0}` cannot be used as an API base URL")]
    InvalidBase(Url),
}

/// Anything that can produce the latest release of the configured repository.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn latest_release(&self) -> Result<ReleaseInfo, ReleaseError>;
}
