//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the redirector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the latest release is looked up.
    pub release: ReleaseConfig,

    /// Object store that hosts the constructed download URLs.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// How the "latest" release is located in the releases API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLookup {
    /// `GET /repos/{repo}/releases/latest`
    #[default]
    Latest,
    /// `GET /repos/{repo}/releases`, first entry of the list.
    List,
}

/// Release API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Repository identifier in `owner/name` form.
    pub repo: String,

    /// Base URL of the releases API.
    pub api_base: Url,

    /// Endpoint used to find the latest release.
    pub lookup: ReleaseLookup,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent to the API (GitHub rejects requests without one).
    pub user_agent: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            repo: "offen/offen".to_string(),
            api_base: default_api_base(),
            lookup: ReleaseLookup::Latest,
            timeout_secs: 5,
            user_agent: concat!("release-redirect/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

fn default_api_base() -> Url {
    Url::parse("https://api.github.com").expect("static URL is valid")
}

/// Object store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Host serving `/deb/` and `/binaries/` artifacts.
    pub host: String,

    /// Package name used in artifact file names.
    pub package: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            host: "storage.offen.dev".to_string(),
            package: "offen".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 10,
            shutdown_grace_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
