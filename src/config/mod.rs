//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (PORT / GITHUB_REPO overrides)
//!     → validation.rs (semantic checks)
//!     → RedirectConfig (validated, immutable)
//!     → shared via Arc to the resolver and adapters
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RedirectConfig;
pub use schema::ReleaseConfig;
pub use schema::ReleaseLookup;
pub use schema::StorageConfig;
pub use schema::TimeoutConfig;
