//! Release download redirector.
//!
//! Maps short request paths to download URLs of release artifacts, either by
//! constructing an object-store URL or by asking the GitHub releases API for
//! the latest tarball.
//!
//! ```text
//!   GET /, /{segment1}, /{segment1}/{segment2}        API gateway event
//!                 │                                          │
//!                 ▼                                          ▼
//!          ┌─────────────┐                           ┌──────────────┐
//!          │ http server │                           │  serverless  │
//!          └──────┬──────┘                           └──────┬───────┘
//!                 └──────────────┐        ┌─────────────────┘
//!                                ▼        ▼
//!                             ┌──────────────┐      ┌──────────────────┐
//!                             │   resolver   │─────▶│ release (GitHub) │
//!                             └──────────────┘      └──────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod release;
pub mod resolver;
pub mod serverless;

pub use config::RedirectConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolver::{RedirectRequest, ResolveError, Resolver};
