//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routing of 0–2 path segments)
//!     → request.rs (request ID)
//!     → resolver
//!     → response.rs (302 / 404 / 500)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::RedirectReply;
pub use server::{AppState, HttpServer};
