//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level
//! - The writer is chosen by the caller; the serverless binary keeps stdout
//!   for its response and logs to stderr

use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(level: &str) -> String {
    format!("release_redirect={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init<W>(level: &str, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_crate_and_middleware() {
        let directives = default_directives("debug");
        assert_eq!(directives, "release_redirect=debug,tower_http=debug");
        assert!(directives.parse::<EnvFilter>().is_ok());
    }
}
