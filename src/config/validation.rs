//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check identifiers that end up inside URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RedirectConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RedirectConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RedirectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("`{}` is not a socket address", config.listener.bind_address),
        ));
    }

    if !is_owner_and_name(&config.release.repo) {
        errors.push(ValidationError::new(
            "release.repo",
            format!("`{}` must have the form owner/name", config.release.repo),
        ));
    }

    if config.release.api_base.cannot_be_a_base() {
        errors.push(ValidationError::new(
            "release.api_base",
            format!("`{}` cannot be used as a base URL", config.release.api_base),
        ));
    }

    if config.release.timeout_secs == 0 {
        errors.push(ValidationError::new("release.timeout_secs", "must be greater than 0"));
    }

    if config.release.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("release.user_agent", "must not be empty"));
    }

    for (field, value) in [
        ("storage.host", &config.storage.host),
        ("storage.package", &config.storage.package),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        } else if value.contains('/') {
            errors.push(ValidationError::new(field, format!("`{value}` must not contain `/`")));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.timeouts.shutdown_grace_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.shutdown_grace_secs",
            "must be greater than 0",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("`{}` is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_owner_and_name(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}
