//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a [`ServiceConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("auth.secret must not be empty (set it in the config file or the SECRET variable)")]
    MissingSecret,

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("model.base_url is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("model.model must not be empty")]
    EmptyModel,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.log_level is not a known level: {0}")]
    InvalidLogLevel(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.auth.secret.trim().is_empty() {
        errors.push(ValidationError::MissingSecret);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    match Url::parse(&config.model.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.model.base_url.clone())),
    }

    if config.model.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModel);
    }
    if config.model.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("model.request_timeout_secs"));
    }
    if config.model.context_window == 0 {
        errors.push(ValidationError::Zero("model.context_window"));
    }
    if config.http.max_body_size == 0 {
        errors.push(ValidationError::Zero("http.max_body_size"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
