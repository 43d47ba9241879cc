//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. All violations are
//! collected and reported together so a bad config is fixed in one pass.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic violation, pointing at the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration, returning every violation found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    for (field, value) in [
        ("upstream.gateway_url", &config.upstream.gateway_url),
        (
            "upstream.client_api_gateway_url",
            &config.upstream.client_api_gateway_url,
        ),
    ] {
        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError {
                field,
                message: format!("unsupported scheme: {}", url.scheme()),
            }),
            Err(error) => errors.push(ValidationError {
                field,
                message: format!("not a valid url: {error}"),
            }),
        }
    }

    if config.upstream.client_name.is_empty() {
        errors.push(ValidationError {
            field: "upstream.client_name",
            message: "must not be empty".to_string(),
        });
    }

    for (field, value) in [
        (
            "listener.request_timeout_secs",
            config.listener.request_timeout_secs,
        ),
        (
            "upstream.request_timeout_secs",
            config.upstream.request_timeout_secs,
        ),
        (
            "upstream.connect_timeout_secs",
            config.upstream.connect_timeout_secs,
        ),
    ] {
        if value == 0 {
            errors.push(ValidationError {
                field,
                message: "must be greater than zero".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
