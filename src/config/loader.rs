//! Configuration loading from disk and environment.

use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment override for the authenticated gateway URL.
pub const GATEWAY_URL_ENV: &str = "GRAPH_GATEWAY_URL";
/// Environment override for the public client API gateway URL.
pub const CLIENT_API_GATEWAY_URL_ENV: &str = "CLIENT_API_GRAPH_GATEWAY_URL";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("validation failed: {}", format_violations(.0))]
    Validation(Vec<ValidationError>),
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration, apply environment overrides, and validate.
///
/// With no path the defaults are used; deployments that only need to point
/// at a different gateway can get by on the env vars alone.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var(GATEWAY_URL_ENV) {
        config.upstream.gateway_url = url;
    }
    if let Ok(url) = std::env::var(CLIENT_API_GATEWAY_URL_ENV) {
        config.upstream.client_api_gateway_url = url;
    }
}
