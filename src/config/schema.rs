//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every section defaults to production-reasonable values so a missing file
//! still yields a runnable service.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, inbound timeout).
    pub listener: ListenerConfig,

    /// Upstream gateway endpoints and outbound call limits.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4028").
    pub bind_address: String,

    /// Total inbound request timeout in seconds. Kept above the outbound
    /// request timeout so upstream timeouts classify as upstream failures
    /// rather than inbound aborts.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4028".to_string(),
            request_timeout_secs: 35,
        }
    }
}

/// Upstream gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// The session-authenticated web proxy gateway.
    pub gateway_url: String,

    /// The public client API gateway.
    pub client_api_gateway_url: String,

    /// Value of the client identification header on every outbound call.
    pub client_name: String,

    /// Total outbound request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Outbound connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            gateway_url: "https://getpocket.com/graphql".to_string(),
            client_api_gateway_url: "https://client-api.getpocket.com".to_string(),
            client_name: "bff-proxy".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when RUST_LOG is not set
    /// (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// JSON for production log pipelines, pretty for development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
