//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) ──▶ loader ──▶ env overrides ──▶ validation ──▶ AppConfig
//! ```
//!
//! Configuration is read once at startup and shared read-only for the life
//! of the process; the service is stateless and restarts cheaply.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, ListenerConfig, LogFormat, ObservabilityConfig, UpstreamConfig};
