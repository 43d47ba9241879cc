//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - JSON format for production log pipelines, pretty format for development
//!
//! # Design Decisions
//! - RUST_LOG wins over the configured level so operators can raise
//!   verbosity per process without touching config files.
//! - Redaction happens at the call sites (identity tags, error envelopes);
//!   this module never sees raw credentials.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{LogFormat, ObservabilityConfig};

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
