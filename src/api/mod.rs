//! REST endpoints.
//!
//! Every endpoint runs the same pipeline: validate parameters, construct an
//! auth capability, make one gateway call, then normalize the payload or
//! classify the failure. The repetition across endpoint modules is
//! deliberate; each one owns its parameter rules, wire shapes, and error
//! ids end to end.

pub mod global_recs;
pub mod recent_saves;
pub mod recommendations;

use std::collections::HashMap;

use crate::errors::RestError;

/// Log a terminal error with its request context and redacted identity tags.
///
/// Every error that ends a request passes through here exactly once, client
/// and server classes alike. Raw credential material never reaches this
/// function; `tags` come from a capability's `identity_tags`.
pub(crate) fn log_terminal_error(
    route: &'static str,
    query: &str,
    tags: &HashMap<String, String>,
    error: &RestError,
    original: Option<String>,
) {
    if error.status().is_server_error() {
        tracing::error!(
            method = "GET",
            route,
            query,
            tags = ?tags,
            original = ?original,
            "{}",
            error.message()
        );
    } else {
        tracing::warn!(
            method = "GET",
            route,
            query,
            tags = ?tags,
            original = ?original,
            "{}",
            error.message()
        );
    }
}
