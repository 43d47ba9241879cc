//! Upstream failure shapes.

use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One error descriptor from the gateway's `errors` array.
///
/// The gateway's error vocabulary is not under this service's control;
/// everything beyond `message` is kept as loose JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphError {
    /// The `extensions.code` marker, when present.
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

/// A structured failure: the gateway produced a response, but it carries
/// errors (or a non-success status, or no data at all).
#[derive(Debug, Clone)]
pub struct GraphFailure {
    /// HTTP status of the gateway response.
    pub status: StatusCode,
    /// Gateway response headers, candidates for forwarding.
    pub headers: HeaderMap,
    /// Parsed error descriptors. May be empty for non-2xx responses whose
    /// body was not a GraphQL envelope.
    pub errors: Vec<GraphError>,
    /// The complete raw response body. Classification string-searches this,
    /// so it must not be a lossy reconstruction.
    pub body: Value,
    /// The request variables, rendered for operator diagnostics.
    pub variables: Value,
}

impl GraphFailure {
    /// Best-effort one-line rendering for operators: first error message,
    /// its extension code, the HTTP status, and the request variables.
    /// Never shown to end users; belongs only in `source.upstreamError`
    /// and logs.
    pub fn summary(&self) -> String {
        match self.errors.first() {
            Some(error) => {
                let code = error.code().unwrap_or("none");
                format!(
                    "{} (code: {}, status: {}, variables: {})",
                    error.message, code, self.status, self.variables
                )
            }
            None => format!(
                "upstream returned status {} with no structured errors (variables: {})",
                self.status, self.variables
            ),
        }
    }
}

impl std::fmt::Display for GraphFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Everything that can go wrong with the single outbound gateway call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamFailure {
    /// The gateway answered with structured errors. Classifiable.
    #[error("upstream gateway error: {0}")]
    Graph(GraphFailure),

    /// Transport-level failure: connect, timeout, TLS, mid-body abort.
    /// No structured content exists to redact, so this never enters
    /// classification and surfaces as a generic 500.
    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway's 2xx body did not match the expected envelope shape.
    /// Treated like a transport failure: generic 500, details in logs only.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}
