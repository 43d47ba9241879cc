//! The capability trait and the anonymous scheme.

use std::collections::HashMap;

use axum::http::HeaderMap;

/// A credential scheme, reduced to the two operations the pipeline needs.
///
/// Implementations own whatever raw credential material their scheme
/// requires and expose none of it. `authenticate` is called exactly once per
/// request, against the headers of the single outbound gateway call.
pub trait AuthCapability: Send + Sync {
    /// Attach this scheme's credential headers to an outbound call.
    fn authenticate(&self, headers: &mut HeaderMap);

    /// Redacted identity tags for log correlation.
    ///
    /// Must never contain session tokens, lookup ids, or raw cookies. Safe
    /// to ship to any log sink.
    fn identity_tags(&self) -> HashMap<String, String>;
}

/// The no-credential scheme for public endpoints.
///
/// Construction cannot fail; the gateway itself decides what anonymous
/// callers may read.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuth;

impl AuthCapability for AnonymousAuth {
    fn authenticate(&self, _headers: &mut HeaderMap) {}

    fn identity_tags(&self) -> HashMap<String, String> {
        HashMap::from([("auth".to_string(), "unauthenticated".to_string())])
    }
}
