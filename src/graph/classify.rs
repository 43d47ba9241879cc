//! Error classification chain.
//!
//! # Responsibilities
//! - Map arbitrary structured gateway failures onto the fixed REST error set
//! - Let routes prepend their own matchers without reimplementing defaults
//!
//! # Design Decisions
//! - First non-`None` handler wins. Route handlers run before the default
//!   suffix, so order in the route's list is load-bearing.
//! - The chain is total: the final default handler accepts anything, and a
//!   defensive guard backs even that, so classification never panics and
//!   never returns nothing.

use axum::http::StatusCode;

use crate::errors::{ApiError, ApiErrorResponse, ErrorSource, RestError};
use crate::graph::error::GraphFailure;

/// The gateway rejected the session behind this request.
pub const UPSTREAM_UNAUTHENTICATED_ERROR_ID: &str = "f49a7c12-d8e5-4b6f-a301-9c2d5e8f7a16";

/// Structured gateway failure nothing else claimed.
pub const UNHANDLED_UPSTREAM_ERROR_ID: &str = "1e6d3b9f-7a24-4c58-b0d2-84f5a6c9e371";

/// A route-specific matcher. Return `None` to pass the failure to the next
/// handler in the chain.
pub type ClientErrorHandler = fn(&GraphFailure) -> Option<RestError>;

/// Marker the gateway currently uses for session failures, as it appears in
/// a minified JSON rendering.
const UNAUTHENTICATED_MARKER: &str = "\"code\":\"UNAUTHENTICATED\"";

/// Matches authentication failures reported by the gateway.
///
/// The gateway has historically moved this marker between nesting depths
/// without notice (top-level error extensions one release, buried inside an
/// `extensions.response.body` error list the next), so this searches the
/// serialized document instead of assuming a shape. Known-fragile heuristic,
/// not a stable contract; it is isolated here so a gateway shape change
/// touches exactly one function.
pub fn unauthenticated_handler(failure: &GraphFailure) -> Option<RestError> {
    if !failure.body.to_string().contains(UNAUTHENTICATED_MARKER) {
        return None;
    }

    let upstream_message = failure
        .errors
        .first()
        .map(|error| error.message.clone())
        .unwrap_or_else(|| failure.summary());

    Some(RestError::new(
        "encountered UNAUTHENTICATED error upstream",
        StatusCode::UNAUTHORIZED,
        ApiErrorResponse {
            errors: vec![ApiError {
                id: UPSTREAM_UNAUTHENTICATED_ERROR_ID.into(),
                status: "401".into(),
                title: "Unauthorized".into(),
                source: Some(ErrorSource {
                    upstream_error: Some(upstream_message),
                    ..Default::default()
                }),
                ..Default::default()
            }],
        },
    ))
}

/// Total catch-all: any structured failure that reaches it becomes a 502.
///
/// The redacted rendering of the original failure is retained only in
/// `source.upstreamError` for correlation; `title` stays generic. Always the
/// last handler in the chain, and never returns `None`.
pub fn unhandled_handler(failure: &GraphFailure) -> Option<RestError> {
    Some(bad_gateway(failure))
}

fn bad_gateway(failure: &GraphFailure) -> RestError {
    RestError::new(
        "encountered unknown error upstream",
        StatusCode::BAD_GATEWAY,
        ApiErrorResponse {
            errors: vec![ApiError {
                id: UNHANDLED_UPSTREAM_ERROR_ID.into(),
                status: "502".into(),
                title: "Bad Gateway".into(),
                source: Some(ErrorSource {
                    upstream_error: Some(failure.summary()),
                    ..Default::default()
                }),
                ..Default::default()
            }],
        },
    )
}

/// Handlers appended after every route-specific list, applied on all routes.
const DEFAULT_HANDLERS: &[ClientErrorHandler] = &[unauthenticated_handler, unhandled_handler];

/// Run `route_handlers` in the order given, then the default suffix, and
/// return the first match.
///
/// The guard at the bottom cannot fire while [`unhandled_handler`] stays
/// total; it exists so an editing mistake in the defaults degrades to a
/// generic 502 instead of a panic.
pub fn classify(failure: &GraphFailure, route_handlers: &[ClientErrorHandler]) -> RestError {
    route_handlers
        .iter()
        .chain(DEFAULT_HANDLERS)
        .find_map(|handler| handler(failure))
        .unwrap_or_else(|| {
            tracing::error!("no error classifier returned a response; the default chain is broken");
            bad_gateway(failure)
        })
}
