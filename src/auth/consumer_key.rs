//! Consumer key extraction.
//!
//! The consumer key identifies the calling client application. It is not
//! sensitive and travels separately from auth because unauthenticated
//! requests carry it too.

use axum::http::{HeaderMap, StatusCode};

use crate::errors::{ApiError, ApiErrorResponse, RestError};

/// Request rejected because the consumer key header is absent.
pub const CONSUMER_KEY_ERROR_ID: &str = "6b1f42d8-0c7a-4e95-8d23-f5a9c1e67b04";

pub const CONSUMER_KEY_HEADER: &str = "consumer_key";

/// Read the consumer key header, or produce the 401 that rejects the
/// request before any upstream call is made.
pub fn require_consumer_key(headers: &HeaderMap) -> Result<String, RestError> {
    headers
        .get(CONSUMER_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            RestError::new(
                "request rejected, consumer_key is required",
                StatusCode::UNAUTHORIZED,
                ApiErrorResponse {
                    errors: vec![ApiError {
                        id: CONSUMER_KEY_ERROR_ID.into(),
                        status: "401".into(),
                        title: "Unauthorized".into(),
                        ..Default::default()
                    }],
                },
            )
        })
}
