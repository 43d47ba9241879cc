//! The JSON error envelope and its response type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Unknown route. Returned by the router fallback.
pub const NOT_FOUND_ERROR_ID: &str = "3d2c9a4e-8f61-4bd0-9c57-1e84a6f2b730";

/// Unclassified runtime failure. Nothing about the original error may reach
/// the client alongside this id.
pub const INTERNAL_ERROR_ID: &str = "a8f3d1c6-42e9-4b87-b5a0-9d6e7c2f1854";

/// A single error in the REST contract's `errors` array.
///
/// `id` is a stable opaque token identifying the call site that produced the
/// error, not the occurrence. `status` is the stringified HTTP status code,
/// duplicated into the body so clients never have to consult transport
/// metadata to interpret a stored response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiError {
    pub id: String,
    pub status: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Points at what caused an error: a request parameter, or an upstream error
/// rendering retained for diagnostic correlation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(rename = "upstreamError", skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<String>,
}

/// The failure body shape for all endpoints. Non-empty by construction at
/// every call site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub errors: Vec<ApiError>,
}

/// An error that knows how to answer the request that produced it.
///
/// The `message` is for operators: it is logged with request tags and never
/// serialized into the response. The `response` body is the client-facing
/// envelope.
#[derive(Debug, Clone)]
pub struct RestError {
    message: String,
    status: StatusCode,
    response: ApiErrorResponse,
}

impl RestError {
    pub fn new(
        message: impl Into<String>,
        status: StatusCode,
        response: ApiErrorResponse,
    ) -> Self {
        Self {
            message: message.into(),
            status,
            response,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Operator-facing message. Log it, never send it.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response(&self) -> &ApiErrorResponse {
        &self.response
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// 404 envelope for unknown routes.
pub fn not_found() -> RestError {
    RestError::new(
        "no route matched",
        StatusCode::NOT_FOUND,
        ApiErrorResponse {
            errors: vec![ApiError {
                id: NOT_FOUND_ERROR_ID.into(),
                status: "404".into(),
                title: "Not Found".into(),
                ..Default::default()
            }],
        },
    )
}

/// Fully generic 500. Used whenever a failure carries no structured content
/// that could be redacted, so nothing derived from it may appear here.
pub fn internal_error(message: impl Into<String>) -> RestError {
    RestError::new(
        message,
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiErrorResponse {
            errors: vec![ApiError {
                id: INTERNAL_ERROR_ID.into(),
                status: "500".into(),
                title: "Internal Server Error".into(),
                detail: Some(
                    "This service encountered an error it does not know how to handle".into(),
                ),
                ..Default::default()
            }],
        },
    )
}
