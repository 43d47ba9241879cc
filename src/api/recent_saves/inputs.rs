//! Input validation and transformation for recent saves.
//!
//! Transport-layer query parameters arrive as strings. Defaults are applied
//! before coercion, coercion failures fail validation rather than passing a
//! silent zero downstream, and only validated values reach the gateway
//! client.

use axum::http::StatusCode;
use serde::Deserialize;

use crate::errors::{ApiError, ApiErrorResponse, ErrorSource, RestError};
use crate::graph::queries::{PaginationInput, RecentSavesVariables};

/// The count parameter failed bounds or type checks.
pub const COUNT_ERROR_ID: &str = "8a4d2f7c-16e9-4b03-9d85-c7f2a0e64b19";

const DEFAULT_COUNT: &str = "10";
const MAX_COUNT: i64 = 20;

/// Raw query parameters as provided by the transport.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentSavesParams {
    pub count: Option<String>,
}

/// Apply defaults, coerce, validate, and transform into gateway variables.
///
/// Values reaching the returned variables have passed bounds validation;
/// the gateway client never re-validates.
pub fn handle_query_parameters(
    params: &RecentSavesParams,
) -> Result<RecentSavesVariables, RestError> {
    let raw = params.count.as_deref().unwrap_or(DEFAULT_COUNT);

    // a non-numeric string is invalid input, not zero
    let count = raw
        .parse::<i64>()
        .ok()
        .filter(|count| (1..=MAX_COUNT).contains(count));

    match count {
        Some(count) => Ok(RecentSavesVariables {
            pagination: PaginationInput { first: count },
        }),
        None => Err(RestError::new(
            "input validation failure",
            StatusCode::BAD_REQUEST,
            ApiErrorResponse {
                errors: vec![ApiError {
                    id: COUNT_ERROR_ID.into(),
                    status: "400".into(),
                    title: "Bad Request".into(),
                    detail: Some(format!(
                        "The count query parameter must be >0 and <={MAX_COUNT}"
                    )),
                    source: Some(ErrorSource {
                        parameters: Some("count".into()),
                        ..Default::default()
                    }),
                }],
            },
        )),
    }
}
