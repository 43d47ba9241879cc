//! Input validation and transformation for recommendations.
//!
//! Unlike recent saves, this endpoint has multiple validated parameters, so
//! every violated rule is collected and reported in a single failure
//! response rather than stopping at the first.

use axum::http::StatusCode;
use serde::Deserialize;

use crate::errors::{ApiError, ApiErrorResponse, ErrorSource, RestError};
use crate::graph::queries::RecommendationsVariables;

/// One or more query parameters failed validation.
pub const VALIDATION_ERROR_ID: &str = "47c8e2a9-5b1d-4f36-8a70-d3e9b6c1f582";

/// All locales the recommendations corpus can serve.
pub const VALID_LOCALES: &[&str] = &[
    "fr", "fr-FR", "es", "es-ES", "it", "it-IT", "en", "en-CA", "en-GB", "en-US", "de", "de-DE",
    "de-AT", "de-CH",
];

const DEFAULT_COUNT: i64 = 30;
const MAX_COUNT: i64 = 30;

/// Raw query parameters as provided by the transport.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsParams {
    pub count: Option<String>,
    pub locale: Option<String>,
    pub region: Option<String>,
}

/// A failed rule, with everything needed to build its error entry.
pub(crate) struct Violation {
    pub parameter: &'static str,
    pub detail: String,
}

/// Coerce and bound-check the count parameter.
pub(crate) fn validate_count(raw: Option<&str>, default: i64) -> Result<i64, Violation> {
    let parsed = match raw {
        // non-numeric input is invalid, never silently zero
        Some(raw) => raw.parse::<i64>().ok(),
        None => Some(default),
    };

    parsed
        .filter(|count| *count > 0 && *count <= MAX_COUNT)
        .ok_or_else(|| Violation {
            parameter: "count",
            detail: format!("The count query parameter must be >0 and <={MAX_COUNT}"),
        })
}

/// Ensure the locale is present and a member of the allow-set,
/// case-insensitively. The provided casing is passed through on success.
pub(crate) fn validate_locale(locale: Option<&str>) -> Result<String, Violation> {
    locale
        .filter(|locale| {
            VALID_LOCALES
                .iter()
                .any(|valid| valid.eq_ignore_ascii_case(locale))
        })
        .map(str::to_string)
        .ok_or_else(|| Violation {
            parameter: "locale",
            detail: format!("Locale must be provided. Valid locales include: {VALID_LOCALES:?}"),
        })
}

/// Shared validation core. The legacy endpoint reuses this with its own
/// default count and parameter spelling.
pub(crate) fn build_variables(
    count: Option<&str>,
    locale: Option<&str>,
    region: Option<String>,
    default_count: i64,
) -> Result<RecommendationsVariables, RestError> {
    let count = validate_count(count, default_count);
    let locale = validate_locale(locale);

    match (count, locale) {
        (Ok(count), Ok(locale)) => Ok(RecommendationsVariables {
            locale,
            region,
            count,
        }),
        (count, locale) => {
            let violations: Vec<Violation> =
                [count.err(), locale.err()].into_iter().flatten().collect();
            Err(validation_error(violations))
        }
    }
}

fn validation_error(violations: Vec<Violation>) -> RestError {
    RestError::new(
        "input validation failure",
        StatusCode::BAD_REQUEST,
        ApiErrorResponse {
            errors: violations
                .into_iter()
                .map(|violation| ApiError {
                    id: VALIDATION_ERROR_ID.into(),
                    status: "400".into(),
                    title: "Bad Request".into(),
                    detail: Some(violation.detail),
                    source: Some(ErrorSource {
                        parameters: Some(violation.parameter.into()),
                        ..Default::default()
                    }),
                })
                .collect(),
        },
    )
}

/// Apply defaults, coerce, validate, and transform into gateway variables.
pub fn handle_query_parameters(
    params: &RecommendationsParams,
) -> Result<RecommendationsVariables, RestError> {
    build_variables(
        params.count.as_deref(),
        params.locale.as_deref(),
        params.region.clone(),
        DEFAULT_COUNT,
    )
}
