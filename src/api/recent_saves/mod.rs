//! The recent saves endpoint.
//!
//! Requires client identification and a complete web session; the query is
//! meaningless without one, so capability construction hard-fails into a
//! 401 before any gateway call.

pub mod inputs;
pub mod response;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::log_terminal_error;
use crate::auth::{require_consumer_key, AnonymousAuth, AuthCapability, WebSessionAuth};
use crate::errors::{ApiError, ApiErrorResponse, RestError};
use crate::graph::queries::{RecentSavesData, RECENT_SAVES_QUERY};
use crate::graph::{classify, Gateway, UpstreamFailure};
use crate::http::headers::forward_headers;
use crate::http::server::AppState;

use inputs::RecentSavesParams;

pub const ROUTE: &str = "/desktop/v1/recent-saves";

/// Request rejected because the web session credentials are incomplete.
pub const SESSION_ERROR_ID: &str = "d97b3e51-2c48-4f0a-b6d9-8e1a5c7f2043";

fn session_error() -> RestError {
    RestError::new(
        "request rejected, could not initialize auth",
        StatusCode::UNAUTHORIZED,
        ApiErrorResponse {
            errors: vec![ApiError {
                id: SESSION_ERROR_ID.into(),
                status: "401".into(),
                title: "Unauthorized".into(),
                ..Default::default()
            }],
        },
    )
}

pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<RecentSavesParams>,
    headers: HeaderMap,
) -> Response {
    let query = format!("{params:?}");

    // validation terminates before any credential work or upstream call
    let variables = match inputs::handle_query_parameters(&params) {
        Ok(variables) => variables,
        Err(error) => {
            log_terminal_error(ROUTE, &query, &AnonymousAuth.identity_tags(), &error, None);
            return error.into_response();
        }
    };

    let consumer_key = match require_consumer_key(&headers) {
        Ok(key) => key,
        Err(error) => {
            log_terminal_error(ROUTE, &query, &AnonymousAuth.identity_tags(), &error, None);
            return error.into_response();
        }
    };

    let Some(auth) = WebSessionAuth::from_headers(&headers) else {
        let error = session_error();
        log_terminal_error(ROUTE, &query, &AnonymousAuth.identity_tags(), &error, None);
        return error.into_response();
    };
    let tags = auth.identity_tags();

    let result = state
        .graph
        .request::<_, RecentSavesData>(
            Gateway::Web,
            &auth,
            &consumer_key,
            RECENT_SAVES_QUERY,
            &variables,
        )
        .await;

    match result {
        Ok(success) => {
            let mut response = Json(response::response_transformer(success.data)).into_response();
            forward_headers(&success.headers, response.headers_mut());
            response
        }
        Err(UpstreamFailure::Graph(failure)) => {
            let error = classify(&failure, &[]);
            log_terminal_error(ROUTE, &query, &tags, &error, Some(failure.summary()));
            let mut response = error.into_response();
            forward_headers(&failure.headers, response.headers_mut());
            response
        }
        // no structured content to redact: fully generic 500
        Err(failure) => {
            let error = crate::errors::internal_error(format!(
                "unexpected upstream failure: {failure}"
            ));
            log_terminal_error(ROUTE, &query, &tags, &error, Some(failure.to_string()));
            error.into_response()
        }
    }
}
