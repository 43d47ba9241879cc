//! The legacy global recs endpoint.
//!
//! Serves the pre-gateway feed contract to desktop clients that predate the
//! versioned desktop API. Same upstream call and policies as the
//! recommendations endpoint; only the parameter spelling and the response
//! envelope differ.

pub mod inputs;
pub mod response;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::log_terminal_error;
use crate::auth::{require_consumer_key, AnonymousAuth, AuthCapability};
use crate::graph::queries::{NewTabRecommendationsData, NEW_TAB_RECOMMENDATIONS_QUERY};
use crate::graph::{classify, Gateway, UpstreamFailure};
use crate::http::headers::forward_headers;
use crate::http::server::AppState;

use inputs::GlobalRecsParams;

pub const ROUTE: &str = "/v3/firefox/global-recs";

pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<GlobalRecsParams>,
    headers: HeaderMap,
) -> Response {
    let query = format!("{params:?}");
    let auth = AnonymousAuth;
    let tags = auth.identity_tags();

    // validation terminates before any credential work or upstream call
    let variables = match inputs::handle_query_parameters(&params) {
        Ok(variables) => variables,
        Err(error) => {
            log_terminal_error(ROUTE, &query, &tags, &error, None);
            return error.into_response();
        }
    };

    let consumer_key = match require_consumer_key(&headers) {
        Ok(key) => key,
        Err(error) => {
            log_terminal_error(ROUTE, &query, &tags, &error, None);
            return error.into_response();
        }
    };

    let result = state
        .graph
        .request::<_, NewTabRecommendationsData>(
            Gateway::ClientApi,
            &auth,
            &consumer_key,
            NEW_TAB_RECOMMENDATIONS_QUERY,
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
        Err(failure) => {
            let error = crate::errors::internal_error(format!(
                "unexpected upstream failure: {failure}"
            ));
            log_terminal_error(ROUTE, &query, &tags, &error, Some(failure.to_string()));
            error.into_response()
        }
    }
}
