//! The gateway HTTP client.
//!
//! # Responsibilities
//! - Issue exactly one authenticated POST per inbound request
//! - Split the outcome into typed success, structured failure, and generic
//!   failure
//! - Capture gateway response headers for forwarding
//!
//! # Design Decisions
//! - Bounded connect and total timeouts. The historical service had none and
//!   slow gateway responses pinned inbound requests open indefinitely.
//! - Variables are serialized once up front and travel with failures, so the
//!   operator rendering of an error can always show what was asked.
//! - The raw body `Value` is kept on structured failures; classification
//!   string-searches it and any reconstruction would be lossy.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::auth::AuthCapability;
use crate::config::schema::UpstreamConfig;
use crate::graph::error::{GraphError, GraphFailure, UpstreamFailure};
use crate::http::headers;

/// Client identification header sent on every gateway call.
pub const CLIENT_NAME_HEADER: &str = "apollographql-client-name";

/// Which gateway a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gateway {
    /// The session-authenticated web proxy gateway. Takes the consumer key
    /// as a URL parameter.
    Web,
    /// The public client API gateway.
    ClientApi,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("invalid gateway url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// A successful gateway response: the typed payload plus the response
/// headers, which the caller filters and forwards.
pub struct GraphSuccess<D> {
    pub data: D,
    pub headers: HeaderMap,
}

/// The standard GraphQL response envelope, parsed loosely so the error path
/// never depends on the success payload's shape.
#[derive(Debug, Deserialize)]
struct GraphEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphError>,
}

#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    gateway_url: Url,
    client_api_gateway_url: Url,
    client_name: String,
}

impl GraphClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            gateway_url: Url::parse(&config.gateway_url)?,
            client_api_gateway_url: Url::parse(&config.client_api_gateway_url)?,
            client_name: config.client_name.clone(),
        })
    }

    /// Perform one gateway query.
    ///
    /// The request inherits the client's timeouts, the fixed identification
    /// header, and whatever credentials `auth` attaches. Dropping the
    /// returned future (client disconnect) cancels the in-flight call.
    pub async fn request<V, D>(
        &self,
        gateway: Gateway,
        auth: &dyn AuthCapability,
        consumer_key: &str,
        query: &'static str,
        variables: &V,
    ) -> Result<GraphSuccess<D>, UpstreamFailure>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let url = self.request_url(gateway, consumer_key);

        let mut outbound = HeaderMap::new();
        if let Ok(name) = HeaderValue::from_str(&self.client_name) {
            outbound.insert(CLIENT_NAME_HEADER, name);
        }
        auth.authenticate(&mut outbound);
        // no capability may attach a hop-by-hop or programmatic header
        headers::strip_denied(&mut outbound);

        let rendered_variables = serde_json::to_value(variables).unwrap_or(Value::Null);

        let response = self
            .http
            .post(url)
            .headers(outbound)
            .json(&json!({"query": query, "variables": rendered_variables}))
            .send()
            .await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            // a non-JSON body on a success status has no structured content
            // to classify; surface it as a decode failure
            Err(error) if status.is_success() => return Err(UpstreamFailure::Decode(error)),
            // non-JSON error bodies are retained as text for diagnostics
            Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };

        if !status.is_success() {
            return Err(UpstreamFailure::Graph(GraphFailure {
                status,
                headers: response_headers,
                errors: extract_errors(&body),
                body,
                variables: rendered_variables,
            }));
        }

        let envelope: GraphEnvelope = serde_json::from_value(body.clone())?;

        if !envelope.errors.is_empty() {
            return Err(UpstreamFailure::Graph(GraphFailure {
                status,
                headers: response_headers,
                errors: envelope.errors,
                body,
                variables: rendered_variables,
            }));
        }

        match envelope.data {
            Some(data) if !data.is_null() => Ok(GraphSuccess {
                data: serde_json::from_value(data)?,
                headers: response_headers,
            }),
            // a 2xx with neither data nor errors is still a gateway
            // contract violation worth classifying
            _ => {
                tracing::warn!(status = %status, "gateway returned neither data nor errors");
                Err(UpstreamFailure::Graph(GraphFailure {
                    status,
                    headers: response_headers,
                    errors: Vec::new(),
                    body,
                    variables: rendered_variables,
                }))
            }
        }
    }

    fn request_url(&self, gateway: Gateway, consumer_key: &str) -> Url {
        match gateway {
            Gateway::Web => {
                let mut url = self.gateway_url.clone();
                url.query_pairs_mut()
                    .append_pair("consumer_key", consumer_key)
                    .append_pair("enable_cors", "1");
                url
            }
            Gateway::ClientApi => self.client_api_gateway_url.clone(),
        }
    }
}

/// Pull whatever error descriptors a non-2xx body happens to carry.
///
/// A present-but-unparseable error list is logged rather than silently
/// dropped; the gateway's error shapes drift and we want to hear about it.
fn extract_errors(body: &Value) -> Vec<GraphError> {
    match body.get("errors") {
        Some(errors) => serde_json::from_value(errors.clone()).unwrap_or_else(|error| {
            tracing::warn!(%error, "gateway error list did not match the expected shape");
            Vec::new()
        }),
        None => Vec::new(),
    }
}
