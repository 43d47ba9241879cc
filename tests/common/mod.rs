//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use bff_proxy::config::AppConfig;
use bff_proxy::HttpServer;

/// Everything the mock gateway saw for one request.
pub struct GatewayRequest {
    pub body: Value,
    pub headers: HeaderMap,
    pub query: Option<String>,
}

type Responder = dyn Fn(GatewayRequest) -> (StatusCode, HeaderMap, Value) + Send + Sync;

/// Start a programmable mock gateway on an ephemeral loopback port.
///
/// The responder sees the full request (body, headers, URL query) and
/// returns the status, headers, and JSON body to answer with.
pub async fn start_mock_gateway<F>(responder: F) -> SocketAddr
where
    F: Fn(GatewayRequest) -> (StatusCode, HeaderMap, Value) + Send + Sync + 'static,
{
    let responder: Arc<Responder> = Arc::new(responder);

    async fn handle(
        State(responder): State<Arc<Responder>>,
        RawQuery(query): RawQuery,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        let (status, response_headers, response_body) = responder(GatewayRequest {
            body,
            headers,
            query,
        });
        (status, response_headers, Json(response_body))
    }

    let app = Router::new()
        .route("/", post(handle))
        .route("/{*path}", post(handle))
        .with_state(responder);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A mock gateway that always answers 200 with the given body.
pub async fn start_fixed_gateway(body: Value) -> SocketAddr {
    start_mock_gateway(move |_request| (StatusCode::OK, HeaderMap::new(), body.clone())).await
}

/// Start the proxy on an ephemeral loopback port, pointed at `gateway`.
pub async fn start_proxy(gateway: SocketAddr) -> SocketAddr {
    let mut config = AppConfig::default();
    config.upstream.gateway_url = format!("http://{gateway}/graphql");
    config.upstream.client_api_gateway_url = format!("http://{gateway}");
    config.upstream.request_timeout_secs = 2;
    config.upstream.connect_timeout_secs = 2;
    start_proxy_with_config(config).await
}

pub async fn start_proxy_with_config(config: AppConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Cookie header carrying a complete web session.
pub const SESSION_COOKIES: &str = "a95b4b6=user123; d4a79ec=session456; 159e76e=lookup789";

/// A client that stays off any ambient proxy configuration.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A well-formed recent-saves payload with the given saved items.
pub fn recent_saves_payload(items: Vec<Value>) -> Value {
    let edges: Vec<Value> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::json!({
                "cursor": format!("cursor-{i}"),
                "node": {
                    "id": format!("save-{i}"),
                    "status": "UNREAD",
                    "url": format!("https://example.com/{i}"),
                    "item": item
                }
            })
        })
        .collect();

    serde_json::json!({
        "data": {"user": {"savedItems": {"edges": edges}}}
    })
}

/// A well-formed recommendations payload.
pub fn recommendations_payload(utm_source: Value, count: usize) -> Value {
    let recommendations: Vec<Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("rec-{i}"),
                "tileId": 1000 + i,
                "corpusItem": {
                    "url": format!("https://example.com/story-{i}"),
                    "title": format!("Story {i}"),
                    "excerpt": "Excerpt",
                    "publisher": "The Example",
                    "imageUrl": format!("https://img.example.com/{i}.jpg")
                }
            })
        })
        .collect();

    serde_json::json!({
        "data": {
            "newTabSlate": {
                "utmSource": utm_source,
                "recommendations": recommendations
            }
        }
    })
}
