//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all endpoint handlers
//! - Wire up middleware (tracing, inbound timeout, request ID)
//! - Hold shared state (config, gateway client)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Requests are independent 1:1 fan-outs to the gateway; there is no
//!   shared mutable state, so `AppState` is cheap clones of read-only data.
//! - The fallback route answers in the same JSON error envelope as every
//!   other failure; clients never see a bare-text 404.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Request};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::errors::{self, RestError};
use crate::graph::client::ClientBuildError;
use crate::graph::GraphClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub graph: GraphClient,
}

/// The proxy's HTTP server.
pub struct HttpServer {
    router: Router,
}

/// UUID v4 request IDs.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ClientBuildError> {
        let graph = GraphClient::new(&config.upstream)?;
        let request_timeout = Duration::from_secs(config.listener.request_timeout_secs);

        let state = AppState {
            config: Arc::new(config),
            graph,
        };

        Ok(Self {
            router: Self::build_router(state, request_timeout),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route(api::recent_saves::ROUTE, get(api::recent_saves::handler))
            .route(
                api::recommendations::ROUTE,
                get(api::recommendations::handler),
            )
            .route(api::global_recs::ROUTE, get(api::global_recs::handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn not_found_handler() -> RestError {
    errors::not_found()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
