//! BFF proxy for desktop clients.
//!
//! Exposes a small, stable REST contract and delegates all data work to an
//! upstream GraphQL gateway whose schema and error shapes this service does
//! not control.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request ──▶ http::server ──▶ api (validate ──▶ auth ──▶ call)
//!                                             │
//!                                             ▼
//!                                       graph::client ──▶ upstream gateway
//!                                             │
//!                        success ─────────────┤───────────── failure
//!                           │                                  │
//!                           ▼                                  ▼
//!                  api::*::response              graph::classify ──▶ errors
//!                  (normalize, enrich)           (401 / 502, redacted)
//! ```
//!
//! The boundary rules live in four places: per-endpoint validators
//! (`api::*::inputs`), the auth capabilities (`auth`), the ordered error
//! classification chain (`graph::classify`), and the per-endpoint response
//! normalizers (`api::*::response`). Everything else is plumbing around
//! them.

// Core subsystems
pub mod api;
pub mod config;
pub mod graph;
pub mod http;

// Cross-cutting concerns
pub mod auth;
pub mod errors;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
