//! Upstream GraphQL gateway integration.
//!
//! # Responsibilities
//! - One authenticated gateway call per inbound request
//! - Capture raw success payloads and raw failures
//! - Classify structured failures into the stable REST error set
//!
//! # Design Decisions
//! - Failures split into a *structured* arm (the gateway answered with
//!   errors) and a *generic* arm (transport/decode, no structured content).
//!   Only the structured arm enters classification; the generic arm
//!   terminates as a fully generic 500 at the handler.
//! - No retries, no batching: every gateway failure ends the request.

pub mod classify;
pub mod client;
pub mod error;
pub mod queries;

pub use classify::{classify, ClientErrorHandler};
pub use client::{Gateway, GraphClient, GraphSuccess};
pub use error::{GraphError, GraphFailure, UpstreamFailure};
