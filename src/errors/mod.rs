//! Stable REST error surface.
//!
//! # Responsibilities
//! - Define the JSON error envelope returned by every endpoint
//! - Carry an operator-facing message alongside the client-facing body
//! - Convert errors into HTTP responses
//!
//! # Design Decisions
//! - Every error call site has a fixed, unique `id`; message text may change,
//!   ids never do. Operators correlate user reports against logs by id.
//! - Client-facing bodies never contain upstream messages outside of
//!   `source.upstreamError`, which exists for internal correlation only.

pub mod response;

pub use response::{internal_error, not_found, ApiError, ApiErrorResponse, ErrorSource, RestError};
