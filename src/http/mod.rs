//! HTTP serving and the header forwarding policy.

pub mod headers;
pub mod server;

pub use server::{AppState, HttpServer};
