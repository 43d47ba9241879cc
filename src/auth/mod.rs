//! Authentication capabilities.
//!
//! # Responsibilities
//! - Define the narrow capability every credential scheme implements
//! - Build capabilities from inbound transport credentials
//! - Extract the consumer key (client identification, not auth)
//!
//! # Design Decisions
//! - Callers hold a `&dyn AuthCapability` and never branch on the scheme.
//! - Credential material lives inside the capability for one request and is
//!   dropped with it. It is never cached, logged raw, or reused.

pub mod capability;
pub mod consumer_key;
pub mod web_session;

pub use capability::{AnonymousAuth, AuthCapability};
pub use consumer_key::require_consumer_key;
pub use web_session::WebSessionAuth;
