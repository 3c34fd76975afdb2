//! Typed REST client for the retail server contract.
//!
//! One [`ApiClient`] per process, configured with the API root and the
//! bearer token from the cached session. Endpoint coverage mirrors the
//! server contract exactly; the client adds no business logic — stock
//! deduction, totals, and permissions are the server's job.
//!
//! Validation failures never reach this crate: pages validate drafts locally
//! first and only hand over fully formed payloads.

mod client;
mod error;

pub mod ack;
pub mod auth;
pub mod employees;
pub mod products;
pub mod reports;
pub mod sales;

pub use ack::Ack;
pub use auth::AuthResponse;
pub use client::ApiClient;
pub use error::ApiError;

/// Convenience alias used by every endpoint method.
pub type Result<T> = std::result::Result<T, ApiError>;
