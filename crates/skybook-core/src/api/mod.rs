//! HTTP client facade and the booking API built on it.
//!
//! `ApiClient` owns the configured HTTP client and the session. The
//! `flights`, `orders` and `users` modules are thin functions that pick a
//! verb and path and hand caller parameters to the client unchanged; the
//! result type is chosen by the caller (`serde_json::Value` for opaque
//! pass-through, or a model from [`crate::models`]).

pub mod client;
pub mod error;
pub mod flights;
pub mod orders;
pub mod users;

pub use client::{ApiClient, ApiClientBuilder};
pub use error::ApiError;
