//! Client library for the SkyBook airline booking system.
//!
//! - [`api`]: the `ApiClient` facade (bearer injection, 401 eviction and
//!   login redirect) and the flight, order and user endpoints
//! - [`auth`]: session storage and the login flow
//! - [`nav`]: the navigation port a host implements to receive redirects
//! - [`router`]: route table with an authentication guard
//! - [`models`]: typed payloads
//! - [`config`]: on-disk configuration
//! - [`utils`]: validation, notices, formatting

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod nav;
pub mod router;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{Session, SessionState, SessionStore};
pub use config::Config;
pub use nav::{ChannelNavigator, Navigator, Redirect};
