//! Session credentials and the login flow.
//!
//! This module provides:
//! - `SessionStore`: key-value storage for the `token` and `user` entries,
//!   in memory (`MemoryStore`) or on disk (`FileStore`)
//! - `Session`: typed access to those entries and the auth state
//! - `sign_in` / `sign_out` / `sign_up`: the flows that create and remove them
//! - `CredentialStore`: remembered passwords in the OS keychain

pub mod credentials;
pub mod login;
pub mod session;
pub mod store;

pub use credentials::CredentialStore;
pub use login::{sign_in, sign_out, sign_up};
pub use session::{Session, SessionState};
pub use store::{FileStore, MemoryStore, SessionStore, TOKEN_KEY, USER_KEY};
