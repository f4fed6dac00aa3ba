use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::store::{SessionStore, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

/// Typed view over the `token` and `user` entries of a [`SessionStore`].
/// Clone is cheap - the store is shared.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Get the bearer token if one is stored
    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    pub fn remove_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }

    pub fn set_user<U: Serialize>(&self, user: &U) -> Result<()> {
        let json = serde_json::to_string(user).context("Failed to serialize session user")?;
        self.store.set(USER_KEY, &json)
    }

    /// Load the stored user record. A record that no longer parses as `U`
    /// is reported as absent.
    pub fn user<U: DeserializeOwned>(&self) -> Result<Option<U>> {
        let Some(json) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session user");
                Ok(None)
            }
        }
    }

    pub fn remove_user(&self) -> Result<()> {
        self.store.remove(USER_KEY)
    }

    /// Store credential and user record together after a successful login
    pub fn establish<U: Serialize>(&self, token: &str, user: &U) -> Result<()> {
        self.set_token(token)?;
        self.set_user(user)
    }

    /// Remove both the credential and the user record
    pub fn clear(&self) -> Result<()> {
        let token = self.remove_token();
        let user = self.remove_user();
        token.and(user)
    }

    pub fn state(&self) -> Result<SessionState> {
        Ok(match self.token()? {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Anonymous,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), Ok(SessionState::Authenticated))
    }
}
