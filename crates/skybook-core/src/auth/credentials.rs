use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "skybook";

/// Login passwords remembered in the OS keychain, keyed by username.
pub struct CredentialStore;

impl CredentialStore {
    /// Store username and password in the OS keychain
    pub fn store(username: &str, password: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve password for a username from the OS keychain
    pub fn get_password(username: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Delete stored credentials for a username. Missing entries are fine.
    pub fn delete(username: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete credential from keychain"),
        }
    }

    pub fn has_credentials(username: &str) -> bool {
        Entry::new(SERVICE_NAME, username)
            .map(|entry| entry.get_password().is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_lookup_round_trip() {
        let username = format!("skybook-test-{}", std::process::id());
        // hosts without a reachable keychain (sandboxed CI) reject the write
        if CredentialStore::store(&username, "secret1").is_err() {
            return;
        }

        assert!(CredentialStore::has_credentials(&username));
        assert_eq!(CredentialStore::get_password(&username).unwrap(), "secret1");

        CredentialStore::delete(&username).unwrap();
        assert!(!CredentialStore::has_credentials(&username));
        // deleting twice is fine
        CredentialStore::delete(&username).unwrap();
    }
}
