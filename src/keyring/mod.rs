//! OS keyring cache for the vault password.
//!
//! The desktop shell used to ship with a hard-coded development
//! password; this replaces it. When the `keyring-store` feature is
//! enabled the password can be cached in the platform credential
//! store (Keychain, Credential Manager, Secret Service) keyed by
//! vault path, and unlock falls back to a prompt whenever the keyring
//! has nothing or is unavailable.

use crate::errors::{CredKeepError, Result};

/// Service name under which entries are filed.
const SERVICE: &str = "credkeep";

/// Build the keyring entry for a vault path.
fn entry(vault_id: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE, &format!("vault:{vault_id}"))
        .map_err(|e| CredKeepError::KeyringError(format!("failed to create keyring entry: {e}")))
}

/// Cache the vault password for `vault_id`.
pub fn cache_password(vault_id: &str, password: &str) -> Result<()> {
    entry(vault_id)?
        .set_password(password)
        .map_err(|e| CredKeepError::KeyringError(format!("failed to store password: {e}")))
}

/// The cached password for `vault_id`, or `None` when nothing is stored.
pub fn cached_password(vault_id: &str) -> Result<Option<String>> {
    match entry(vault_id)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(CredKeepError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

/// Drop the cached password for `vault_id`. Idempotent.
pub fn forget_password(vault_id: &str) -> Result<()> {
    match entry(vault_id)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(CredKeepError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}
