//! `credkeep auth keyring` — cache or forget the vault password.

use crate::cli::{store_paths, Cli};
use crate::errors::Result;

#[cfg(not(feature = "keyring-store"))]
use crate::errors::CredKeepError;

/// Execute the `auth keyring` command.
#[cfg(feature = "keyring-store")]
pub fn execute_keyring(cli: &Cli, delete: bool) -> Result<()> {
    use crate::cli::output;

    let paths = store_paths(cli)?;
    let vault_id = paths.vault_path.to_string_lossy().into_owned();

    if delete {
        crate::keyring::forget_password(&vault_id)?;
        output::success("Removed the cached vault password from the OS keyring");
        return Ok(());
    }

    // Prompt directly — the point is to capture what the user types,
    // not whatever the keyring already holds.
    let password = dialoguer::Password::new()
        .with_prompt("Enter vault password to cache")
        .interact()
        .map_err(|e| crate::errors::CredKeepError::CommandFailed(format!("password prompt: {e}")))?;

    crate::keyring::cache_password(&vault_id, &password)?;
    output::success("Vault password cached in the OS keyring");
    output::tip("Remove it later with: credkeep auth keyring --delete");

    Ok(())
}

/// Without the `keyring-store` feature the command only explains itself.
#[cfg(not(feature = "keyring-store"))]
pub fn execute_keyring(cli: &Cli, _delete: bool) -> Result<()> {
    let _ = store_paths(cli)?;
    Err(CredKeepError::CommandFailed(
        "this build has no keyring support — rebuild with `--features keyring-store`".into(),
    ))
}
