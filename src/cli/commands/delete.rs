//! `credkeep delete` — remove a credential.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::{CredKeepError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete credential '{name}'? This cannot be undone."))
            .default(false)
            .interact()
            .map_err(|e| CredKeepError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let paths = store_paths(cli)?;
    let store = unlock_store(&paths)?;
    let mut store = lock_store(store);

    store.delete(name)?;

    output::success(&format!("Deleted credential '{name}'"));

    Ok(())
}
