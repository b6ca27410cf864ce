//! `credkeep get` — retrieve a single credential's value.

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::{CredKeepError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str, copy: bool) -> Result<()> {
    let paths = store_paths(cli)?;
    let store = unlock_store(&paths)?;
    let store = lock_store(store);

    let value = store
        .read(name)?
        .ok_or_else(|| CredKeepError::SecretNotFound(name.to_string()))?;

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| CredKeepError::CommandFailed(format!("clipboard: {e}")))?;
        clipboard
            .set_text(value)
            .map_err(|e| CredKeepError::CommandFailed(format!("clipboard: {e}")))?;
        output::success(&format!("Copied '{name}' to the clipboard"));
    } else {
        println!("{value}");
    }

    Ok(())
}
