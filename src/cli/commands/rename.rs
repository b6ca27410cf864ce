//! `credkeep rename` — move a credential to a new name.

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::Result;

/// Execute the `rename` command.
pub fn execute(cli: &Cli, old: &str, new: &str) -> Result<()> {
    let paths = store_paths(cli)?;
    let store = unlock_store(&paths)?;
    let mut store = lock_store(store);

    store.rename(old, new)?;

    if old == new {
        output::info(&format!("'{old}' already has that name — nothing to do."));
    } else {
        output::success(&format!("Renamed '{old}' to '{new}'"));
    }

    Ok(())
}
