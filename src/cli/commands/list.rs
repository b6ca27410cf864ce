//! `credkeep list` — display credential names.
//!
//! The plain listing reads only the plaintext index, so no password is
//! needed; `--detail` unlocks the vault to show timestamps.

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::Result;
use crate::index::NameIndex;

/// Execute the `list` command.
pub fn execute(cli: &Cli, detail: bool) -> Result<()> {
    let paths = store_paths(cli)?;

    if detail {
        let store = unlock_store(&paths)?;
        let store = lock_store(store);
        let entries = store.vault().metadata();

        output::info(&format!("{} credential(s)", entries.len()));
        output::print_detail_table(&entries);
        return Ok(());
    }

    let index = NameIndex::load(&paths.index_path)?;
    let names = index.list();

    output::info(&format!("{} credential(s)", names.len()));
    output::print_names_table(&names);

    Ok(())
}
