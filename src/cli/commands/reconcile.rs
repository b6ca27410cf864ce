//! `credkeep reconcile` — repair index/vault drift on demand.
//!
//! Unlocking already reconciles once; this command exists so drift
//! noticed mid-session (say, after a crashed rename) can be repaired
//! without restarting.

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::Result;

/// Execute the `reconcile` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let paths = store_paths(cli)?;
    let store = unlock_store(&paths)?;
    let mut store = lock_store(store);

    store.reconcile()?;

    output::success(&format!(
        "Index reconciled against the vault ({} credential(s) listed)",
        store.list().len()
    ));

    Ok(())
}
