//! `credkeep set` — add or update a credential.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::Result;

/// Execute the `set` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    // Determine the value from one of three sources.
    let secret_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for {name}"))
            .interact()
            .map_err(|e| {
                crate::errors::CredKeepError::CommandFailed(format!("input prompt: {e}"))
            })?
    };

    let paths = store_paths(cli)?;
    let store = unlock_store(&paths)?;
    let mut store = lock_store(store);

    let existed = store.read(name)?.is_some();
    store.add(name, &secret_value)?;

    if existed {
        output::success(&format!(
            "Credential '{}' updated ({} listed)",
            name,
            store.list().len()
        ));
    } else {
        output::success(&format!(
            "Credential '{}' added ({} listed)",
            name,
            store.list().len()
        ));
    }

    output::tip("Generate reports: credkeep generate -- <args>");

    Ok(())
}
