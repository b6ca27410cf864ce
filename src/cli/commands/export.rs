//! `credkeep export` — write JSON config for the reporting pipeline.
//!
//! Targets:
//! - `secrets`: every credential as a name → value object (unlocks the vault)
//! - `endpoints`: the static vendor endpoint table (no unlock)

use std::path::PathBuf;

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::{CredKeepError, Result};
use crate::export;

/// Execute the `export` command.
pub fn execute(cli: &Cli, target: &str, output_path: Option<&str>) -> Result<()> {
    let paths = store_paths(cli)?;

    match target {
        "secrets" => {
            let dest = resolve_dest(&paths, output_path, "secrets.json");

            let store = unlock_store(&paths)?;
            let store = lock_store(store);

            let count = export::export_secrets(&*store, &dest)?;
            output::success(&format!(
                "Exported {} credential(s) to {}",
                count,
                dest.display()
            ));
        }
        "endpoints" => {
            let dest = resolve_dest(&paths, output_path, "app-config.json");

            export::export_endpoints(&dest)?;
            output::success(&format!("Exported endpoint table to {}", dest.display()));
        }
        other => {
            return Err(CredKeepError::CommandFailed(format!(
                "unknown export target '{other}' — use 'secrets' or 'endpoints'"
            )));
        }
    }

    Ok(())
}

fn resolve_dest(
    paths: &crate::cli::StorePaths,
    output_path: Option<&str>,
    default_name: &str,
) -> PathBuf {
    match output_path {
        Some(p) => PathBuf::from(p),
        None => paths.settings.export_path(&paths.project_dir, default_name),
    }
}
