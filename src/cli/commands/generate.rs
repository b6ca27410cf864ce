//! `credkeep generate` — export config and run the report script.
//!
//! Mirrors what the desktop shell's "Generate" button does: refresh
//! `secrets.json` and `app-config.json` in the export directory, then
//! hand off to the external report-generation script.

use std::path::PathBuf;

use crate::cli::output;
use crate::cli::{lock_store, store_paths, unlock_store, Cli};
use crate::errors::{CredKeepError, Result};
use crate::export;
use crate::runner;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, args: &[String], script: Option<&str>) -> Result<()> {
    let paths = store_paths(cli)?;

    // 1. Refresh the export files the script reads.
    let secrets_dest = paths.settings.export_path(&paths.project_dir, "secrets.json");
    let endpoints_dest = paths
        .settings
        .export_path(&paths.project_dir, "app-config.json");

    {
        let store = unlock_store(&paths)?;
        let store = lock_store(store);
        let count = export::export_secrets(&*store, &secrets_dest)?;
        output::info(&format!("Exported {count} credential(s) for the pipeline"));
    }
    export::export_endpoints(&endpoints_dest)?;

    // 2. Launch the script.
    let script_path = match script {
        Some(p) => PathBuf::from(p),
        None => paths.project_dir.join(&paths.settings.report_script),
    };

    output::info(&format!("Running {}", script_path.display()));
    let result = runner::run_script(&script_path, args, &paths.settings.interpreters)?;

    if !result.stdout.is_empty() {
        print!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }

    if result.success() {
        output::success("Report generation finished");
        Ok(())
    } else {
        Err(CredKeepError::ScriptFailed(result.exit_code))
    }
}
