//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredKeepError, Result};
use crate::store::{session, CredentialStore};
use crate::vault::FileVault;

/// credkeep CLI: credential store and report launcher.
#[derive(Parser)]
#[command(
    name = "credkeep",
    about = "Credential store and report launcher for analytics pipelines",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the vault and name index
    /// (default: from .credkeep.toml, falling back to .credkeep)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set a credential (add or update)
    Set {
        /// Credential name (e.g. MSOC_CATAPULT_KEY)
        name: String,
        /// Credential value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Get a credential's value
    Get {
        /// Credential name
        name: String,
        /// Copy to the clipboard instead of printing
        #[arg(long)]
        copy: bool,
    },

    /// List credential names (no unlock needed)
    List {
        /// Unlock the vault and show created/updated timestamps
        #[arg(long)]
        detail: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Rename a credential, keeping its value
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Repair index/vault drift left by an interrupted operation
    Reconcile,

    /// Export configuration for the reporting pipeline
    Export {
        /// What to export: secrets or endpoints
        target: String,
        /// Output file path (default: under the export directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export config and run the report-generation script
    Generate {
        /// Arguments passed through to the script (after --)
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,

        /// Script path override (default: from .credkeep.toml)
        #[arg(long)]
        script: Option<String>,
    },

    /// Manage the keyring password cache
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Auth subcommands.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Save the vault password to the OS keyring (auto-unlock)
    Keyring {
        /// Remove the cached password instead of saving
        #[arg(long)]
        delete: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs to find the store on disk.
pub struct StorePaths {
    pub settings: Settings,
    pub project_dir: PathBuf,
    pub vault_path: PathBuf,
    pub index_path: PathBuf,
}

/// Resolve settings and on-disk paths from the CLI arguments.
pub fn store_paths(cli: &Cli) -> Result<StorePaths> {
    let project_dir = std::env::current_dir()?;
    let mut settings = Settings::load(&project_dir)?;

    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }

    let vault_path = settings.vault_path(&project_dir);
    let index_path = settings.index_path(&project_dir);

    Ok(StorePaths {
        settings,
        project_dir,
        vault_path,
        index_path,
    })
}

/// Get the vault password, trying in order:
/// 1. `CREDKEEP_PASSWORD` env var (scripting/CI)
/// 2. OS keyring (if compiled with `keyring-store`)
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped on drop.
pub fn prompt_password(vault_id: Option<&str>) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDKEEP_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    #[cfg(feature = "keyring-store")]
    if let Some(id) = vault_id {
        match crate::keyring::cached_password(id) {
            Ok(Some(pw)) => return Ok(Zeroizing::new(pw)),
            Ok(None) => {}  // Nothing cached, fall through to prompt.
            Err(_) => {}    // Keyring unavailable, fall through to prompt.
        }
    }

    #[cfg(not(feature = "keyring-store"))]
    let _ = vault_id;

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| CredKeepError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Unlock the process-wide store using the resolved paths.
pub fn unlock_store(paths: &StorePaths) -> Result<&'static Mutex<CredentialStore<FileVault>>> {
    let vault_id = paths.vault_path.to_string_lossy();
    let password = prompt_password(Some(&vault_id))?;
    session::unlock(
        &paths.vault_path,
        &paths.index_path,
        password.as_bytes(),
        Some(&paths.settings.kdf_params()),
    )
}

/// Lock the store handle, recovering from a poisoned mutex.
pub fn lock_store(
    store: &'static Mutex<CredentialStore<FileVault>>,
) -> MutexGuard<'static, CredentialStore<FileVault>> {
    store
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
