use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::KdfParams;
use crate::errors::{CredKeepError, Result};

/// Project-level configuration, loaded from `.credkeep.toml`.
///
/// Every field has a default so credkeep works out-of-the-box with no
/// config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) holding the vault and
    /// the name index.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory where JSON exports for the reporting pipeline land.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Path to the report-generation script.
    #[serde(default = "default_report_script")]
    pub report_script: String,

    /// Interpreter candidates tried in order when launching the script.
    #[serde(default = "default_interpreters")]
    pub interpreters: Vec<String>,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".credkeep".to_string()
}

fn default_export_dir() -> String {
    "data".to_string()
}

fn default_report_script() -> String {
    "server/GenReport.py".to_string()
}

fn default_interpreters() -> Vec<String> {
    vec!["python3".to_string(), "python".to_string(), "py".to_string()]
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            report_script: default_report_script(),
            interpreters: default_interpreters(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".credkeep.toml";

    /// Load settings from `<project_dir>/.credkeep.toml`.
    ///
    /// If the file does not exist, defaults are returned. If it exists
    /// but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredKeepError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the vault file: `<project_dir>/<data_dir>/secrets.vault`
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join("secrets.vault")
    }

    /// Full path to the name index: `<project_dir>/<data_dir>/secret-index.json`
    pub fn index_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join("secret-index.json")
    }

    /// Full path to an export target inside the export directory.
    pub fn export_path(&self, project_dir: &Path, file_name: &str) -> PathBuf {
        project_dir.join(&self.export_dir).join(file_name)
    }

    /// Convert the Argon2 settings into KDF-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
