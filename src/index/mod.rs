//! Name index — durable, plaintext enumeration of credential names.
//!
//! The index exists so the UI can list what the vault holds without
//! unlocking it. It is a set of names persisted wholesale as a JSON
//! array; every mutating call runs a full read-modify-write cycle
//! under an in-process mutex and writes the file (temp + rename)
//! before returning, so a caller that observes success may assume
//! durability.
//!
//! The index never decides whether a secret exists — the vault does.
//! Its policies are deliberately tolerant: `add` of a known name and
//! `remove` of an unknown name are no-ops, and `rename` inserts the
//! new name even when the old one was never listed.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::errors::{CredKeepError, Result};

/// Durable set of credential names.
pub struct NameIndex {
    /// Path to the index JSON file on disk.
    path: PathBuf,

    /// In-memory set. Guarded so concurrent mutations on one store
    /// instance serialize instead of losing updates.
    names: Mutex<BTreeSet<String>>,
}

impl NameIndex {
    /// Load the index from `path`. A missing file is an empty index.
    pub fn load(path: &Path) -> Result<Self> {
        let names: BTreeSet<String> = if path.exists() {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str(&contents).map_err(|e| {
                CredKeepError::SerializationError(format!(
                    "index file {}: {e}",
                    path.display()
                ))
            })?
        } else {
            BTreeSet::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            names: Mutex::new(names),
        })
    }

    /// All known names, sorted with the display collation, no duplicates.
    pub fn list(&self) -> Vec<String> {
        let names = self.lock();
        let mut list: Vec<String> = names.iter().cloned().collect();
        list.sort_by(|a, b| collate(a, b));
        list
    }

    /// Returns `true` if `name` is currently listed.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// The raw name set, for drift comparison against the vault.
    pub fn snapshot(&self) -> BTreeSet<String> {
        self.lock().clone()
    }

    /// Insert `name`. Idempotent — inserting a listed name is a no-op.
    pub fn add(&self, name: &str) -> Result<()> {
        let mut names = self.lock();
        if names.insert(name.to_string()) {
            self.save(&names)?;
        }
        Ok(())
    }

    /// Remove `name` if listed; a no-op otherwise.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut names = self.lock();
        if names.remove(name) {
            self.save(&names)?;
        }
        Ok(())
    }

    /// Swap `old` for `new` in one persisted step.
    ///
    /// `new` is inserted even when `old` was never listed — the index
    /// drives display, and a vault entry that exists under `new`
    /// deserves a listing regardless of past drift.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        let mut names = self.lock();
        names.remove(old);
        names.insert(new.to_string());
        self.save(&names)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        // A panic while holding the lock cannot leave the set torn
        // (mutations are single inserts/removes), so recover the guard.
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the full set as a JSON array, temp-file + rename.
    fn save(&self, names: &BTreeSet<String>) -> Result<()> {
        let list: Vec<&String> = names.iter().collect();
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| CredKeepError::SerializationError(format!("index: {e}")))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), names = names.len(), "saved name index");
        Ok(())
    }
}

/// Display ordering for credential names.
///
/// Case-insensitive comparison first, exact code-point order as the
/// tie-break, which tracks how `localeCompare` orders ASCII names
/// without dragging in collation tables.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
