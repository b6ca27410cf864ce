//! Credential store — the name-addressed secret API.
//!
//! `CredentialStore` composes an `EncryptedVault` with the plaintext
//! `NameIndex` and keeps the two in agreement: every vault mutation is
//! persisted and then mirrored into the index. The vault is
//! authoritative for existence and values; the index only drives
//! enumeration. Drift between them (an interrupted rename, a failed
//! index write) is expected and repaired by `reconcile`, which runs on
//! every open.
//!
//! Operations are not internally locked against each other — callers
//! serialize mutations per name (the session mutex does this for the
//! process-wide store; the UI shell disables a row's controls while an
//! operation on it is in flight).

pub mod session;

use std::collections::BTreeSet;
use std::path::Path;

use crate::crypto::kdf::KdfParams;
use crate::errors::{CredKeepError, Result};
use crate::index::NameIndex;
use crate::vault::{EncryptedVault, FileVault};

/// Longest accepted credential name.
const MAX_NAME_LEN: usize = 256;

/// The composed credential store.
pub struct CredentialStore<V: EncryptedVault> {
    vault: V,
    index: NameIndex,
}

impl CredentialStore<FileVault> {
    /// Unlock the on-disk store: open (or create) the vault, load the
    /// index, and reconcile them before anything else runs.
    pub fn open(
        vault_path: &Path,
        index_path: &Path,
        password: &[u8],
        kdf_params: Option<&KdfParams>,
    ) -> Result<Self> {
        let vault = FileVault::open(vault_path, password, kdf_params)?;
        let index = NameIndex::load(index_path)?;
        Self::new(vault, index)
    }
}

impl<V: EncryptedVault> CredentialStore<V> {
    /// Compose a store from parts and run the startup reconcile pass.
    pub fn new(vault: V, index: NameIndex) -> Result<Self> {
        let mut store = Self { vault, index };
        store.reconcile()?;
        Ok(store)
    }

    /// Store `value` under `name`, creating or overwriting.
    ///
    /// The vault write lands and persists first; the index insert
    /// follows. If the index insert fails the value is already
    /// retrievable but not enumerable. The error is surfaced, nothing
    /// is rolled back, and the next `reconcile` closes the gap.
    pub fn add(&mut self, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        if value.is_empty() {
            return Err(CredKeepError::InvalidValue(name.to_string()));
        }

        self.vault.put(name, value.as_bytes())?;
        self.vault.persist()?;
        self.index.add(name)?;
        Ok(())
    }

    /// Overwrite an existing credential. Same contract as `add`.
    pub fn update(&mut self, name: &str, value: &str) -> Result<()> {
        self.add(name, value)
    }

    /// The value stored under `name`, or `None` if absent.
    ///
    /// Queries the vault directly — a name missing from the index but
    /// present in the vault still reads back.
    pub fn read(&self, name: &str) -> Result<Option<String>> {
        match self.vault.get(name) {
            Some(bytes) => {
                let text = String::from_utf8(bytes).map_err(|_| {
                    CredKeepError::SerializationError(format!(
                        "secret '{name}' is not valid UTF-8"
                    ))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    /// Remove `name` from the vault and the index. Idempotent:
    /// deleting an absent name succeeds.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.vault.delete(name)?;
        self.vault.persist()?;
        self.index.remove(name)?;
        Ok(())
    }

    /// Move the value stored under `old` to `new`.
    ///
    /// Step order is load-bearing: the value is written under `new`
    /// and persisted *before* `old` is deleted, so an interruption
    /// leaves the value under both names (recoverable) rather than
    /// neither (lost). The index swap comes last; stale listings are
    /// repaired by `reconcile` at the next open.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        validate_name(new)?;

        if old == new {
            return Ok(());
        }

        if self.index.contains(new) {
            return Err(CredKeepError::NameCollision(new.to_string()));
        }

        let value = self
            .vault
            .get(old)
            .ok_or_else(|| CredKeepError::SecretNotFound(old.to_string()))?;

        self.vault.put(new, &value)?;
        self.vault.persist()?;

        self.vault.delete(old)?;
        self.vault.persist()?;

        self.index.rename(old, new)?;

        tracing::debug!(%old, %new, "renamed credential");
        Ok(())
    }

    /// All listed names, sorted, without touching the vault.
    pub fn list(&self) -> Vec<String> {
        self.index.list()
    }

    /// Restore index/vault agreement.
    ///
    /// Names in the vault but unlisted are added to the index; listed
    /// names with no vault entry are dropped. Safe to run repeatedly;
    /// runs automatically at every open. Repairs are logged, not
    /// surfaced — drift is the expected residue of an interrupted
    /// rename, not a user-facing fault.
    pub fn reconcile(&mut self) -> Result<()> {
        let vault_keys: BTreeSet<String> = self.vault.keys().into_iter().collect();
        let listed = self.index.snapshot();

        let mut added = 0usize;
        for name in vault_keys.difference(&listed) {
            self.index.add(name)?;
            added += 1;
        }

        let mut removed = 0usize;
        for name in listed.difference(&vault_keys) {
            self.index.remove(name)?;
            removed += 1;
        }

        if added > 0 || removed > 0 {
            tracing::debug!(added, removed, "reconciled name index against vault");
        }
        Ok(())
    }

    /// The underlying vault, for metadata queries.
    pub fn vault(&self) -> &V {
        &self.vault
    }
}

/// Validate that a credential name is usable as an index key.
///
/// Non-empty after trimming, at most 256 characters. The character
/// set stays open; the desktop shell historically allowed any
/// printable name.
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CredKeepError::InvalidName("name cannot be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CredKeepError::InvalidName(format!(
            "name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
