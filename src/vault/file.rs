//! `FileVault` — the on-disk, password-gated vault.
//!
//! The whole entry map is sealed as a single snapshot per save, the
//! way the original desktop app treated its vault file: open decrypts
//! everything into memory, `persist` re-seals and rewrites atomically.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use zeroize::Zeroize;

use crate::crypto::kdf::{self, KdfParams};
use crate::crypto::{seal, MasterKey};
use crate::errors::{CredKeepError, Result};

use super::entry::{EntryMetadata, VaultEntry};
use super::format::{self, SnapshotHeader, CURRENT_VERSION};
use super::EncryptedVault;

/// The on-disk vault handle.
///
/// `open` either loads an existing snapshot or creates a fresh empty
/// one, so the first unlock of a new data directory just works. This
/// is the load-or-create behavior the desktop shell expects.
pub struct FileVault {
    /// Path to the `.vault` file on disk.
    path: PathBuf,

    /// Plaintext header (salt, KDF params, timestamps).
    header: SnapshotHeader,

    /// Decrypted entries, keyed by name.
    entries: BTreeMap<String, VaultEntry>,

    /// The derived master key (zeroized on drop).
    master_key: MasterKey,
}

impl FileVault {
    /// Open the vault at `path`, creating an empty one if absent.
    ///
    /// A wrong password surfaces as `AuthFailed`; an unreadable or
    /// malformed file as `Io` / `InvalidVaultFormat`. `kdf` only
    /// matters at creation; an existing vault always re-derives with
    /// the parameters recorded in its header.
    pub fn open(path: &Path, password: &[u8], kdf_params: Option<&KdfParams>) -> Result<Self> {
        if path.exists() {
            Self::load(path, password)
        } else {
            Self::create(path, password, kdf_params.copied().unwrap_or_default())
        }
    }

    fn create(path: &Path, password: &[u8], kdf_params: KdfParams) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let salt = kdf::generate_salt();
        let key_bytes = kdf::derive_master_key(password, &salt, &kdf_params)?;
        let master_key = MasterKey::new(key_bytes);

        let header = SnapshotHeader {
            version: CURRENT_VERSION,
            salt: salt.to_vec(),
            created_at: Utc::now(),
            kdf: kdf_params.into(),
        };

        let mut vault = Self {
            path: path.to_path_buf(),
            header,
            entries: BTreeMap::new(),
            master_key,
        };

        // Persist the empty snapshot so the file exists from day one.
        vault.persist()?;

        tracing::info!(path = %vault.path.display(), "created new vault");
        Ok(vault)
    }

    fn load(path: &Path, password: &[u8]) -> Result<Self> {
        let raw = format::read_snapshot(path)?;

        let key_bytes = kdf::derive_master_key(password, &raw.header.salt, &raw.header.kdf.into())?;
        let master_key = MasterKey::new(key_bytes);

        // The original header bytes are the AAD; any header edit since
        // the last save fails authentication here.
        let mut plaintext = seal::open(master_key.expose(), &raw.header_bytes, &raw.sealed)?;

        let entry_list: Vec<VaultEntry> = serde_json::from_slice(&plaintext)
            .map_err(|e| CredKeepError::InvalidVaultFormat(format!("entries JSON: {e}")))?;
        plaintext.zeroize();

        let entries: BTreeMap<String, VaultEntry> = entry_list
            .into_iter()
            .map(|e| (e.name.clone(), e))
            .collect();

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            "opened vault"
        );

        Ok(Self {
            path: path.to_path_buf(),
            header: raw.header,
            entries,
            master_key,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of entries in the vault.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the vault holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Metadata for all entries, sorted by name. No value bytes.
    pub fn metadata(&self) -> Vec<EntryMetadata> {
        self.entries
            .values()
            .map(|e| EntryMetadata {
                name: e.name.clone(),
                created_at: e.created_at,
                updated_at: e.updated_at,
            })
            .collect()
    }
}

impl EncryptedVault for FileVault {
    fn put(&mut self, name: &str, value: &[u8]) -> Result<()> {
        let now = Utc::now();

        // Overwriting keeps the original created_at.
        let created_at = self
            .entries
            .get(name)
            .map_or(now, |existing| existing.created_at);

        self.entries.insert(
            name.to_string(),
            VaultEntry {
                name: name.to_string(),
                value: value.to_vec(),
                created_at,
                updated_at: now,
            },
        );
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.entries.get(name).map(|e| e.value.clone())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        // Removing an absent name is a success, not an error.
        self.entries.remove(name);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn persist(&mut self) -> Result<()> {
        let header_bytes = serde_json::to_vec(&self.header)
            .map_err(|e| CredKeepError::SerializationError(format!("header: {e}")))?;

        // Sorted Vec for deterministic snapshot bytes.
        let entry_list: Vec<&VaultEntry> = self.entries.values().collect();
        let mut plaintext = serde_json::to_vec(&entry_list)
            .map_err(|e| CredKeepError::SerializationError(format!("entries: {e}")))?;

        let sealed = seal::seal(self.master_key.expose(), &header_bytes, &plaintext);
        plaintext.zeroize();
        let sealed = sealed?;

        format::write_snapshot(&self.path, &header_bytes, &sealed)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "persisted vault snapshot"
        );
        Ok(())
    }
}
