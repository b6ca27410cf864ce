//! Vault module — the encrypted value store behind the credential API.
//!
//! This module provides:
//! - The `EncryptedVault` trait — the narrow interface the credential
//!   store talks through (`put`, `get`, `delete`, `keys`, `persist`)
//! - `VaultEntry` and `EntryMetadata` types (`entry`)
//! - The sealed snapshot file format (`format`)
//! - `FileVault`, the on-disk implementation (`file`)

pub mod entry;
pub mod file;
pub mod format;

// Re-export the most commonly used items.
pub use entry::{EntryMetadata, VaultEntry};
pub use file::FileVault;
pub use format::SnapshotHeader;

use crate::errors::Result;

/// The password-gated byte store the credential store composes with.
///
/// `get` is absence-as-`None`, never an error: the vault is
/// authoritative for existence and a missing name is a normal answer.
/// `delete` of an absent name succeeds; callers rely on idempotence.
/// Mutations only become durable once `persist` returns.
pub trait EncryptedVault {
    /// Insert or overwrite the value stored under `name`.
    fn put(&mut self, name: &str, value: &[u8]) -> Result<()>;

    /// The value stored under `name`, or `None` if absent.
    fn get(&self, name: &str) -> Option<Vec<u8>>;

    /// Remove `name` if present. Idempotent.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Every name currently held, sorted by code point.
    fn keys(&self) -> Vec<String>;

    /// Flush pending mutations to the backing store.
    fn persist(&mut self) -> Result<()>;
}
