//! Entry types stored inside the vault snapshot.
//!
//! Each entry holds its name, the raw value bytes, and timestamps.
//! The `value` field uses custom serde helpers so it serializes as a
//! base64 string in the snapshot JSON rather than a byte array.
//! Values are only ever plaintext inside the sealed blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-use the base64 serde helpers from format.rs (no duplication).
use super::format::{base64_decode, base64_encode};

/// A single credential stored in the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    /// The credential name (e.g. "MSOC_CATAPULT_KEY").
    pub name: String,

    /// The value bytes. Base64 inside the snapshot JSON.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub value: Vec<u8>,

    /// When this entry was first created.
    pub created_at: DateTime<Utc>,

    /// When this entry was last overwritten.
    pub updated_at: DateTime<Utc>,
}

/// Lightweight metadata about an entry (no value bytes).
///
/// Returned by `FileVault::metadata` so callers can display names and
/// timestamps without touching any secret material.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
