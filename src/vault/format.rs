//! Sealed snapshot file format.
//!
//! A `.vault` file has this layout:
//!
//! ```text
//! [CKVT: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON][nonce + ciphertext]
//! ```
//!
//! - **Magic** (`CKVT`): identifies the file as a credkeep vault.
//! - **Version**: format version (currently `1`).
//! - **Header length**: little-endian u32 telling us where the header
//!   JSON ends and the sealed blob begins.
//! - **Header JSON**: plaintext `SnapshotHeader` — salt and KDF
//!   parameters must be readable before the key exists.
//! - **Sealed blob**: the entry list JSON, AES-256-GCM encrypted with
//!   the header bytes as associated data, so a header edit breaks the
//!   authentication tag.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::KdfParams;
use crate::errors::{CredKeepError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
const MAGIC: &[u8; 4] = b"CKVT";

/// Current snapshot format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

// ---------------------------------------------------------------------------
// SnapshotHeader
// ---------------------------------------------------------------------------

/// Argon2 parameters recorded in the header so re-opening the vault
/// derives the key with the exact settings used at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoredKdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl From<KdfParams> for StoredKdfParams {
    fn from(p: KdfParams) -> Self {
        Self {
            memory_kib: p.memory_kib,
            iterations: p.iterations,
            parallelism: p.parallelism,
        }
    }
}

impl From<StoredKdfParams> for KdfParams {
    fn from(p: StoredKdfParams) -> Self {
        Self {
            memory_kib: p.memory_kib,
            iterations: p.iterations,
            parallelism: p.parallelism,
        }
    }
}

/// Plaintext metadata at the beginning of a vault file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Format version.
    pub version: u8,

    /// The salt used for Argon2id key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// When this vault was first created.
    pub created_at: DateTime<Utc>,

    /// KDF params used at vault creation.
    pub kdf: StoredKdfParams,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Raw sections of a vault file read from disk.
///
/// The sealed blob is returned as-is; the caller derives the master
/// key from the header and opens the blob with the original header
/// bytes as associated data.
pub struct RawSnapshot {
    pub header: SnapshotHeader,
    /// The raw header JSON bytes exactly as stored on disk.
    pub header_bytes: Vec<u8>,
    /// Nonce + ciphertext of the entry list.
    pub sealed: Vec<u8>,
}

/// Write a vault file to disk **atomically**.
///
/// Writes to a temp file in the same directory, then renames over the
/// target path, so readers never see a half-written snapshot.
pub fn write_snapshot(path: &Path, header_bytes: &[u8], sealed: &[u8]) -> Result<()> {
    let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
        CredKeepError::SerializationError(format!(
            "header length {} exceeds u32::MAX",
            header_bytes.len()
        ))
    })?;

    let mut buf = Vec::with_capacity(PREFIX_LEN + header_bytes.len() + sealed.len());
    buf.extend_from_slice(MAGIC); // 4 bytes
    buf.push(CURRENT_VERSION); // 1 byte
    buf.extend_from_slice(&header_len.to_le_bytes()); // 4 bytes LE
    buf.extend_from_slice(header_bytes); // header JSON
    buf.extend_from_slice(sealed); // nonce + ciphertext

    // Temp file lives in the same directory so rename stays on one
    // filesystem and is atomic.
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &buf)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Read a vault file from disk and split it into its sections.
pub fn read_snapshot(path: &Path) -> Result<RawSnapshot> {
    let data = fs::read(path)?;

    if data.len() < PREFIX_LEN {
        return Err(CredKeepError::InvalidVaultFormat(
            "file too small to be a valid vault".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CredKeepError::InvalidVaultFormat(
            "missing CKVT magic bytes".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(CredKeepError::InvalidVaultFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let header_len_u32 = u32::from_le_bytes(
        data[5..9]
            .try_into()
            .map_err(|_| CredKeepError::InvalidVaultFormat("bad header length".into()))?,
    );
    let header_len = usize::try_from(header_len_u32).map_err(|_| {
        CredKeepError::InvalidVaultFormat(format!(
            "header length {header_len_u32} exceeds platform address space"
        ))
    })?;

    let header_end = PREFIX_LEN + header_len;
    if header_end > data.len() {
        return Err(CredKeepError::InvalidVaultFormat(
            "header length exceeds file size".into(),
        ));
    }

    let header_bytes = data[PREFIX_LEN..header_end].to_vec();
    let sealed = data[header_end..].to_vec();

    let header: SnapshotHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| CredKeepError::InvalidVaultFormat(format!("header JSON: {e}")))?;

    Ok(RawSnapshot {
        header,
        header_bytes,
        sealed,
    })
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
