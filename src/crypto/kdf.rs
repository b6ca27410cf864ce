//! Password-based key derivation using Argon2id.
//!
//! The vault password never touches the cipher directly: it runs
//! through Argon2id (memory-hard, GPU-hostile) with a per-vault random
//! salt. Parameters come from `.credkeep.toml` or the defaults below,
//! and are recorded in the snapshot header so re-opening a vault always
//! uses the settings it was created with.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::TryRngCore;

use crate::crypto::KEY_LEN;
use crate::errors::{CredKeepError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// Maps 1:1 to the KDF fields in `Settings` and to the copy stored in
/// the snapshot header.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive the 32-byte master key from a password and salt.
///
/// The same password + salt + params always produce the same key.
/// Parameters below the safety floor are rejected rather than silently
/// weakening the vault.
pub fn derive_master_key(password: &[u8], salt: &[u8], kdf: &KdfParams) -> Result<[u8; KEY_LEN]> {
    if kdf.memory_kib < MIN_MEMORY_KIB {
        return Err(CredKeepError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            kdf.memory_kib
        )));
    }
    if kdf.iterations < 1 || kdf.parallelism < 1 {
        return Err(CredKeepError::KeyDerivationFailed(
            "Argon2 iterations and parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(kdf.memory_kib, kdf.iterations, kdf.parallelism, Some(KEY_LEN))
        .map_err(|e| CredKeepError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| CredKeepError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt)
        .expect("OS random number generator failed");
    salt
}
