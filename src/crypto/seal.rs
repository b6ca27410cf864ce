//! AES-256-GCM sealing for the vault snapshot.
//!
//! `seal` encrypts one plaintext blob under a fresh random 12-byte
//! nonce and prepends the nonce to the ciphertext; `open` splits the
//! nonce back out. The caller passes the plaintext snapshot header as
//! associated data, which binds the header to the ciphertext — editing
//! the stored salt or KDF parameters invalidates the tag.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{CredKeepError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Seal `plaintext` with a 32-byte `key`, binding `aad` into the tag.
pub fn seal(key: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CredKeepError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, Payload { msg: plaintext, aad })
        .map_err(|e| CredKeepError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the vault file only stores one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Open a blob produced by `seal`.
///
/// A wrong key, a tampered ciphertext, or mismatched `aad` all surface
/// as the same `AuthFailed` — the GCM tag does not say which.
pub fn open(key: &[u8], aad: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_LEN {
        return Err(CredKeepError::AuthFailed);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CredKeepError::AuthFailed)?;

    cipher
        .decrypt(nonce, Payload { msg: ciphertext, aad })
        .map_err(|_| CredKeepError::AuthFailed)
}
