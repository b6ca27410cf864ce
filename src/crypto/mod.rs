//! Crypto module — the sealing primitives behind the vault file.
//!
//! Nothing in here is novel: key derivation is Argon2id and sealing is
//! AES-256-GCM, both straight from the RustCrypto crates. The vault is
//! encrypted as one snapshot, so there is exactly one key and one AEAD
//! pass per save.

pub mod kdf;
pub mod seal;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the master key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte master key that wipes its memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes, for handing to the cipher.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}
