//! Process-wide store session.
//!
//! The desktop shell (and the CLI) want one store per process: the
//! vault and index are opened lazily, exactly once, and every caller
//! after that shares the handle. `once_cell` guarantees that
//! concurrent first callers block on a single in-flight
//! initialization instead of racing to open the vault twice; the
//! mutex serializes the operations themselves.
//!
//! A failed unlock does not poison the cell — the next caller gets a
//! fresh attempt (e.g. after a mistyped password).

use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::OnceCell;

use crate::crypto::kdf::KdfParams;
use crate::errors::Result;
use crate::vault::FileVault;

use super::CredentialStore;

static STORE: OnceCell<Mutex<CredentialStore<FileVault>>> = OnceCell::new();

/// Unlock the process-wide store, opening it on first call.
///
/// Later calls return the existing handle and ignore the arguments —
/// one process, one vault.
pub fn unlock(
    vault_path: &Path,
    index_path: &Path,
    password: &[u8],
    kdf_params: Option<&KdfParams>,
) -> Result<&'static Mutex<CredentialStore<FileVault>>> {
    STORE.get_or_try_init(|| {
        CredentialStore::open(vault_path, index_path, password, kdf_params).map(Mutex::new)
    })
}

/// Returns `true` if the process-wide store has been unlocked.
pub fn is_unlocked() -> bool {
    STORE.get().is_some()
}
