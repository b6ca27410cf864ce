//! Integration tests for the credential store.
//!
//! Covers the full operation surface (add/read/update/delete/rename),
//! the index/vault agreement invariant, and recovery from interrupted
//! renames — both through a faulting vault double and through
//! hand-built drift the way a crash would leave it.

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use credkeep::crypto::kdf::KdfParams;
use credkeep::errors::{CredKeepError, Result};
use credkeep::index::NameIndex;
use credkeep::store::CredentialStore;
use credkeep::vault::{EncryptedVault, FileVault};
use tempfile::TempDir;

/// Weak-but-valid Argon2 params so tests stay fast.
fn fast_kdf() -> KdfParams {
    KdfParams {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

/// Helper: open a file-backed store inside `dir`.
fn open_store(dir: &TempDir) -> CredentialStore<FileVault> {
    CredentialStore::open(
        &dir.path().join("secrets.vault"),
        &dir.path().join("secret-index.json"),
        b"test-password",
        Some(&fast_kdf()),
    )
    .expect("open store")
}

// ---------------------------------------------------------------------------
// Add / read / update
// ---------------------------------------------------------------------------

#[test]
fn read_after_add_returns_exact_value() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("CATAPULT_KEY", "ck-secret-123").unwrap();

    assert_eq!(
        store.read("CATAPULT_KEY").unwrap().as_deref(),
        Some("ck-secret-123")
    );
    assert_eq!(store.list(), vec!["CATAPULT_KEY"]);
}

#[test]
fn read_unknown_name_is_none_not_an_error() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    assert!(store.read("NEVER_ADDED").unwrap().is_none());
}

#[test]
fn add_overwrites_existing_value() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("KEY", "first").unwrap();
    store.add("KEY", "second").unwrap();

    assert_eq!(store.read("KEY").unwrap().as_deref(), Some("second"));
    // Still one listing — add is an upsert, not a duplicate.
    assert_eq!(store.list(), vec!["KEY"]);
}

#[test]
fn empty_value_is_rejected_and_state_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("Z", "keep-me").unwrap();

    let result = store.update("Z", "");
    assert!(matches!(result, Err(CredKeepError::InvalidValue(_))));

    // Prior state untouched.
    assert_eq!(store.read("Z").unwrap().as_deref(), Some("keep-me"));
    assert_eq!(store.list(), vec!["Z"]);
}

#[test]
fn empty_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    assert!(store.add("", "value").is_err());
    assert!(store.add("   ", "value").is_err());
    assert!(store.list().is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("DOOMED", "x").unwrap();
    store.add("KEPT", "y").unwrap();

    store.delete("DOOMED").unwrap();
    // Second delete must not error and must not change anything.
    store.delete("DOOMED").unwrap();

    assert!(store.read("DOOMED").unwrap().is_none());
    assert_eq!(store.read("KEPT").unwrap().as_deref(), Some("y"));
    assert_eq!(store.list(), vec!["KEPT"]);
}

#[test]
fn delete_of_never_added_name_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.delete("GHOST").unwrap();
    assert!(store.list().is_empty());
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[test]
fn rename_moves_value_to_new_name() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("A", "x").unwrap();
    store.rename("A", "B").unwrap();

    assert_eq!(store.read("B").unwrap().as_deref(), Some("x"));
    assert!(store.read("A").unwrap().is_none());
    assert_eq!(store.list(), vec!["B"]);
}

#[test]
fn rename_onto_existing_name_fails_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("A", "x").unwrap();
    store.add("B", "y").unwrap();

    let result = store.rename("A", "B");
    assert!(matches!(result, Err(CredKeepError::NameCollision(_))));

    // Both secrets untouched.
    assert_eq!(store.list(), vec!["A", "B"]);
    assert_eq!(store.read("A").unwrap().as_deref(), Some("x"));
    assert_eq!(store.read("B").unwrap().as_deref(), Some("y"));
}

#[test]
fn rename_to_same_name_is_a_noop_success() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("SAME", "value").unwrap();
    store.rename("SAME", "SAME").unwrap();

    assert_eq!(store.read("SAME").unwrap().as_deref(), Some("value"));
    assert_eq!(store.list(), vec!["SAME"]);
}

#[test]
fn rename_of_missing_source_fails_with_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let result = store.rename("MISSING", "TARGET");
    assert!(matches!(result, Err(CredKeepError::SecretNotFound(_))));
    assert!(store.list().is_empty());
}

#[test]
fn rename_to_empty_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("A", "x").unwrap();
    assert!(store.rename("A", "").is_err());
    assert_eq!(store.list(), vec!["A"]);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn list_is_sorted_with_no_duplicates() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("delta", "4").unwrap();
    store.add("ALPHA", "1").unwrap();
    store.add("Charlie", "3").unwrap();
    store.add("beta", "2").unwrap();
    store.add("ALPHA", "1-again").unwrap();

    assert_eq!(store.list(), vec!["ALPHA", "beta", "Charlie", "delta"]);
}

// ---------------------------------------------------------------------------
// Persistence across reopen
// ---------------------------------------------------------------------------

#[test]
fn store_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = open_store(&dir);
        store.add("DB_KEY", "db-secret").unwrap();
        store.add("API_KEY", "api-secret").unwrap();
        store.rename("DB_KEY", "DATABASE_KEY").unwrap();
    }

    let store = open_store(&dir);
    assert_eq!(store.list(), vec!["API_KEY", "DATABASE_KEY"]);
    assert_eq!(
        store.read("DATABASE_KEY").unwrap().as_deref(),
        Some("db-secret")
    );
    assert!(store.read("DB_KEY").unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

#[test]
fn index_matches_vault_after_mixed_operations_and_reconcile() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("A", "1").unwrap();
    store.add("B", "2").unwrap();
    store.update("A", "1b").unwrap();
    store.rename("B", "C").unwrap();
    store.add("D", "4").unwrap();
    store.delete("A").unwrap();

    store.reconcile().unwrap();

    let mut listed = store.list();
    listed.sort();
    let mut vault_keys = store.vault().keys();
    vault_keys.sort();
    assert_eq!(listed, vault_keys);
}

#[test]
fn open_repairs_stale_index_left_by_interrupted_rename() {
    // Build the on-disk state a crash between "delete old from vault"
    // and "update index" would leave: the vault holds only the new
    // name while the index still lists the old one.
    let dir = TempDir::new().unwrap();
    let vault_path = dir.path().join("secrets.vault");
    let index_path = dir.path().join("secret-index.json");

    {
        let mut vault = FileVault::open(&vault_path, b"pw", Some(&fast_kdf())).unwrap();
        vault.put("NEW_NAME", b"the-value").unwrap();
        vault.persist().unwrap();

        let index = NameIndex::load(&index_path).unwrap();
        index.add("OLD_NAME").unwrap();
    }

    // Opening the store runs reconcile.
    let store =
        CredentialStore::open(&vault_path, &index_path, b"pw", Some(&fast_kdf())).unwrap();

    assert_eq!(store.list(), vec!["NEW_NAME"]);
    assert_eq!(store.read("NEW_NAME").unwrap().as_deref(), Some("the-value"));
}

#[test]
fn reconcile_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    store.add("A", "1").unwrap();
    store.reconcile().unwrap();
    store.reconcile().unwrap();

    assert_eq!(store.list(), vec!["A"]);
}

// ---------------------------------------------------------------------------
// Interrupted rename through a faulting vault
// ---------------------------------------------------------------------------

/// In-memory vault whose `delete` fails while a shared flag is set,
/// standing in for a crash after the new name was written but before
/// the old one was removed.
struct FlakyVault {
    entries: BTreeMap<String, Vec<u8>>,
    fail_delete: Arc<AtomicBool>,
}

impl FlakyVault {
    fn new(fail_delete: Arc<AtomicBool>) -> Self {
        Self {
            entries: BTreeMap::new(),
            fail_delete,
        }
    }
}

impl EncryptedVault for FlakyVault {
    fn put(&mut self, name: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(name.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.entries.get(name).cloned()
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        if self.fail_delete.swap(false, Ordering::SeqCst) {
            return Err(CredKeepError::Io(io::Error::new(
                io::ErrorKind::Other,
                "simulated interruption",
            )));
        }
        self.entries.remove(name);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn interrupted_rename_never_loses_the_value() {
    let dir = TempDir::new().unwrap();
    let index = NameIndex::load(&dir.path().join("secret-index.json")).unwrap();

    let fail_delete = Arc::new(AtomicBool::new(false));
    let mut store =
        CredentialStore::new(FlakyVault::new(Arc::clone(&fail_delete)), index).unwrap();
    store.add("A", "precious").unwrap();

    // Fail the delete-old step: rename errors after the value was
    // already written under the new name.
    fail_delete.store(true, Ordering::SeqCst);
    assert!(store.rename("A", "B").is_err());

    // The value exists under both names — recoverable, never lost.
    assert_eq!(store.read("A").unwrap().as_deref(), Some("precious"));
    assert_eq!(store.read("B").unwrap().as_deref(), Some("precious"));

    // The index never heard about B; reconcile repairs the listing.
    assert_eq!(store.list(), vec!["A"]);
    store.reconcile().unwrap();
    assert_eq!(store.list(), vec!["A", "B"]);
}
