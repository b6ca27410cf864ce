//! One-way JSON exporters for the reporting pipeline.
//!
//! The Python side reads two files from the export directory:
//! `secrets.json` (credential name → value) and `app-config.json`
//! (vendor endpoint table). Both are written pretty-printed and
//! atomically; there is no read-back contract.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::endpoints;
use crate::errors::{CredKeepError, Result};
use crate::store::CredentialStore;
use crate::vault::EncryptedVault;

/// Serialize `value` as pretty JSON and write it atomically.
///
/// Parent directories are created as needed. Refuses to write over a
/// `.vault` file.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("vault"))
    {
        return Err(CredKeepError::CommandFailed(
            "refusing to export over a .vault file".into(),
        ));
    }

    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| CredKeepError::SerializationError(format!("JSON export: {e}")))?;
    json.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Export every credential to `path` as a name → value JSON object.
///
/// Names come from the index, values from the vault; a listed name
/// with no vault entry (mid-repair drift) is skipped rather than
/// exported as a hole. Returns the number of credentials written.
pub fn export_secrets<V: EncryptedVault>(
    store: &CredentialStore<V>,
    path: &Path,
) -> Result<usize> {
    let mut map = BTreeMap::new();
    for name in store.list() {
        if let Some(value) = store.read(&name)? {
            map.insert(name, value);
        }
    }

    write_json_file(path, &map)?;
    tracing::debug!(path = %path.display(), count = map.len(), "exported secrets");
    Ok(map.len())
}

/// Export the static endpoint table to `path`.
pub fn export_endpoints(path: &Path) -> Result<()> {
    write_json_file(path, &endpoints::as_map())
}
