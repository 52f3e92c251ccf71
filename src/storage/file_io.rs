//! Record files
//!
//! Each entity kind lives in one pretty-printed JSON array. A missing or blank
//! file holds no records. Saves go through a sibling `<name>.tmp` file that is
//! synced and renamed over the target, so a crash leaves the old array intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BillingError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> BillingError {
    BillingError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Sibling path used while a save is in flight
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load the records stored at `path`
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, BillingError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(storage_error("read", path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace the records stored at `path`
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), BillingError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create", dir, e))?;
    }

    let mut json =
        serde_json::to_vec_pretty(records).map_err(|e| storage_error("serialize", path, e))?;
    json.push(b'\n');

    let staging = staging_path(path);
    let written = fs::File::create(&staging).and_then(|mut file| {
        file.write_all(&json)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(storage_error("write", path, e));
    }

    Ok(())
}
