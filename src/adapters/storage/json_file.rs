//! JSON document helpers shared by the file-backed adapters.
//!
//! Writes use write-to-temporary then rename, so readers see either the
//! previous document or the new one, never a partial write.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::StorageError;

/// Read a JSON array document.
///
/// Returns `None` if the file does not exist or its top-level value is not
/// an array.
pub(super) async fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::unavailable(path, e)),
    };

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| StorageError::corrupt(path, e))?;
    if !value.is_array() {
        tracing::warn!(path = %path.display(), "Stored document is not an array, treating as empty");
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| StorageError::corrupt(path, e))
}

/// Replace `path` with `value` serialized as pretty JSON.
///
/// The document is written and synced to `<path>.tmp`, then renamed over
/// `path`. On failure the previous document is left as it was.
pub(super) async fn write_atomically<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| StorageError::corrupt(path, e))?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::unavailable(path, format!("failed to create directory: {}", e)))?;
    }

    let temp_path = temp_path(path);
    if let Err(e) = write_synced(&temp_path, &bytes).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StorageError::unavailable(path, format!("failed to write temporary file: {}", e)));
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StorageError::unavailable(path, format!("failed to replace file: {}", e)));
    }

    Ok(())
}

/// Temporary sibling used for atomic replacement: `<path>.tmp`.
pub(super) fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
