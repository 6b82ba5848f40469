//! Browser `localStorage` snapshot cache for WebAssembly.

use super::{SnapshotCache, StorageError, StorageResult};

/// Snapshot cache backed by `window.localStorage`.
///
/// Not Send/Sync: WASM is single-threaded and the storage handle is a JS object.
pub struct LocalStorageCache {
    storage: web_sys::Storage,
}

impl LocalStorageCache {
    /// Open the page's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl SnapshotCache for LocalStorageCache {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
    }
}
