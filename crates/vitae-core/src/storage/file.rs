//! File-based storage implementation for native platforms.

use super::{BoxFuture, DocumentStore, SnapshotCache, StorageError, StorageResult};
use crate::document::ResumeDocument;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-based storage for native platforms.
///
/// Shared documents are JSON files under `documents/`, snapshot blobs are
/// files under `cache/`.
pub struct FileStore {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store with the given base directory.
    ///
    /// Creates the directory layout if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        for dir in [base_path.join("documents"), base_path.join("cache")] {
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(|e| {
                    StorageError::Io(format!("Failed to create storage directory {}: {}", dir.display(), e))
                })?;
            }
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/vitae/`
    /// On Windows: `%LOCALAPPDATA%\vitae\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("vitae"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, id: &str) -> StorageResult<PathBuf> {
        check_id(id)?;
        Ok(self.base_path.join("documents").join(format!("{id}.json")))
    }

    fn blob_path(&self, key: &str) -> StorageResult<PathBuf> {
        check_id(key)?;
        Ok(self.base_path.join("cache").join(format!("{key}.json")))
    }

    /// Write a new document file, failing if one already exists.
    fn write_new(&self, id: String, document: &ResumeDocument) -> StorageResult<String> {
        let path = self.document_path(&id)?;
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(id.clone()),
                _ => StorageError::Io(format!("Failed to create {}: {}", path.display(), e)),
            })?;
        file.write_all(json.as_bytes())
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(id)
    }
}

/// Ids are used verbatim as file stems, so only names that map to exactly
/// one file inside the store are accepted.
fn check_id(id: &str) -> StorageResult<()> {
    let valid = !id.is_empty()
        && !id.starts_with('.')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid { Ok(()) } else { Err(StorageError::InvalidId(id.to_string())) }
}

impl DocumentStore for FileStore {
    fn create(&self, document: &ResumeDocument) -> BoxFuture<'_, StorageResult<String>> {
        let result = self.write_new(Uuid::new_v4().simple().to_string(), document);
        Box::pin(async move { result })
    }

    fn create_with_id(&self, id: &str, document: &ResumeDocument) -> BoxFuture<'_, StorageResult<String>> {
        let result = self.write_new(id.to_string(), document);
        Box::pin(async move { result })
    }

    fn fetch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<ResumeDocument>>> {
        let path = self.document_path(id);

        Box::pin(async move {
            // No file can exist under an id that is not a valid file stem.
            let Ok(path) = path else {
                return Ok(None);
            };
            if !path.exists() {
                return Ok(None);
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

            ResumeDocument::from_json(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e)))
        })
    }
}

impl SnapshotCache for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.blob_path(key)?;
        fs::write(&path, value).map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_create_fetch() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let doc = ResumeDocument::sample();

        let id = block_on(store.create(&doc)).unwrap();
        let loaded = block_on(store.fetch(&id)).unwrap();

        assert_eq!(loaded, Some(doc));
    }

    #[test]
    fn test_file_store_fetch_missing() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(block_on(store.fetch("nonexistent")).unwrap(), None);
    }

    #[test]
    fn test_file_store_create_with_taken_id() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let doc = ResumeDocument::default();

        block_on(store.create_with_id("alex", &doc)).unwrap();
        let result = block_on(store.create_with_id("alex", &doc));

        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn test_file_store_corrupt_document() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("documents").join("bad.json"), "not json").unwrap();

        let result = block_on(store.fetch("bad"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_store_rejects_ids_outside_file_stems() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let doc = ResumeDocument::sample();

        for id in ["../escape/attempt", "a/b", "", ".hidden", "..", "caf\u{e9}"] {
            let result = block_on(store.create_with_id(id, &doc));
            assert!(matches!(result, Err(StorageError::InvalidId(_))), "{id:?}");
            assert_eq!(block_on(store.fetch(id)).unwrap(), None);
        }
        assert!(fs::read_dir(dir.path().join("documents")).unwrap().next().is_none());
    }

    #[test]
    fn test_file_store_distinct_ids_stay_distinct() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let mut other = ResumeDocument::sample();
        other.data.personal.name = "Sam Lee".to_string();

        block_on(store.create_with_id("a_b", &ResumeDocument::sample())).unwrap();
        assert!(block_on(store.create_with_id("a/b", &other)).is_err());
        block_on(store.create_with_id("a-b", &other)).unwrap();

        assert_eq!(block_on(store.fetch("a_b")).unwrap(), Some(ResumeDocument::sample()));
        assert_eq!(block_on(store.fetch("a-b")).unwrap(), Some(other));
        assert_eq!(block_on(store.fetch("a/b")).unwrap(), None);
    }

    #[test]
    fn test_file_store_snapshot_blobs() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.read("vitae.config").unwrap(), None);
        store.write("vitae.config", "{\"themeColor\":\"teal\"}").unwrap();
        assert_eq!(
            store.read("vitae.config").unwrap().as_deref(),
            Some("{\"themeColor\":\"teal\"}")
        );
    }
}
