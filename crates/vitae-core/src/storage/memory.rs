//! In-memory storage implementation.

use super::{BoxFuture, DocumentStore, SnapshotCache, StorageError, StorageResult};
use crate::document::ResumeDocument;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory document store and snapshot cache for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, ResumeDocument>>,
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    fn insert_new(&self, id: String, document: ResumeDocument) -> StorageResult<String> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        if docs.contains_key(&id) {
            return Err(StorageError::AlreadyExists(id));
        }
        docs.insert(id.clone(), document);
        Ok(id)
    }
}

impl DocumentStore for MemoryStore {
    fn create(&self, document: &ResumeDocument) -> BoxFuture<'_, StorageResult<String>> {
        let document = document.clone();
        Box::pin(async move { self.insert_new(Uuid::new_v4().simple().to_string(), document) })
    }

    fn create_with_id(&self, id: &str, document: &ResumeDocument) -> BoxFuture<'_, StorageResult<String>> {
        let id = id.to_string();
        let document = document.clone();
        Box::pin(async move { self.insert_new(id, document) })
    }

    fn fetch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<ResumeDocument>>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self
                .documents
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(docs.get(&id).cloned())
        })
    }
}

impl SnapshotCache for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_create_and_fetch() {
        let store = MemoryStore::new();
        let doc = ResumeDocument::sample();

        let id = block_on(store.create(&doc)).unwrap();
        let loaded = block_on(store.fetch(&id)).unwrap();

        assert_eq!(loaded, Some(doc));
    }

    #[test]
    fn test_create_generates_distinct_ids() {
        let store = MemoryStore::new();
        let doc = ResumeDocument::default();

        let first = block_on(store.create(&doc)).unwrap();
        let second = block_on(store.create(&doc)).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.document_count(), 2);
    }

    #[test]
    fn test_create_with_id_rejects_taken_id() {
        let store = MemoryStore::new();
        let doc = ResumeDocument::default();

        assert_eq!(block_on(store.create_with_id("jane-doe", &doc)).unwrap(), "jane-doe");
        let result = block_on(store.create_with_id("jane-doe", &doc));

        assert!(matches!(result, Err(StorageError::AlreadyExists(id)) if id == "jane-doe"));
    }

    #[test]
    fn test_fetch_missing() {
        let store = MemoryStore::new();
        assert_eq!(block_on(store.fetch("nonexistent")).unwrap(), None);
    }

    #[test]
    fn test_snapshot_blobs() {
        let store = MemoryStore::new();

        assert_eq!(store.read("vitae.data").unwrap(), None);
        store.write("vitae.data", "{}").unwrap();
        store.write("vitae.data", "{\"skills\":[]}").unwrap();
        assert_eq!(store.read("vitae.data").unwrap().as_deref(), Some("{\"skills\":[]}"));
    }
}
