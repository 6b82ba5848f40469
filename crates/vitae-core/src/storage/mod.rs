//! Persistence seams: the shared document store and the local snapshot cache.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod web;

pub use autosave::{
    AutoSaver, CONFIG_KEY, DATA_KEY, DEFAULT_DEBOUNCE_MILLIS, SECTION_ORDER_KEY, load_snapshot,
    write_snapshot,
};
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageCache;

use crate::document::ResumeDocument;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid document id: {0:?}")]
    InvalidId(String),
    #[error("Document id already taken: {0}")]
    AlreadyExists(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Key/value store for shared resume documents.
///
/// Editing sessions are single-threaded, so implementations need not be
/// `Send`; futures are boxed so the trait stays object safe.
pub trait DocumentStore {
    /// Store a document under a store-generated id and return that id.
    fn create(&self, document: &ResumeDocument) -> BoxFuture<'_, StorageResult<String>>;

    /// Store a document under `id`, failing with [`StorageError::AlreadyExists`] if taken.
    fn create_with_id(&self, id: &str, document: &ResumeDocument) -> BoxFuture<'_, StorageResult<String>>;

    /// Fetch a document; `Ok(None)` when no document has that id.
    fn fetch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<ResumeDocument>>>;
}

/// Local key/value cache holding the editing snapshot as string blobs.
pub trait SnapshotCache {
    /// Read a blob; `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write (replace) a blob.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
