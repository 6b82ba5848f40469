//! Debounced local snapshot of the editing session.
//!
//! The snapshot is three independent blobs (content, style, section order)
//! so a damaged one only resets its own part of the document.

use crate::document::{ResumeData, ResumeDocument};
use crate::sections::SectionOrder;
use crate::storage::{SnapshotCache, StorageError, StorageResult};
use crate::style::StyleConfiguration;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Quiet period after the last edit before the snapshot is written.
pub const DEFAULT_DEBOUNCE_MILLIS: u64 = 1000;

/// Cache key of the resume content.
pub const DATA_KEY: &str = "vitae.data";
/// Cache key of the style configuration.
pub const CONFIG_KEY: &str = "vitae.config";
/// Cache key of the section order.
pub const SECTION_ORDER_KEY: &str = "vitae.sectionOrder";

fn read_part<T, C>(cache: &C, key: &str) -> T
where
    T: DeserializeOwned + Default,
    C: SnapshotCache + ?Sized,
{
    match cache.read(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable snapshot {}: {}", key, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Failed to read snapshot {}: {}", key, e);
            T::default()
        }
    }
}

/// Read the cached snapshot; each missing or unreadable part falls back to its default.
pub fn load_snapshot<C: SnapshotCache + ?Sized>(cache: &C) -> ResumeDocument {
    ResumeDocument::new(
        read_part::<ResumeData, _>(cache, DATA_KEY),
        read_part::<StyleConfiguration, _>(cache, CONFIG_KEY),
        read_part::<SectionOrder, _>(cache, SECTION_ORDER_KEY),
    )
}

/// Write all three parts of the snapshot.
pub fn write_snapshot<C: SnapshotCache + ?Sized>(cache: &C, document: &ResumeDocument) -> StorageResult<()> {
    let to_json = |value: Result<String, serde_json::Error>| value.map_err(|e| StorageError::Serialization(e.to_string()));

    cache.write(DATA_KEY, &to_json(serde_json::to_string(&document.data))?)?;
    cache.write(CONFIG_KEY, &to_json(serde_json::to_string(&document.config))?)?;
    cache.write(SECTION_ORDER_KEY, &to_json(serde_json::to_string(&document.section_order))?)?;
    Ok(())
}

/// Writes the snapshot once edits have settled.
pub struct AutoSaver<C: SnapshotCache> {
    /// Snapshot cache backend.
    cache: Arc<C>,
    /// Quiet period required after the last edit.
    debounce: Duration,
    /// Time of the most recent edit.
    last_change: Option<Instant>,
    /// Whether the document has unsaved changes.
    dirty: bool,
    /// Read-only sessions (opened from a share link) never write.
    read_only: bool,
}

impl<C: SnapshotCache> AutoSaver<C> {
    /// Create an auto-saver with the default debounce.
    pub fn new(cache: Arc<C>) -> Self {
        Self {
            cache,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MILLIS),
            last_change: None,
            dirty: false,
            read_only: false,
        }
    }

    /// Set the debounce interval.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Enable or disable read-only mode.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Record an edit. Restarts the debounce window.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.last_change = Some(Instant::now());
    }

    /// Check if the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True once the document is dirty and no edit happened for the debounce interval.
    pub fn should_save(&self) -> bool {
        if !self.dirty || self.read_only {
            return false;
        }

        match self.last_change {
            Some(last) => last.elapsed() >= self.debounce,
            None => true,
        }
    }

    /// Save the snapshot if edits have settled. Returns true if a save happened.
    pub fn maybe_save(&mut self, document: &ResumeDocument) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(document)?;
        Ok(true)
    }

    /// Save the snapshot immediately (ignored in read-only mode).
    pub fn save(&mut self, document: &ResumeDocument) -> StorageResult<()> {
        if self.read_only {
            log::debug!("Skipping snapshot write in read-only mode");
            return Ok(());
        }

        write_snapshot(self.cache.as_ref(), document)?;
        self.dirty = false;
        Ok(())
    }

    /// Load the cached snapshot.
    pub fn load(&mut self) -> ResumeDocument {
        self.dirty = false;
        load_snapshot(self.cache.as_ref())
    }

    /// Get a reference to the cache backend.
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }
}
