//! Editing session: the document being edited and whether it may be edited.

use crate::document::ResumeDocument;
use crate::registry::StyleRegistry;
use crate::share::document_id_from_link;
use crate::storage::{DocumentStore, SnapshotCache, load_snapshot};
use crate::template::apply_template;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("This resume was opened from a share link and is read-only")]
    ReadOnly,
}

/// How the session's document was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Seeded from the local snapshot cache (or defaults).
    Local,
    /// Fetched from the document store through a share link.
    Shared { id: String },
}

/// One user's editing session.
///
/// Owns the document exclusively; every edit goes through [`Session::edit`],
/// which refuses changes to shared (read-only) documents.
#[derive(Debug, Clone)]
pub struct Session {
    document: ResumeDocument,
    origin: SessionOrigin,
    /// User-facing message from startup (e.g. a share link that failed to open).
    notice: Option<String>,
}

impl Session {
    /// An editable session over `document`.
    pub fn local(document: ResumeDocument) -> Self {
        Self {
            document,
            origin: SessionOrigin::Local,
            notice: None,
        }
    }

    /// A read-only session over a fetched shared document.
    pub fn shared(id: impl Into<String>, document: ResumeDocument) -> Self {
        Self {
            document,
            origin: SessionOrigin::Shared { id: id.into() },
            notice: None,
        }
    }

    /// Start a session.
    ///
    /// If `link` carries a document id, the document is fetched and the
    /// session becomes read-only. When there is no id, or the fetch fails or
    /// finds nothing, the session is seeded from `cache` (falling back to
    /// defaults) and a notice explains what happened.
    pub async fn open<S, C>(link: Option<&str>, store: &S, cache: &C) -> Self
    where
        S: DocumentStore + ?Sized,
        C: SnapshotCache + ?Sized,
    {
        let Some(id) = link.and_then(document_id_from_link) else {
            return Self::local(load_snapshot(cache));
        };

        let notice = match store.fetch(&id).await {
            Ok(Some(document)) => {
                log::info!("Opened shared resume {}", id);
                return Self::shared(id, document);
            }
            Ok(None) => {
                log::warn!("Shared resume {} not found", id);
                format!("The shared resume \"{}\" could not be found.", id)
            }
            Err(e) => {
                log::warn!("Failed to fetch shared resume {}: {}", id, e);
                format!("The shared resume \"{}\" could not be loaded: {}", id, e)
            }
        };

        let mut session = Self::local(load_snapshot(cache));
        session.notice = Some(notice);
        session
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn origin(&self) -> &SessionOrigin {
        &self.origin
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.origin, SessionOrigin::Shared { .. })
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the startup notice.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Apply an edit to the document.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut ResumeDocument) -> R) -> Result<R, SessionError> {
        if self.is_read_only() {
            return Err(SessionError::ReadOnly);
        }
        Ok(f(&mut self.document))
    }

    /// Apply a template preset to the style configuration.
    pub fn apply_template(&mut self, key: &str, registry: &StyleRegistry) -> Result<(), SessionError> {
        self.edit(|document| document.config = apply_template(&document.config, key, registry))
    }

    /// Copy a shared document into an editable local session.
    pub fn into_editable(self) -> Self {
        Self::local(self.document)
    }
}
