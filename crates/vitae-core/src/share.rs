//! Publishing a resume as a read-only share link.

use crate::document::ResumeDocument;
use crate::storage::{DocumentStore, StorageError};
use thiserror::Error;
use url::Url;

/// Largest serialized document accepted for sharing.
///
/// The photo is embedded as a data URI, so this is mostly a photo size limit;
/// it sits just under the store's 1 MB document limit.
pub const MAX_SHARE_BYTES: usize = 950_000;

/// Query parameter carrying the document id in share links.
pub const LINK_QUERY_KEY: &str = "id";

/// Path segments that introduce a document id (`/r/<id>`).
const LINK_PATH_MARKERS: &[&str] = &["r", "share"];

/// Base used to resolve relative links such as `/r/alex` or `?id=alex`.
const RELATIVE_LINK_BASE: &str = "http://localhost/";

/// Errors reported to the user by the share flow.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Profile is too large to share ({size} bytes, limit {limit}). Try a smaller photo.")]
    TooLarge { size: usize, limit: usize },
    #[error("The link name \"{0}\" is already taken")]
    SlugTaken(String),
    #[error("The link name must contain letters or digits")]
    InvalidSlug,
    #[error("Could not prepare profile: {0}")]
    Serialization(String),
    #[error("Could not save profile: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ShareError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::AlreadyExists(id) => ShareError::SlugTaken(id),
            other => ShareError::Storage(other),
        }
    }
}

/// Normalize a user-chosen link name; `None` if nothing usable remains.
pub fn normalize_slug(raw: &str) -> Option<String> {
    let slug = slug::slugify(raw);
    (!slug.is_empty()).then_some(slug)
}

/// Check that a document may be shared and return its serialized size.
pub fn check_share_size(document: &ResumeDocument) -> Result<usize, ShareError> {
    let size = document
        .serialized_size()
        .map_err(|e| ShareError::Serialization(e.to_string()))?;
    if size > MAX_SHARE_BYTES {
        return Err(ShareError::TooLarge {
            size,
            limit: MAX_SHARE_BYTES,
        });
    }
    Ok(size)
}

/// Store `document` and return the id it can be fetched by.
///
/// With a `slug`, the document is stored under the normalized slug and
/// fails if that name is taken; otherwise the store picks the id. Oversized
/// documents are rejected before the store is contacted.
pub async fn share_document<S>(store: &S, document: &ResumeDocument, slug: Option<&str>) -> Result<String, ShareError>
where
    S: DocumentStore + ?Sized,
{
    let size = check_share_size(document)?;

    let id = match slug {
        Some(raw) => {
            let slug = normalize_slug(raw).ok_or(ShareError::InvalidSlug)?;
            store.create_with_id(&slug, document).await?
        }
        None => store.create(document).await?,
    };

    log::info!("Shared document as {} ({} bytes)", id, size);
    Ok(id)
}

/// Share link for `id` under `base` (e.g. the app's public URL).
pub fn share_link(base: &Url, id: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair(LINK_QUERY_KEY, id);
    url
}

/// Extract the document id from a share link.
///
/// Accepts `?id=<id>` (or `?share=<id>`) and `/r/<id>` forms, absolute or relative.
pub fn document_id_from_link(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let url = Url::parse(link)
        .or_else(|_| Url::parse(RELATIVE_LINK_BASE).and_then(|base| base.join(link)))
        .ok()?;

    if let Some((_, id)) = url
        .query_pairs()
        .find(|(key, value)| (key == LINK_QUERY_KEY || key == "share") && !value.is_empty())
    {
        return Some(id.into_owned());
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|segment| !segment.is_empty()).collect();
    segments
        .windows(2)
        .find(|pair| LINK_PATH_MARKERS.contains(&pair[0]))
        .map(|pair| pair[1].to_string())
}
