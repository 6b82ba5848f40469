//! Tolerant deserialization helpers.
//!
//! Stored and shared documents come from older builds and hand edits. A
//! single unreadable value must not discard the rest of the document, so
//! these helpers replace it with a default (or drop it from a list) and log
//! at debug level.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A value that either parsed as `T` or was skipped.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Lenient<T> {
    /// The parsed value, if any.
    pub(crate) fn into_valid(self, what: &str) -> Option<T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => {
                log::debug!("Ignoring unreadable {what} value");
                None
            }
        }
    }
}

/// `null` or a value of the wrong shape becomes `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Option::<Lenient<T>>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| value.into_valid(std::any::type_name::<T>()))
        .unwrap_or_default())
}

/// `null` or a value of the wrong shape becomes `true`.
pub(crate) fn or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Lenient<bool>>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.into_valid("flag")).unwrap_or(true))
}

/// A list whose unreadable items are dropped. A non-list reads as empty.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Vec<Lenient<T>> = or_default(deserializer)?;
    let total = items.len();
    let kept: Vec<T> = items.into_iter().filter_map(|item| item.into_valid("list item")).collect();
    if kept.len() < total {
        log::debug!("Dropped {} of {} list items", total - kept.len(), total);
    }
    Ok(kept)
}

/// A string-keyed map whose unreadable values are dropped. A non-map reads as empty.
pub(crate) fn map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries: BTreeMap<String, Lenient<T>> = or_default(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| value.into_valid("map value").map(|value| (key, value)))
        .collect())
}
