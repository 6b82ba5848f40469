//! Section ordering and visibility.
//!
//! All operations are pure: they take the current order (and data, where
//! custom sections are involved) and return new values. Custom sections
//! live in two places, an order entry and a `data.custom` entry; the
//! functions here are the only path that creates, renames or removes
//! them, so the two never drift apart.

use crate::document::{CustomSection, ResumeData};
use crate::lenient;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label given to a freshly added custom section.
pub const NEW_CUSTOM_SECTION_LABEL: &str = "New Custom Section";

/// Prefix of generated custom section ids.
pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// The built-in sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardSection {
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
    Community,
}

impl StandardSection {
    /// Section id as stored in the order.
    pub fn id(self) -> &'static str {
        match self {
            StandardSection::Summary => "summary",
            StandardSection::Experience => "experience",
            StandardSection::Education => "education",
            StandardSection::Skills => "skills",
            StandardSection::Achievements => "achievements",
            StandardSection::Community => "community",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|section| section.id() == id)
    }

    /// Heading shown when the order entry carries no label.
    pub fn default_label(self) -> &'static str {
        match self {
            StandardSection::Summary => "Professional Summary",
            StandardSection::Experience => "Experience",
            StandardSection::Education => "Education",
            StandardSection::Skills => "Skills",
            StandardSection::Achievements => "Achievements",
            StandardSection::Community => "Community",
        }
    }

    pub fn all() -> &'static [StandardSection] {
        &[
            StandardSection::Summary,
            StandardSection::Experience,
            StandardSection::Education,
            StandardSection::Skills,
            StandardSection::Achievements,
            StandardSection::Community,
        ]
    }
}

/// Whether an order entry refers to a built-in or a user-created section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Standard,
    Custom,
}

fn default_visible() -> bool {
    true
}

/// One row of the section order.
///
/// Only `id` is required; an unreadable label, flag or kind takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub label: String,
    #[serde(default = "default_visible", deserialize_with = "lenient::or_true")]
    pub visible: bool,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    pub kind: SectionKind,
}

impl SectionEntry {
    /// A visible entry for a built-in section.
    pub fn standard(section: StandardSection) -> Self {
        Self {
            id: section.id().to_string(),
            label: section.default_label().to_string(),
            visible: true,
            kind: SectionKind::Standard,
        }
    }

    /// A visible entry for a custom section.
    pub fn custom(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible: true,
            kind: SectionKind::Custom,
        }
    }

    /// The built-in section this entry refers to, if any.
    pub fn standard_section(&self) -> Option<StandardSection> {
        match self.kind {
            SectionKind::Standard => StandardSection::from_id(&self.id),
            SectionKind::Custom => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.kind == SectionKind::Custom
    }
}

/// Ordered, visibility-flagged list of sections. Entries without an id are dropped on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionOrder(#[serde(deserialize_with = "lenient::list")] Vec<SectionEntry>);

impl Default for SectionOrder {
    fn default() -> Self {
        Self(StandardSection::all().iter().copied().map(SectionEntry::standard).collect())
    }
}

impl From<Vec<SectionEntry>> for SectionOrder {
    fn from(entries: Vec<SectionEntry>) -> Self {
        Self(entries)
    }
}

impl SectionOrder {
    pub fn entries(&self) -> &[SectionEntry] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionEntry> {
        self.0.iter()
    }

    /// Visible entries, in order.
    pub fn visible(&self) -> impl Iterator<Item = &SectionEntry> {
        self.0.iter().filter(|entry| entry.visible)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SectionEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|entry| entry.id == id)
    }

    /// Move the entry at `from` to index `to`, shifting the others.
    ///
    /// Out-of-range indices and `from == to` leave the order unchanged.
    #[must_use]
    pub fn reorder(&self, from: usize, to: usize) -> Self {
        let mut entries = self.0.clone();
        if from != to && from < entries.len() && to < entries.len() {
            let entry = entries.remove(from);
            entries.insert(to, entry);
        }
        Self(entries)
    }

    /// Flip the visibility of the entry with `id`. Unknown ids change nothing.
    #[must_use]
    pub fn toggle_visibility(&self, id: &str) -> Self {
        let mut entries = self.0.clone();
        if let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) {
            entry.visible = !entry.visible;
        }
        Self(entries)
    }

    /// Problems where order entries and custom data disagree.
    pub fn consistency_issues(&self, data: &ResumeData) -> Vec<ConsistencyIssue> {
        let mut issues: Vec<ConsistencyIssue> = self
            .0
            .iter()
            .filter(|entry| entry.is_custom() && !data.custom.contains_key(&entry.id))
            .map(|entry| ConsistencyIssue::MissingCustomData(entry.id.clone()))
            .collect();
        issues.extend(
            data.custom
                .keys()
                .filter(|id| !self.0.iter().any(|entry| entry.is_custom() && &entry.id == *id))
                .map(|id| ConsistencyIssue::UnlistedCustomData(id.clone())),
        );
        issues
    }
}

/// A disagreement between the section order and the custom section data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// A custom order entry with no `data.custom` content.
    MissingCustomData(String),
    /// `data.custom` content with no order entry.
    UnlistedCustomData(String),
}

/// Generate a custom section id not used by the order or the data.
fn fresh_custom_id(order: &SectionOrder, data: &ResumeData) -> String {
    loop {
        let id = format!("{}{}", CUSTOM_ID_PREFIX, Uuid::new_v4().simple());
        if order.get(&id).is_none() && !data.custom.contains_key(&id) {
            return id;
        }
    }
}

/// Append a new, empty custom section.
///
/// Returns the new order, the new data and the generated id.
pub fn add_custom_section(order: &SectionOrder, data: &ResumeData) -> (SectionOrder, ResumeData, String) {
    let id = fresh_custom_id(order, data);

    let mut entries = order.0.clone();
    entries.push(SectionEntry::custom(id.clone(), NEW_CUSTOM_SECTION_LABEL));

    let mut data = data.clone();
    data.custom.insert(
        id.clone(),
        CustomSection {
            title: NEW_CUSTOM_SECTION_LABEL.to_string(),
            content: String::new(),
        },
    );

    log::debug!("added custom section {id}");
    (SectionOrder(entries), data, id)
}

/// Remove a custom section from both the order and the data.
///
/// Standard sections cannot be deleted; their ids are ignored here.
pub fn delete_custom_section(order: &SectionOrder, data: &ResumeData, id: &str) -> (SectionOrder, ResumeData) {
    let mut entries = order.0.clone();
    entries.retain(|entry| !(entry.is_custom() && entry.id == id));

    let mut data = data.clone();
    if StandardSection::from_id(id).is_none() {
        data.custom.remove(id);
    }

    (SectionOrder(entries), data)
}

/// Set a custom section's title, keeping the order label identical.
///
/// Ids without a custom order entry are left alone.
pub fn rename_custom_section(
    order: &SectionOrder,
    data: &ResumeData,
    id: &str,
    title: &str,
) -> (SectionOrder, ResumeData) {
    let mut entries = order.0.clone();
    let Some(entry) = entries.iter_mut().find(|entry| entry.is_custom() && entry.id == id) else {
        return (order.clone(), data.clone());
    };
    entry.label = title.to_string();

    let mut data = data.clone();
    data.custom.entry(id.to_string()).or_default().title = title.to_string();

    (SectionOrder(entries), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(order: &SectionOrder) -> Vec<&str> {
        order.iter().map(|entry| entry.id.as_str()).collect()
    }

    #[test]
    fn test_default_order() {
        let order = SectionOrder::default();
        assert_eq!(
            ids(&order),
            vec!["summary", "experience", "education", "skills", "achievements", "community"]
        );
        assert!(order.iter().all(|entry| entry.visible));
    }

    #[test]
    fn test_reorder_moves_one_entry() {
        let order = SectionOrder::default();
        let moved = order.reorder(0, 3);
        assert_eq!(
            ids(&moved),
            vec!["experience", "education", "skills", "summary", "achievements", "community"]
        );
    }

    #[test]
    fn test_reorder_out_of_bounds_is_noop() {
        let order = SectionOrder::default();
        assert_eq!(order.reorder(2, 6), order);
        assert_eq!(order.reorder(9, 0), order);
        assert_eq!(order.reorder(3, 3), order);
    }

    #[test]
    fn test_toggle_visibility_flips_one_entry() {
        let order = SectionOrder::default();
        let toggled = order.toggle_visibility("skills");

        assert!(!toggled.get("skills").unwrap().visible);
        assert_eq!(ids(&toggled), ids(&order));
        assert_eq!(toggled.iter().filter(|entry| !entry.visible).count(), 1);
        assert_eq!(toggled.toggle_visibility("skills"), order);
        assert_eq!(order.toggle_visibility("nope"), order);
    }

    #[test]
    fn test_add_custom_section_writes_both_sides() {
        let order = SectionOrder::default();
        let data = ResumeData::default();

        let (new_order, new_data, id) = add_custom_section(&order, &data);

        assert!(id.starts_with(CUSTOM_ID_PREFIX));
        let entry = new_order.entries().last().unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.label, NEW_CUSTOM_SECTION_LABEL);
        assert!(entry.visible);
        assert_eq!(entry.kind, SectionKind::Custom);
        assert_eq!(new_data.custom[&id].title, NEW_CUSTOM_SECTION_LABEL);
        assert!(new_data.custom[&id].content.is_empty());
    }

    #[test]
    fn test_add_then_delete_restores_state() {
        let mut data = ResumeData::default();
        data.custom.insert(
            "custom-old".to_string(),
            CustomSection {
                title: "Old".to_string(),
                content: "kept".to_string(),
            },
        );
        let mut entries = SectionOrder::default().entries().to_vec();
        entries.insert(2, SectionEntry::custom("custom-old", "Old"));
        let order = SectionOrder::from(entries);

        let (added_order, added_data, id) = add_custom_section(&order, &data);
        let (order_after, data_after) = delete_custom_section(&added_order, &added_data, &id);

        assert_eq!(order_after, order);
        assert_eq!(data_after, data);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let (order, data, first) = add_custom_section(&SectionOrder::default(), &ResumeData::default());
        let (_, _, second) = add_custom_section(&order, &data);
        assert_ne!(first, second);
    }

    #[test]
    fn test_delete_ignores_standard_sections() {
        let order = SectionOrder::default();
        let data = ResumeData::default();
        let (new_order, new_data) = delete_custom_section(&order, &data, "experience");

        assert_eq!(new_order, order);
        assert_eq!(new_data, data);
    }

    #[test]
    fn test_rename_updates_label_and_title() {
        let (order, data, id) = add_custom_section(&SectionOrder::default(), &ResumeData::default());
        let (order, data) = rename_custom_section(&order, &data, &id, "Publications");

        assert_eq!(order.get(&id).unwrap().label, "Publications");
        assert_eq!(data.custom[&id].title, "Publications");
        assert_eq!(data.custom[&id].content, "");
    }

    #[test]
    fn test_rename_unknown_id_is_noop() {
        let order = SectionOrder::default();
        let data = ResumeData::default();
        let (new_order, new_data) = rename_custom_section(&order, &data, "summary", "Profile");

        assert_eq!(new_order, order);
        assert_eq!(new_data, data);
    }

    #[test]
    fn test_consistency_issues() {
        let mut entries = SectionOrder::default().entries().to_vec();
        entries.push(SectionEntry::custom("custom-17", "Orphan"));
        let order = SectionOrder::from(entries);
        let mut data = ResumeData::default();
        data.custom.insert("custom-9".to_string(), CustomSection::default());

        let issues = order.consistency_issues(&data);
        assert_eq!(
            issues,
            vec![
                ConsistencyIssue::MissingCustomData("custom-17".to_string()),
                ConsistencyIssue::UnlistedCustomData("custom-9".to_string()),
            ]
        );
    }

    #[test]
    fn test_entry_wire_format() {
        let json = r#"[{"id": "custom-3", "label": "Talks", "visible": false, "type": "custom"}, {"id": "skills"}]"#;
        let order: SectionOrder = serde_json::from_str(json).unwrap();

        assert_eq!(order.entries()[0].kind, SectionKind::Custom);
        assert!(!order.entries()[0].visible);
        assert!(order.entries()[1].visible);
        assert_eq!(order.entries()[1].standard_section(), Some(StandardSection::Skills));
    }

    #[test]
    fn test_unreadable_entries_are_dropped_or_defaulted() {
        let json = r#"[
            {"id": "summary", "type": "appendix"},
            {"label": "no id"},
            null,
            "skills",
            {"id": "skills", "visible": "no", "label": 3}
        ]"#;
        let order: SectionOrder = serde_json::from_str(json).unwrap();

        assert_eq!(ids(&order), vec!["summary", "skills"]);
        assert_eq!(order.entries()[0].kind, SectionKind::Standard);
        assert!(order.entries()[1].visible);
        assert_eq!(order.entries()[1].label, "");
    }
}
