//! Resume document model.
//!
//! A [`ResumeDocument`] is the `(data, config, sectionOrder)` triple that
//! fully determines a rendered resume. It is also the unit that is cached
//! locally and shared through the document store.

use crate::lenient::{self, or_default};
use crate::sections::{self, SectionOrder};
use crate::style::StyleConfiguration;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Skill level assumed for skills stored as a bare name.
pub const DEFAULT_SKILL_LEVEL: i32 = 80;

/// Personal details shown in the header. Empty strings are omitted from the render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalData {
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub email: String,
    #[serde(deserialize_with = "or_default")]
    pub phone: String,
    #[serde(deserialize_with = "or_default")]
    pub location: String,
    #[serde(deserialize_with = "or_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "or_default")]
    pub portfolio: String,
    /// Photo as a data URI (or URL); empty for none.
    #[serde(deserialize_with = "or_default")]
    pub photo: String,
    #[serde(deserialize_with = "or_default")]
    pub summary: String,
}

/// Entry ids were historically numeric timestamps; both forms are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryIdRepr {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

fn entry_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match EntryIdRepr::deserialize(deserializer)? {
        EntryIdRepr::Text(id) => id,
        EntryIdRepr::Integer(id) => id.to_string(),
        EntryIdRepr::Float(id) => format!("{id}"),
        EntryIdRepr::Other(_) => String::new(),
    })
}

/// One job in the experience section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "entry_id")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub role: String,
    #[serde(deserialize_with = "or_default")]
    pub company: String,
    #[serde(deserialize_with = "or_default")]
    pub year: String,
    #[serde(deserialize_with = "or_default")]
    pub details: String,
}

/// One school or programme in the education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "entry_id")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub institution: String,
    #[serde(deserialize_with = "or_default")]
    pub degree: String,
    #[serde(deserialize_with = "or_default")]
    pub year: String,
    #[serde(deserialize_with = "or_default")]
    pub details: String,
}

/// Wire shapes a skill may be stored in.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillRepr {
    /// Legacy: just the name.
    Name(String),
    Entry {
        #[serde(default, deserialize_with = "or_default")]
        name: String,
        #[serde(default, deserialize_with = "skill_level")]
        level: Option<f64>,
    },
}

/// Levels typed into a text field were stored as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn skill_level<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<LevelRepr>::deserialize(deserializer)? {
        Some(LevelRepr::Number(level)) => Some(level),
        Some(LevelRepr::Text(level)) => level.trim().parse().ok(),
        Some(LevelRepr::Other(_)) | None => None,
    })
}

impl From<SkillRepr> for Skill {
    fn from(repr: SkillRepr) -> Self {
        match repr {
            SkillRepr::Name(name) => Skill::new(name, DEFAULT_SKILL_LEVEL),
            SkillRepr::Entry { name, level } => {
                let level = level
                    .filter(|level| level.is_finite())
                    .map(|level| level.round() as i32)
                    .unwrap_or(DEFAULT_SKILL_LEVEL);
                Skill::new(name, level)
            }
        }
    }
}

/// A skill and its proficiency.
///
/// The stored level is kept as entered; renderers use [`Skill::clamped_level`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SkillRepr")]
pub struct Skill {
    pub name: String,
    pub level: i32,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Level bounded to 0..=100.
    pub fn clamped_level(&self) -> u8 {
        self.level.clamp(0, 100) as u8
    }
}

/// A user-created section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub content: String,
}

/// All resume content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    #[serde(deserialize_with = "or_default")]
    pub personal: PersonalData,
    #[serde(deserialize_with = "lenient::list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "lenient::list")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "lenient::list")]
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub community: Vec<String>,
    /// Custom sections keyed by section id.
    #[serde(deserialize_with = "lenient::map")]
    pub custom: BTreeMap<String, CustomSection>,
}

/// Content, style and section order of one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(deserialize_with = "or_default")]
    pub data: ResumeData,
    #[serde(deserialize_with = "or_default")]
    pub config: StyleConfiguration,
    #[serde(deserialize_with = "or_default")]
    pub section_order: SectionOrder,
}

impl ResumeDocument {
    /// Create a document from its three parts.
    pub fn new(data: ResumeData, config: StyleConfiguration, section_order: SectionOrder) -> Self {
        Self {
            data,
            config,
            section_order,
        }
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the document to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Size in bytes of the compact JSON form.
    pub fn serialized_size(&self) -> Result<usize, serde_json::Error> {
        Ok(serde_json::to_vec(self)?.len())
    }

    /// Move the section at `from` to `to`.
    pub fn move_section(&mut self, from: usize, to: usize) {
        self.section_order = self.section_order.reorder(from, to);
    }

    /// Show or hide a section.
    pub fn toggle_section(&mut self, id: &str) {
        self.section_order = self.section_order.toggle_visibility(id);
    }

    /// Add an empty custom section at the end and return its id.
    pub fn add_custom_section(&mut self) -> String {
        let (order, data, id) = sections::add_custom_section(&self.section_order, &self.data);
        self.section_order = order;
        self.data = data;
        id
    }

    /// Remove a custom section and its content.
    pub fn delete_custom_section(&mut self, id: &str) {
        let (order, data) = sections::delete_custom_section(&self.section_order, &self.data, id);
        self.section_order = order;
        self.data = data;
    }

    /// Rename a custom section (content title and order label together).
    pub fn rename_custom_section(&mut self, id: &str, title: &str) {
        let (order, data) = sections::rename_custom_section(&self.section_order, &self.data, id, title);
        self.section_order = order;
        self.data = data;
    }

    /// A filled-in resume for first-run previews and demos.
    pub fn sample() -> Self {
        let data = ResumeData {
            personal: PersonalData {
                name: "Alex Morgan".to_string(),
                title: "Senior Software Engineer".to_string(),
                email: "alex.morgan@example.com".to_string(),
                phone: "+1 555 0100".to_string(),
                location: "Portland, OR".to_string(),
                linkedin: "linkedin.com/in/alexmorgan".to_string(),
                portfolio: "alexmorgan.dev".to_string(),
                photo: String::new(),
                summary: "Engineer with ten years of experience building reliable web platforms.\n\
                          Focused on developer tooling, performance and mentoring."
                    .to_string(),
            },
            experience: vec![
                ExperienceEntry {
                    id: "exp-1".to_string(),
                    role: "Senior Software Engineer".to_string(),
                    company: "Northwind Labs".to_string(),
                    year: "2020 - Present".to_string(),
                    details: "Led the migration of the billing platform to event sourcing.\n\
                              Cut p99 checkout latency by 40%."
                        .to_string(),
                },
                ExperienceEntry {
                    id: "exp-2".to_string(),
                    role: "Software Engineer".to_string(),
                    company: "Contoso".to_string(),
                    year: "2015 - 2020".to_string(),
                    details: "Built internal deployment tooling used by 200 engineers.".to_string(),
                },
            ],
            education: vec![EducationEntry {
                id: "edu-1".to_string(),
                institution: "Oregon State University".to_string(),
                degree: "B.Sc. Computer Science".to_string(),
                year: "2011 - 2015".to_string(),
                details: String::new(),
            }],
            skills: vec![
                Skill::new("Rust", 90),
                Skill::new("TypeScript", 85),
                Skill::new("PostgreSQL", 75),
                Skill::new("Kubernetes", 65),
            ],
            achievements: vec![
                "Speaker at RustConf 2023".to_string(),
                "Maintainer of an open-source job queue with 3k stars".to_string(),
            ],
            community: vec!["Mentor at the local coding bootcamp".to_string()],
            custom: BTreeMap::new(),
        };
        Self::new(data, StyleConfiguration::default(), SectionOrder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_string_skill_is_normalized() {
        let data: ResumeData =
            serde_json::from_str(r#"{"skills": ["Python", {"name": "React", "level": 40}]}"#).unwrap();

        assert_eq!(data.skills, vec![Skill::new("Python", 80), Skill::new("React", 40)]);
    }

    #[test]
    fn test_skill_level_typed_as_text() {
        let data: ResumeData = serde_json::from_str(
            r#"{"skills": [{"name": "React", "level": "40"}, {"name": "Go", "level": " 72.6 "}, {"name": "C", "level": "high"}, {"name": "Zig", "level": null}]}"#,
        )
        .unwrap();

        assert_eq!(
            data.skills,
            vec![
                Skill::new("React", 40),
                Skill::new("Go", 73),
                Skill::new("C", DEFAULT_SKILL_LEVEL),
                Skill::new("Zig", DEFAULT_SKILL_LEVEL),
            ]
        );
    }

    #[test]
    fn test_unreadable_items_are_dropped_not_fatal() {
        let json = r#"{
            "personal": {"name": "Alex", "email": 42, "summary": null},
            "skills": [null, 7, "Rust", {"name": "SQL", "level": 60}],
            "achievements": [null, "Shipped v2", {"text": "x"}],
            "community": "not a list",
            "experience": [{"id": 1700000000000, "role": "Engineer", "company": null}, "junk"],
            "custom": {"custom-1": {"title": "Talks", "content": "RustConf"}, "custom-2": null}
        }"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();

        assert_eq!(data.personal.name, "Alex");
        assert_eq!(data.personal.email, "");
        assert_eq!(data.personal.summary, "");
        assert_eq!(data.skills, vec![Skill::new("Rust", 80), Skill::new("SQL", 60)]);
        assert_eq!(data.achievements, vec!["Shipped v2".to_string()]);
        assert!(data.community.is_empty());
        assert_eq!(data.experience.len(), 1);
        assert_eq!(data.experience[0].id, "1700000000000");
        assert_eq!(data.experience[0].role, "Engineer");
        assert_eq!(data.experience[0].company, "");
        assert_eq!(data.custom.keys().collect::<Vec<_>>(), vec!["custom-1"]);
    }

    #[test]
    fn test_unreadable_document_part_takes_default() {
        let doc = ResumeDocument::from_json(r#"{"data": {"personal": {"name": "Alex"}}, "config": 3, "sectionOrder": null}"#)
            .unwrap();

        assert_eq!(doc.data.personal.name, "Alex");
        assert_eq!(doc.config, StyleConfiguration::default());
        assert_eq!(doc.section_order, SectionOrder::default());
    }

    #[test]
    fn test_skill_without_level_defaults() {
        let data: ResumeData = serde_json::from_str(r#"{"skills": [{"name": "Go"}]}"#).unwrap();
        assert_eq!(data.skills[0].level, DEFAULT_SKILL_LEVEL);
    }

    #[test]
    fn test_skill_level_is_clamped_not_rewritten() {
        let data: ResumeData =
            serde_json::from_str(r#"{"skills": [{"name": "Go", "level": 140}, {"name": "C", "level": -5}]}"#)
                .unwrap();

        assert_eq!(data.skills[0].level, 140);
        assert_eq!(data.skills[0].clamped_level(), 100);
        assert_eq!(data.skills[1].clamped_level(), 0);
    }

    #[test]
    fn test_numeric_entry_ids_are_accepted() {
        let data: ResumeData =
            serde_json::from_str(r#"{"experience": [{"id": 1700000000000, "role": "Dev"}]}"#).unwrap();
        assert_eq!(data.experience[0].id, "1700000000000");
        assert_eq!(data.experience[0].role, "Dev");
    }

    #[test]
    fn test_document_json_round_trip() {
        let doc = ResumeDocument::sample();
        let json = doc.to_json().unwrap();
        let loaded = ResumeDocument::from_json(&json).unwrap();

        assert_eq!(loaded, doc);
        assert_eq!(doc.serialized_size().unwrap(), json.len());
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let value = serde_json::to_value(ResumeDocument::default()).unwrap();
        assert!(value.get("sectionOrder").is_some());
        assert!(value["config"].get("themeColor").is_some());
    }

    #[test]
    fn test_empty_object_is_default_document() {
        let doc = ResumeDocument::from_json("{}").unwrap();
        assert_eq!(doc, ResumeDocument::default());
    }

    #[test]
    fn test_custom_section_wrappers_keep_order_and_data_in_sync() {
        let mut doc = ResumeDocument::default();
        let id = doc.add_custom_section();

        doc.rename_custom_section(&id, "Languages");
        assert_eq!(doc.data.custom[&id].title, "Languages");
        assert_eq!(doc.section_order.get(&id).map(|e| e.label.as_str()), Some("Languages"));

        doc.delete_custom_section(&id);
        assert!(!doc.data.custom.contains_key(&id));
        assert!(doc.section_order.get(&id).is_none());
    }
}
