//! Per-section content rendering.

use crate::tree::{ContentBlock, EntryBlock, SkillBar, SkillBlock};
use vitae_core::sections::{NEW_CUSTOM_SECTION_LABEL, SectionEntry, SectionKind, StandardSection};
use vitae_core::style::{BulletStyle, SkillStyle};
use vitae_core::{ResumeData, StyleConfiguration, Theme};

/// Split user text into lines, keeping blank lines between paragraphs.
pub(crate) fn text_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(|line| line.trim_end().to_string()).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    lines
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Heading for an order entry.
///
/// Custom sections take their title from the custom data (the text the user
/// typed), not from the order label; `None` if the custom data is missing.
pub fn section_title(entry: &SectionEntry, data: &ResumeData) -> Option<String> {
    match entry.kind {
        SectionKind::Custom => {
            let custom = data.custom.get(&entry.id)?;
            Some(
                non_blank(&custom.title)
                    .or_else(|| non_blank(&entry.label))
                    .unwrap_or_else(|| NEW_CUSTOM_SECTION_LABEL.to_string()),
            )
        }
        SectionKind::Standard => {
            let section = StandardSection::from_id(&entry.id)?;
            Some(non_blank(&entry.label).unwrap_or_else(|| section.default_label().to_string()))
        }
    }
}

/// Render the body of section `id`.
///
/// Returns `None` when there is nothing to show: empty text or lists, or a
/// custom id with no custom data. Callers omit the whole section then.
pub fn render_section(id: &str, data: &ResumeData, config: &StyleConfiguration, theme: &Theme) -> Option<ContentBlock> {
    match StandardSection::from_id(id) {
        Some(StandardSection::Summary) => render_paragraph(&data.personal.summary, true),
        Some(StandardSection::Experience) => render_entries(
            data.experience
                .iter()
                .map(|e| (&e.id, &e.role, &e.company, &e.year, &e.details)),
            config,
        ),
        Some(StandardSection::Education) => render_entries(
            data.education
                .iter()
                .map(|e| (&e.id, &e.institution, &e.degree, &e.year, &e.details)),
            config,
        ),
        Some(StandardSection::Skills) => render_skills(data, config, theme),
        Some(StandardSection::Achievements) => render_bullets(&data.achievements, config.bullet_style),
        Some(StandardSection::Community) => render_bullets(&data.community, config.bullet_style),
        None => {
            let Some(custom) = data.custom.get(id) else {
                log::debug!("section {id} has no custom data, omitting");
                return None;
            };
            render_paragraph(&custom.content, false)
        }
    }
}

fn render_paragraph(text: &str, justified: bool) -> Option<ContentBlock> {
    let lines = text_lines(text);
    if lines.is_empty() {
        return None;
    }
    Some(ContentBlock::Paragraph { lines, justified })
}

fn render_entries<'a>(
    entries: impl Iterator<Item = (&'a String, &'a String, &'a String, &'a String, &'a String)>,
    config: &StyleConfiguration,
) -> Option<ContentBlock> {
    let entries: Vec<EntryBlock> = entries
        .filter_map(|(id, title, subtitle, year, details)| {
            let block = EntryBlock {
                id: id.clone(),
                title: non_blank(title),
                subtitle: non_blank(subtitle),
                subtitle_style: config.company_style,
                date: non_blank(year),
                date_align: config.date_align,
                date_style: config.date_style,
                details: text_lines(details),
            };
            let empty = block.title.is_none() && block.subtitle.is_none() && block.date.is_none() && block.details.is_empty();
            (!empty).then_some(block)
        })
        .collect();

    if entries.is_empty() {
        return None;
    }
    Some(ContentBlock::Entries { entries })
}

fn render_skills(data: &ResumeData, config: &StyleConfiguration, theme: &Theme) -> Option<ContentBlock> {
    let skills: Vec<_> = data
        .skills
        .iter()
        .filter(|skill| !skill.name.trim().is_empty())
        .collect();
    if skills.is_empty() {
        return None;
    }
    let names = || skills.iter().map(|skill| skill.name.trim().to_string()).collect::<Vec<_>>();

    let block = match config.skill_style {
        SkillStyle::Tags => SkillBlock::Tags {
            names: names(),
            style: config.tag_style,
            fill: theme.background,
            text: theme.text,
            border: theme.border,
        },
        SkillStyle::List => SkillBlock::List {
            // a list is always bulleted; hidden bullets fall back to discs
            marker: config.bullet_style.glyph().or(BulletStyle::Disc.glyph()),
            names: names(),
        },
        SkillStyle::Bars => SkillBlock::Bars {
            bars: skills
                .iter()
                .map(|skill| SkillBar {
                    name: skill.name.trim().to_string(),
                    level: skill.clamped_level(),
                })
                .collect(),
            fill: theme.fill,
            track: theme.background,
        },
        SkillStyle::Comma => SkillBlock::Sentence {
            text: names().join(", "),
        },
    };
    Some(ContentBlock::Skills { skills: block })
}

fn render_bullets(items: &[String], style: BulletStyle) -> Option<ContentBlock> {
    let items: Vec<String> = items.iter().filter_map(|item| non_blank(item)).collect();
    if items.is_empty() {
        return None;
    }
    Some(ContentBlock::Bullets {
        marker: style.glyph(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_core::style::{CompanyStyle, DateAlign};
    use vitae_core::{CustomSection, ExperienceEntry, ResumeDocument, Skill, StyleRegistry};

    fn theme() -> &'static Theme {
        StyleRegistry::builtin().resolve_theme("blue")
    }

    #[test]
    fn test_empty_summary_renders_nothing() {
        let data = ResumeData::default();
        assert_eq!(render_section("summary", &data, &StyleConfiguration::default(), theme()), None);
    }

    #[test]
    fn test_summary_keeps_line_breaks_and_is_justified() {
        let mut data = ResumeData::default();
        data.personal.summary = "First line.\n\nSecond paragraph.\n".to_string();

        let block = render_section("summary", &data, &StyleConfiguration::default(), theme());
        assert_eq!(
            block,
            Some(ContentBlock::Paragraph {
                lines: vec!["First line.".to_string(), String::new(), "Second paragraph.".to_string()],
                justified: true,
            })
        );
    }

    #[test]
    fn test_experience_keeps_stored_order_and_styles() {
        let mut data = ResumeData::default();
        data.experience = vec![
            ExperienceEntry {
                id: "a".to_string(),
                role: "Intern".to_string(),
                year: "2010".to_string(),
                ..Default::default()
            },
            ExperienceEntry {
                id: "b".to_string(),
                role: "Lead".to_string(),
                company: "Acme".to_string(),
                year: "2020".to_string(),
                details: "Shipped things\nHired people".to_string(),
            },
            ExperienceEntry::default(),
        ];
        let config = StyleConfiguration {
            date_align: DateAlign::Below,
            company_style: CompanyStyle::Accent,
            ..Default::default()
        };

        let Some(ContentBlock::Entries { entries }) = render_section("experience", &data, &config, theme()) else {
            panic!("expected entries");
        };

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Intern"));
        assert_eq!(entries[0].subtitle, None);
        assert_eq!(entries[1].subtitle.as_deref(), Some("Acme"));
        assert_eq!(entries[1].details, vec!["Shipped things", "Hired people"]);
        assert_eq!(entries[1].date_align, DateAlign::Below);
        assert_eq!(entries[1].subtitle_style, CompanyStyle::Accent);
    }

    #[test]
    fn test_skill_bars_clamp_and_normalize_legacy_names() {
        let data: ResumeData = serde_json::from_str(
            r#"{"skills": ["Python", {"name": "React", "level": 40}, {"name": "Go", "level": 250}]}"#,
        )
        .unwrap();
        let config = StyleConfiguration {
            skill_style: SkillStyle::Bars,
            ..Default::default()
        };

        let block = render_section("skills", &data, &config, theme());
        let Some(ContentBlock::Skills {
            skills: SkillBlock::Bars { bars, .. },
        }) = block
        else {
            panic!("expected bars");
        };

        assert_eq!(
            bars,
            vec![
                SkillBar { name: "Python".to_string(), level: 80 },
                SkillBar { name: "React".to_string(), level: 40 },
                SkillBar { name: "Go".to_string(), level: 100 },
            ]
        );
        assert_eq!(bars[1].fraction(), 0.4);
    }

    #[test]
    fn test_skill_modes() {
        let mut data = ResumeData::default();
        data.skills = vec![Skill::new("Rust", 90), Skill::new(" ", 50), Skill::new("SQL", 10)];

        let render = |style: SkillStyle, bullets: BulletStyle| {
            let config = StyleConfiguration {
                skill_style: style,
                bullet_style: bullets,
                ..Default::default()
            };
            match render_section("skills", &data, &config, theme()) {
                Some(ContentBlock::Skills { skills }) => skills,
                other => panic!("unexpected {other:?}"),
            }
        };

        assert_eq!(
            render(SkillStyle::Comma, BulletStyle::Disc),
            SkillBlock::Sentence { text: "Rust, SQL".to_string() }
        );
        assert_eq!(
            render(SkillStyle::List, BulletStyle::None),
            SkillBlock::List {
                marker: Some('•'),
                names: vec!["Rust".to_string(), "SQL".to_string()],
            }
        );
        assert!(matches!(
            render(SkillStyle::Tags, BulletStyle::Disc),
            SkillBlock::Tags { names, .. } if names == vec!["Rust".to_string(), "SQL".to_string()]
        ));
    }

    #[test]
    fn test_bullets_use_configured_glyph() {
        let mut data = ResumeData::default();
        data.achievements = vec!["Won".to_string(), "  ".to_string()];
        let config = StyleConfiguration {
            bullet_style: BulletStyle::Check,
            ..Default::default()
        };

        assert_eq!(
            render_section("achievements", &data, &config, theme()),
            Some(ContentBlock::Bullets {
                marker: Some('✓'),
                items: vec!["Won".to_string()],
            })
        );
        assert_eq!(render_section("community", &data, &config, theme()), None);
    }

    #[test]
    fn test_custom_section_missing_data_is_none() {
        let data = ResumeData::default();
        assert_eq!(render_section("custom-17", &data, &StyleConfiguration::default(), theme()), None);
    }

    #[test]
    fn test_custom_section_text() {
        let mut data = ResumeData::default();
        data.custom.insert(
            "custom-1".to_string(),
            CustomSection {
                title: "Languages".to_string(),
                content: "English\nGerman".to_string(),
            },
        );

        assert_eq!(
            render_section("custom-1", &data, &StyleConfiguration::default(), theme()),
            Some(ContentBlock::Paragraph {
                lines: vec!["English".to_string(), "German".to_string()],
                justified: false,
            })
        );
    }

    #[test]
    fn test_custom_title_comes_from_data() {
        let mut data = ResumeData::default();
        data.custom.insert(
            "custom-1".to_string(),
            CustomSection {
                title: "Languages".to_string(),
                content: String::new(),
            },
        );
        let entry = SectionEntry::custom("custom-1", "Stale label");

        assert_eq!(section_title(&entry, &data).as_deref(), Some("Languages"));
        assert_eq!(section_title(&SectionEntry::custom("custom-2", "x"), &data), None);
    }

    #[test]
    fn test_standard_title_uses_label() {
        let doc = ResumeDocument::default();
        let entry = doc.section_order.get("experience").unwrap();
        assert_eq!(section_title(entry, &doc.data).as_deref(), Some("Experience"));

        let mut unlabeled = entry.clone();
        unlabeled.label.clear();
        assert_eq!(section_title(&unlabeled, &doc.data).as_deref(), Some("Experience"));
    }
}
