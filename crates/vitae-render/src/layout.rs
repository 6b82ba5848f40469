//! Layout composition: turns a document snapshot into a [`RenderTree`].
//!
//! Composition is a pure function of `(data, config, order, registry)`.
//! Unknown option values have already been resolved to their defaults when
//! the configuration was read, and an unknown theme key resolves to the
//! registry's default theme, so composition itself cannot fail.

use crate::section::{render_section, section_title};
use crate::tokens::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM, StyleTokens};
use crate::tree::{
    Column, ColumnRole, ContactItem, ContactKind, HeaderBlock, LayoutMode, Overlays, PageStyle, Photo,
    RenderTree, RenderedSection, SectionHeader, Side, Watermark,
};
use kurbo::Size;
use vitae_core::sections::{SectionEntry, StandardSection};
use vitae_core::style::{HeaderStyle, LayoutType, PageBackground, SidebarBackground};
use vitae_core::theme::{BODY_TEXT, MUTED_TEXT};
use vitae_core::{
    PersonalData, ResumeData, ResumeDocument, SectionOrder, SerializableColor, StyleConfiguration, StyleRegistry,
    Theme,
};

/// Warm off-white used by the "paper" page background.
const PAPER: SerializableColor = SerializableColor::rgb(253, 251, 247);

/// Background of the "dark" sidebar.
const DARK_SIDEBAR: SerializableColor = SerializableColor::rgb(30, 41, 59);

/// Watermark rotation, counter-clockwise.
const WATERMARK_ANGLE_DEG: f64 = -30.0;

const WATERMARK_OPACITY: f32 = 0.08;

/// Which column group a section belongs to in sidebar layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    Sidebar,
    Main,
}

/// Resolve the page layout for a configuration.
///
/// An explicit `sidebar` layout always gets a sidebar. Configurations saved
/// before the layout option existed (`auto`) get one whenever a sidebar
/// background is set.
pub fn layout_mode(config: &StyleConfiguration) -> LayoutMode {
    let side = if config.layout_reverse { Side::Right } else { Side::Left };
    match config.layout_type {
        LayoutType::Sidebar => LayoutMode::Sidebar { side },
        LayoutType::Auto if config.sidebar_bg != SidebarBackground::None => LayoutMode::Sidebar { side },
        LayoutType::Grid => LayoutMode::SingleColumn { grid: true },
        LayoutType::Auto | LayoutType::Single => LayoutMode::SingleColumn { grid: false },
    }
}

/// Group of section `id` in a sidebar layout.
///
/// Explicit lists win: an id in `sidebar_sections` is in the sidebar; with
/// only `main_sections` given, anything not listed there is in the sidebar.
/// Without lists, education, skills and community go to the sidebar and
/// everything else (custom sections included) to the main column.
pub fn column_group(id: &str, config: &StyleConfiguration) -> ColumnGroup {
    let listed = |list: &Option<Vec<String>>| list.as_ref().map(|ids| ids.iter().any(|listed| listed == id));

    match (listed(&config.sidebar_sections), listed(&config.main_sections)) {
        (Some(true), _) => ColumnGroup::Sidebar,
        (Some(false), _) => ColumnGroup::Main,
        (None, Some(true)) => ColumnGroup::Main,
        (None, Some(false)) => ColumnGroup::Sidebar,
        (None, None) => match StandardSection::from_id(id) {
            Some(StandardSection::Education | StandardSection::Skills | StandardSection::Community) => {
                ColumnGroup::Sidebar
            }
            _ => ColumnGroup::Main,
        },
    }
}

/// Grid column of section `id` in the grid sub-mode.
fn grid_role(id: &str) -> ColumnRole {
    match StandardSection::from_id(id) {
        Some(StandardSection::Skills | StandardSection::Achievements | StandardSection::Community) => {
            ColumnRole::GridRight
        }
        _ => ColumnRole::GridLeft,
    }
}

/// Compose a stored document with its own configuration and order.
pub fn compose_document(document: &ResumeDocument, registry: &StyleRegistry) -> RenderTree {
    compose(&document.data, &document.config, &document.section_order, registry)
}

/// Compose one resume page.
pub fn compose(
    data: &ResumeData,
    config: &StyleConfiguration,
    order: &SectionOrder,
    registry: &StyleRegistry,
) -> RenderTree {
    let theme = registry.resolve_theme(&config.theme_color);
    let tokens = StyleTokens::resolve(config);
    let layout = layout_mode(config);

    let composer = Composer {
        data,
        config,
        theme,
    };

    let visible: Vec<&SectionEntry> = order.visible().collect();
    let (lede, columns) = match layout {
        LayoutMode::SingleColumn { grid } => {
            let is_summary = |entry: &&SectionEntry| entry.standard_section() == Some(StandardSection::Summary);
            let lede = visible
                .iter()
                .copied()
                .find(is_summary)
                .and_then(|entry| composer.section(entry, BODY_TEXT, false));
            let rest = visible.iter().copied().filter(|entry| !is_summary(entry));

            let columns = if grid {
                let (left, right): (Vec<&SectionEntry>, Vec<&SectionEntry>) =
                    rest.partition(|entry| grid_role(&entry.id) == ColumnRole::GridLeft);
                vec![
                    composer.column(ColumnRole::GridLeft, 0.5, None, BODY_TEXT, left),
                    composer.column(ColumnRole::GridRight, 0.5, None, BODY_TEXT, right),
                ]
            } else {
                vec![composer.column(ColumnRole::Full, 1.0, None, BODY_TEXT, rest.collect())]
            };
            (lede, columns)
        }
        LayoutMode::Sidebar { side } => {
            let (sidebar, main): (Vec<&SectionEntry>, Vec<&SectionEntry>) = visible
                .iter()
                .copied()
                .partition(|entry| column_group(&entry.id, config) == ColumnGroup::Sidebar);

            let (background, text_color) = sidebar_colors(config.sidebar_bg, theme);
            let sidebar = composer.column(ColumnRole::Sidebar, tokens.sidebar_fraction, background, text_color, sidebar);
            let main = composer.column(ColumnRole::Main, 1.0 - tokens.sidebar_fraction, None, BODY_TEXT, main);

            let columns = match side {
                Side::Left => vec![sidebar, main],
                Side::Right => vec![main, sidebar],
            };
            (None, columns)
        }
    };

    RenderTree {
        page: page_style(config, &tokens, theme),
        header: header_block(&data.personal, config, &tokens, theme),
        layout,
        lede,
        columns,
        overlays: overlays(config, theme),
    }
}

struct Composer<'a> {
    data: &'a ResumeData,
    config: &'a StyleConfiguration,
    theme: &'a Theme,
}

impl Composer<'_> {
    /// Title and content of one entry, `None` if there is nothing to show.
    fn section(&self, entry: &SectionEntry, text_color: SerializableColor, on_dark: bool) -> Option<RenderedSection> {
        let content = render_section(&entry.id, self.data, self.config, self.theme)?;
        let title = section_title(entry, self.data)?;
        let (color, rule_color) = if on_dark {
            (text_color, text_color.with_opacity(0.6))
        } else {
            (self.theme.text, self.theme.border)
        };

        Some(RenderedSection {
            id: entry.id.clone(),
            header: SectionHeader {
                title,
                style: self.config.section_header_style,
                case: self.config.section_header_case,
                color,
                rule_color,
            },
            content,
        })
    }

    fn column(
        &self,
        role: ColumnRole,
        width_fraction: f64,
        background: Option<SerializableColor>,
        text_color: SerializableColor,
        entries: Vec<&SectionEntry>,
    ) -> Column {
        let on_dark = text_color == SerializableColor::white();
        Column {
            role,
            width_fraction,
            background,
            text_color,
            sections: entries
                .into_iter()
                .filter_map(|entry| self.section(entry, text_color, on_dark))
                .collect(),
        }
    }
}

fn sidebar_colors(background: SidebarBackground, theme: &Theme) -> (Option<SerializableColor>, SerializableColor) {
    match background {
        SidebarBackground::None => (None, BODY_TEXT),
        SidebarBackground::Tint => (Some(theme.background), BODY_TEXT),
        SidebarBackground::Fill => (Some(theme.fill), SerializableColor::white()),
        SidebarBackground::Dark => (Some(DARK_SIDEBAR), SerializableColor::white()),
    }
}

fn page_style(config: &StyleConfiguration, tokens: &StyleTokens, theme: &Theme) -> PageStyle {
    PageStyle {
        size_mm: Size::new(PAGE_WIDTH_MM, PAGE_HEIGHT_MM),
        margin_mm: tokens.margin_mm,
        background: match config.page_background {
            PageBackground::White => SerializableColor::white(),
            PageBackground::Tint => theme.background,
            PageBackground::Paper => PAPER,
        },
        font_stack: tokens.font_stack,
        base_font_pt: tokens.base_font_pt,
        line_height: tokens.line_height,
        text_color: BODY_TEXT,
        muted_color: MUTED_TEXT,
        accent: theme.text,
        rule_color: theme.border,
        tint: theme.background,
        section_gap_pt: tokens.section_gap_pt,
        item_gap_pt: tokens.item_gap_pt,
        divider: config.divider_style,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Link target for a user-entered web address.
fn web_href(address: &str) -> String {
    let lower = address.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        address.to_string()
    } else {
        format!("https://{address}")
    }
}

fn phone_href(number: &str) -> String {
    let dialable: String = number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{dialable}")
}

/// Whether a photo source can be embedded as-is.
pub fn is_embeddable_photo(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    lower.starts_with("data:image/") || lower.starts_with("https://") || lower.starts_with("http://")
}

fn contacts(personal: &PersonalData, config: &StyleConfiguration, theme: &Theme) -> Vec<ContactItem> {
    let icon_color = config.show_icons.then_some(theme.icon);
    let mut items = Vec::new();
    let mut push = |kind: ContactKind, raw: &str, href: fn(&str) -> String| {
        if let Some(text) = non_blank(raw) {
            items.push(ContactItem {
                kind,
                href: Some(href(&text)),
                text,
                icon_color,
            });
        }
    };

    push(ContactKind::Email, &personal.email, |email| format!("mailto:{email}"));
    push(ContactKind::Phone, &personal.phone, phone_href);
    if let Some(text) = non_blank(&personal.location) {
        items.push(ContactItem {
            kind: ContactKind::Location,
            text,
            href: None,
            icon_color,
        });
    }
    if config.show_links {
        let mut push = |kind: ContactKind, raw: &str| {
            if let Some(text) = non_blank(raw) {
                items.push(ContactItem {
                    kind,
                    href: Some(web_href(&text)),
                    text,
                    icon_color,
                });
            }
        };
        push(ContactKind::LinkedIn, &personal.linkedin);
        push(ContactKind::Portfolio, &personal.portfolio);
    }
    items
}

fn header_block(
    personal: &PersonalData,
    config: &StyleConfiguration,
    tokens: &StyleTokens,
    theme: &Theme,
) -> HeaderBlock {
    let photo = if config.show_photo && !personal.photo.trim().is_empty() {
        if is_embeddable_photo(&personal.photo) {
            Some(Photo {
                src: personal.photo.trim().to_string(),
                shape: config.photo_shape,
                border: config.photo_border,
                border_color: theme.border,
                size_pt: tokens.photo_size_pt,
            })
        } else {
            log::debug!("photo is neither a data URI nor a web address, omitting");
            None
        }
    } else {
        None
    };

    HeaderBlock {
        name: non_blank(&personal.name),
        name_case: config.name_case,
        name_size_pt: tokens.name_size_pt,
        name_weight: tokens.name_weight,
        title: non_blank(&personal.title),
        title_style: config.title_style,
        align: config.header_align,
        style: config.header_style,
        band: (config.header_style == HeaderStyle::Banner).then_some(theme.fill),
        contact_style: config.contact_style,
        contacts: contacts(personal, config, theme),
        photo,
    }
}

fn overlays(config: &StyleConfiguration, theme: &Theme) -> Overlays {
    Overlays {
        border: config.border_style,
        border_color: theme.border,
        watermark: non_blank(&config.watermark).map(|text| Watermark {
            text,
            color: theme.text.with_opacity(WATERMARK_OPACITY),
            angle_deg: WATERMARK_ANGLE_DEG,
        }),
        footer: non_blank(&config.custom_footer),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use vitae_core::style::{BorderDecoration, SkillStyle};
    use vitae_core::{CustomSection, ExperienceEntry, Skill, apply_template};

    fn registry() -> &'static StyleRegistry {
        StyleRegistry::builtin()
    }

    fn config_strategy() -> impl Strategy<Value = StyleConfiguration> {
        let templates: Vec<&'static str> = registry().templates().iter().map(|preset| preset.key).collect();
        let mut themes: Vec<String> = registry().themes().iter().map(|theme| theme.key.to_string()).collect();
        themes.push("no-such-theme".to_string());

        (
            prop::sample::select(templates),
            prop::sample::select(themes),
            prop::sample::select(LayoutType::all()),
            prop::sample::select(SidebarBackground::all()),
            prop::sample::select(SkillStyle::all()),
            prop::sample::select(HeaderStyle::all()),
            prop::sample::select(BorderDecoration::all()),
            prop::sample::select(PageBackground::all()),
            any::<bool>(),
            any::<bool>(),
            "[A-Z ]{0,8}",
        )
            .prop_map(
                |(
                    template,
                    theme_color,
                    layout_type,
                    sidebar_bg,
                    skill_style,
                    header_style,
                    border_style,
                    page_background,
                    layout_reverse,
                    show_photo,
                    watermark,
                )| StyleConfiguration {
                    theme_color,
                    layout_type,
                    sidebar_bg,
                    skill_style,
                    header_style,
                    border_style,
                    page_background,
                    layout_reverse,
                    show_photo,
                    watermark,
                    ..apply_template(&StyleConfiguration::default(), template, registry())
                },
            )
    }

    fn data_strategy() -> impl Strategy<Value = ResumeData> {
        let experience = ("[A-Za-z ]{0,12}", "[A-Za-z ]{0,12}", ".{0,30}").prop_map(|(role, company, details)| {
            ExperienceEntry {
                id: String::new(),
                role,
                company,
                year: "2020".to_string(),
                details,
            }
        });
        (
            "[A-Za-z ]{0,16}",
            ".{0,40}",
            prop::collection::vec(experience, 0..3),
            prop::collection::vec(("[A-Za-z+#]{1,10}", -20i32..130), 0..6),
            prop::collection::vec(".{0,20}", 0..3),
        )
            .prop_map(|(name, summary, experience, skills, achievements)| {
                let mut data = ResumeData {
                    experience,
                    skills: skills.into_iter().map(|(name, level)| Skill::new(name, level)).collect(),
                    achievements,
                    ..ResumeData::default()
                };
                data.personal.name = name;
                data.personal.summary = summary;
                data
            })
    }

    fn document_strategy() -> impl Strategy<Value = ResumeDocument> {
        let custom = prop::collection::btree_map("custom-[a-z0-9]{1,6}", (".{0,12}", ".{0,40}"), 0..3);
        let visibility = prop::collection::vec(any::<bool>(), 9);

        (data_strategy(), custom, config_strategy(), visibility)
            .prop_flat_map(|(mut data, custom, config, visibility)| {
                let mut entries = SectionOrder::default().entries().to_vec();
                for (id, (title, content)) in custom {
                    entries.push(SectionEntry::custom(id.clone(), title.clone()));
                    data.custom.insert(id, CustomSection { title, content });
                }
                for (entry, visible) in entries.iter_mut().zip(visibility) {
                    entry.visible = visible;
                }
                (Just(entries).prop_shuffle(), Just(data), Just(config))
            })
            .prop_map(|(entries, data, config)| ResumeDocument::new(data, config, SectionOrder::from(entries)))
    }

    proptest! {
        #[test]
        fn test_compose_is_deterministic(doc in document_strategy()) {
            let first = compose_document(&doc, registry());
            let second = compose_document(&doc.clone(), registry());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_only_visible_sections_render_once(doc in document_strategy()) {
            let tree = compose_document(&doc, registry());
            let mut seen = BTreeSet::new();
            for section in tree.sections() {
                let entry = doc.section_order.get(&section.id);
                prop_assert!(entry.is_some_and(|entry| entry.visible), "{}", section.id);
                prop_assert!(seen.insert(section.id.clone()), "{} rendered twice", section.id);
            }
        }

        #[test]
        fn test_reverse_keeps_column_membership(doc in document_strategy()) {
            let mut reversed = doc.config.clone();
            reversed.layout_reverse = !reversed.layout_reverse;
            let normal = compose(&doc.data, &doc.config, &doc.section_order, registry());
            let flipped = compose(&doc.data, &reversed, &doc.section_order, registry());

            let membership = |tree: &RenderTree, role: ColumnRole| {
                tree.column(role)
                    .map(|column| column.sections.iter().map(|s| s.id.clone()).collect::<Vec<_>>())
            };
            for role in [ColumnRole::Sidebar, ColumnRole::Main] {
                prop_assert_eq!(membership(&normal, role), membership(&flipped, role));
            }
        }
    }
}
