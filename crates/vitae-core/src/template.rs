//! Template presets: named style bundles applied in one step.

use crate::registry::StyleRegistry;
use crate::style::*;

/// A named, fixed bundle of style options.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePreset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Options this preset sets; everything else is left as the user had it.
    pub patch: StylePatch,
}

fn sections(ids: &[&str]) -> Option<Vec<String>> {
    Some(ids.iter().map(|id| id.to_string()).collect())
}

/// The built-in presets, in display order.
pub fn builtin_templates() -> Vec<TemplatePreset> {
    vec![
        TemplatePreset {
            key: "classic",
            name: "Classic",
            description: "Centered serif header with a single column",
            patch: StylePatch {
                theme_color: Some("charcoal".to_string()),
                font_family: Some(FontFamily::Serif),
                header_align: Some(HeaderAlign::Center),
                header_style: Some(HeaderStyle::Plain),
                layout_type: Some(LayoutType::Single),
                sidebar_bg: Some(SidebarBackground::None),
                section_header_style: Some(SectionHeaderStyle::Underline),
                divider_style: Some(DividerStyle::Solid),
                skill_style: Some(SkillStyle::Comma),
                company_style: Some(CompanyStyle::Italic),
                show_photo: Some(false),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "modern",
            name: "Modern",
            description: "Tinted sidebar with skill bars and a photo",
            patch: StylePatch {
                theme_color: Some("blue".to_string()),
                font_family: Some(FontFamily::Sans),
                header_align: Some(HeaderAlign::Left),
                header_style: Some(HeaderStyle::Banner),
                layout_type: Some(LayoutType::Sidebar),
                sidebar_bg: Some(SidebarBackground::Tint),
                section_header_style: Some(SectionHeaderStyle::Bar),
                skill_style: Some(SkillStyle::Bars),
                show_photo: Some(true),
                photo_shape: Some(PhotoShape::Circle),
                sidebar_sections: Some(sections(&["skills", "education", "community"])),
                main_sections: Some(sections(&["summary", "experience", "achievements"])),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "minimal",
            name: "Minimal",
            description: "Plain type, generous whitespace, no decoration",
            patch: StylePatch {
                theme_color: Some("slate".to_string()),
                font_family: Some(FontFamily::Sans),
                spacing: Some(Spacing::Relaxed),
                header_align: Some(HeaderAlign::Left),
                header_style: Some(HeaderStyle::Plain),
                layout_type: Some(LayoutType::Single),
                sidebar_bg: Some(SidebarBackground::None),
                section_header_style: Some(SectionHeaderStyle::Plain),
                divider_style: Some(DividerStyle::None),
                border_style: Some(BorderDecoration::None),
                skill_style: Some(SkillStyle::Comma),
                bullet_style: Some(BulletStyle::Disc),
                show_photo: Some(false),
                show_icons: Some(false),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "executive",
            name: "Executive",
            description: "Large serif name inside a double frame",
            patch: StylePatch {
                theme_color: Some("indigo".to_string()),
                font_family: Some(FontFamily::Serif),
                name_size: Some(NameSize::ExtraLarge),
                name_case: Some(TextCase::Uppercase),
                header_style: Some(HeaderStyle::Underline),
                layout_type: Some(LayoutType::Single),
                section_header_style: Some(SectionHeaderStyle::Filled),
                border_style: Some(BorderDecoration::Double),
                date_style: Some(DateStyle::Bold),
                company_style: Some(CompanyStyle::Bold),
                show_photo: Some(false),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "creative",
            name: "Creative",
            description: "Bold colour sidebar on the right with pill tags",
            patch: StylePatch {
                theme_color: Some("violet".to_string()),
                font_family: Some(FontFamily::Display),
                layout_type: Some(LayoutType::Sidebar),
                layout_reverse: Some(true),
                sidebar_bg: Some(SidebarBackground::Fill),
                sidebar_width: Some(SidebarWidth::Wide),
                section_header_style: Some(SectionHeaderStyle::Bar),
                skill_style: Some(SkillStyle::Tags),
                tag_style: Some(TagStyle::Pill),
                show_photo: Some(true),
                photo_shape: Some(PhotoShape::Rounded),
                photo_border: Some(PhotoBorder::Accent),
                border_style: Some(BorderDecoration::CornerAccents),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "compact",
            name: "Compact",
            description: "Dense two-column grid that fits on one page",
            patch: StylePatch {
                font_size: Some(FontScale::Small),
                line_height: Some(LineHeight::Tight),
                spacing: Some(Spacing::Compact),
                page_margin: Some(PageMargin::Narrow),
                layout_type: Some(LayoutType::Grid),
                sidebar_bg: Some(SidebarBackground::None),
                skill_style: Some(SkillStyle::Comma),
                date_align: Some(DateAlign::Right),
                show_photo: Some(false),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "technical",
            name: "Technical",
            description: "Monospace headings with a dark skills sidebar",
            patch: StylePatch {
                theme_color: Some("emerald".to_string()),
                font_family: Some(FontFamily::Mono),
                layout_type: Some(LayoutType::Sidebar),
                sidebar_bg: Some(SidebarBackground::Dark),
                sidebar_width: Some(SidebarWidth::Narrow),
                section_header_style: Some(SectionHeaderStyle::Boxed),
                skill_style: Some(SkillStyle::Bars),
                bullet_style: Some(BulletStyle::Square),
                date_style: Some(DateStyle::Pill),
                sidebar_sections: Some(sections(&["skills", "community"])),
                main_sections: Some(sections(&["summary", "experience", "education", "achievements"])),
                ..Default::default()
            },
        },
        TemplatePreset {
            key: "elegant",
            name: "Elegant",
            description: "Light uppercase name, centered headings and a soft frame",
            patch: StylePatch {
                theme_color: Some("rose".to_string()),
                font_family: Some(FontFamily::Serif),
                name_weight: Some(NameWeight::Light),
                name_case: Some(TextCase::Uppercase),
                title_style: Some(TitleStyle::Italic),
                header_align: Some(HeaderAlign::Center),
                layout_type: Some(LayoutType::Single),
                section_header_style: Some(SectionHeaderStyle::Centered),
                divider_style: Some(DividerStyle::Double),
                border_style: Some(BorderDecoration::Rounded),
                bullet_style: Some(BulletStyle::None),
                page_background: Some(PageBackground::Paper),
                ..Default::default()
            },
        },
    ]
}

/// Apply the preset named `key` on top of `config`.
///
/// Options the preset sets replace the running values; all other options
/// are kept. An unknown key returns the configuration unchanged.
pub fn apply_template(config: &StyleConfiguration, key: &str, registry: &StyleRegistry) -> StyleConfiguration {
    match registry.template(key) {
        Some(preset) => {
            log::debug!("applying template {} ({} options)", preset.key, preset.patch.len());
            config.merged(&preset.patch)
        }
        None => {
            log::warn!("unknown template {key:?}, configuration left unchanged");
            config.clone()
        }
    }
}
