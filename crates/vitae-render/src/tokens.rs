//! Concrete measurements for the enumerated style options.

use vitae_core::StyleConfiguration;
use vitae_core::style::{
    FontFamily, FontScale, LineHeight, NameSize, NameWeight, PageMargin, PhotoSize, SidebarWidth, Spacing,
};

/// A4 page size in millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Resolved sizes for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTokens {
    pub font_stack: &'static str,
    pub base_font_pt: f64,
    pub line_height: f64,
    pub section_gap_pt: f64,
    pub item_gap_pt: f64,
    pub margin_mm: f64,
    pub name_size_pt: f64,
    pub name_weight: u16,
    pub photo_size_pt: f64,
    pub sidebar_fraction: f64,
}

impl StyleTokens {
    pub fn resolve(config: &StyleConfiguration) -> Self {
        let (section_gap_pt, item_gap_pt) = match config.spacing {
            Spacing::Compact => (8.0, 4.0),
            Spacing::Normal => (12.0, 6.0),
            Spacing::Relaxed => (16.0, 8.0),
            Spacing::Spacious => (22.0, 11.0),
        };

        Self {
            font_stack: font_stack(config.font_family),
            base_font_pt: match config.font_size {
                FontScale::Small => 9.5,
                FontScale::Medium => 10.5,
                FontScale::Large => 11.5,
            },
            line_height: match config.line_height {
                LineHeight::Tight => 1.25,
                LineHeight::Normal => 1.45,
                LineHeight::Relaxed => 1.65,
            },
            section_gap_pt,
            item_gap_pt,
            margin_mm: match config.page_margin {
                PageMargin::Narrow => 12.0,
                PageMargin::Normal => 18.0,
                PageMargin::Wide => 24.0,
            },
            name_size_pt: match config.name_size {
                NameSize::Small => 20.0,
                NameSize::Medium => 24.0,
                NameSize::Large => 30.0,
                NameSize::ExtraLarge => 36.0,
            },
            name_weight: match config.name_weight {
                NameWeight::Light => 300,
                NameWeight::Normal => 400,
                NameWeight::Bold => 700,
                NameWeight::Black => 900,
            },
            photo_size_pt: match config.photo_size {
                PhotoSize::Small => 56.0,
                PhotoSize::Medium => 72.0,
                PhotoSize::Large => 96.0,
            },
            sidebar_fraction: match config.sidebar_width {
                SidebarWidth::Narrow => 0.28,
                SidebarWidth::Normal => 0.33,
                SidebarWidth::Wide => 0.38,
            },
        }
    }
}

/// CSS font stack for a family.
pub fn font_stack(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Sans => "'Inter', 'Helvetica Neue', Arial, sans-serif",
        FontFamily::Serif => "'Merriweather', Georgia, 'Times New Roman', serif",
        FontFamily::Mono => "'JetBrains Mono', 'Fira Code', Menlo, monospace",
        FontFamily::Rounded => "'Nunito', 'Varela Round', Arial, sans-serif",
        FontFamily::Display => "'Poppins', 'Montserrat', Arial, sans-serif",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens() {
        let tokens = StyleTokens::resolve(&StyleConfiguration::default());
        assert_eq!(tokens.base_font_pt, 10.5);
        assert_eq!(tokens.name_weight, 700);
        assert_eq!(tokens.sidebar_fraction, 0.33);
    }

    #[test]
    fn test_every_family_has_a_generic_fallback() {
        for family in FontFamily::all() {
            let stack = font_stack(*family);
            assert!(
                stack.ends_with("sans-serif") || stack.ends_with("serif") || stack.ends_with("monospace"),
                "{stack}"
            );
        }
    }
}
