//! Style configuration for a rendered resume.
//!
//! Every option is a closed enumeration (or a flag / free text). Unknown
//! values read from a persisted document fall back to the option's
//! default instead of failing, so a single bad value never blanks the page.

use crate::lenient::Lenient;
use serde::{Deserialize, Serialize};

/// Raw wire value of an enumerated option before it is resolved.
///
/// Anything that is not a string (numbers, objects, null) is accepted and
/// treated as unrecognized.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Key(String),
    Other(serde::de::IgnoredAny),
}

macro_rules! style_option {
    (
        $(#[$meta:meta])*
        $name:ident default $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "OptionValue", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl $name {
            /// Wire key of this value.
            pub fn key(self) -> &'static str {
                match self {
                    $( $name::$variant => $key, )+
                }
            }

            /// Look up a value by wire key.
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $( $key => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Resolve a wire key, falling back to the default when unrecognized.
            pub fn resolve(key: &str) -> Self {
                Self::from_key(key).unwrap_or_else(|| {
                    log::debug!(
                        "unrecognized {} value {:?}, using {:?}",
                        stringify!($name),
                        key,
                        $name::$default
                    );
                    $name::$default
                })
            }

            /// All values, in display order.
            pub fn all() -> &'static [$name] {
                &[ $( $name::$variant, )+ ]
            }
        }

        impl From<OptionValue> for $name {
            fn from(value: OptionValue) -> Self {
                match value {
                    OptionValue::Key(key) => Self::resolve(&key),
                    OptionValue::Other(_) => $name::$default,
                }
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.key()
            }
        }
    };
}

style_option! {
    /// Body font family.
    FontFamily default Sans {
        Sans => "sans",
        Serif => "serif",
        Mono => "mono",
        Rounded => "rounded",
        Display => "display",
    }
}

style_option! {
    /// Base text size.
    FontScale default Medium {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

style_option! {
    LineHeight default Normal {
        Tight => "tight",
        Normal => "normal",
        Relaxed => "relaxed",
    }
}

style_option! {
    /// Vertical rhythm between sections and entries.
    Spacing default Normal {
        Compact => "compact",
        Normal => "normal",
        Relaxed => "relaxed",
        Spacious => "spacious",
    }
}

style_option! {
    PageMargin default Normal {
        Narrow => "narrow",
        Normal => "normal",
        Wide => "wide",
    }
}

style_option! {
    PageBackground default White {
        White => "white",
        /// Faint wash of the theme background colour.
        Tint => "tint",
        /// Warm off-white.
        Paper => "paper",
    }
}

style_option! {
    NameSize default Large {
        Small => "small",
        Medium => "medium",
        Large => "large",
        ExtraLarge => "xl",
    }
}

style_option! {
    NameWeight default Bold {
        Light => "light",
        Normal => "normal",
        Bold => "bold",
        Black => "black",
    }
}

style_option! {
    /// Letter case transform applied at paint time.
    TextCase default AsWritten {
        AsWritten => "none",
        Uppercase => "uppercase",
        Capitalize => "capitalize",
    }
}

style_option! {
    /// Presentation of the professional title under the name.
    TitleStyle default Plain {
        Plain => "plain",
        Accent => "accent",
        Italic => "italic",
        Uppercase => "uppercase",
    }
}

style_option! {
    HeaderAlign default Left {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

style_option! {
    /// Decoration of the personal header block.
    HeaderStyle default Plain {
        Plain => "plain",
        Banner => "banner",
        Underline => "underline",
        Boxed => "boxed",
    }
}

style_option! {
    PhotoShape default Circle {
        Circle => "circle",
        Rounded => "rounded",
        Square => "square",
    }
}

style_option! {
    PhotoBorder default None {
        None => "none",
        Thin => "thin",
        Thick => "thick",
        Accent => "accent",
    }
}

style_option! {
    PhotoSize default Medium {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

style_option! {
    /// Arrangement of the contact line.
    ContactStyle default Inline {
        Inline => "inline",
        Stacked => "stacked",
        Pills => "pills",
    }
}

style_option! {
    SectionHeaderStyle default Underline {
        Underline => "underline",
        /// Accent bar on the leading edge.
        Bar => "bar",
        Filled => "filled",
        Boxed => "boxed",
        Plain => "plain",
        Centered => "centered",
    }
}

style_option! {
    /// Rule drawn between sections.
    DividerStyle default Solid {
        None => "none",
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
        Double => "double",
    }
}

style_option! {
    /// Decorative frame around the page.
    BorderDecoration default None {
        None => "none",
        Simple => "simple",
        Double => "double",
        Thick => "thick",
        Offset => "offset",
        Rounded => "rounded",
        Minimal => "minimal",
        CornerAccents => "corner-accents",
    }
}

style_option! {
    SkillStyle default Tags {
        Tags => "tags",
        List => "list",
        Bars => "bars",
        Comma => "comma",
    }
}

style_option! {
    /// Chip appearance in tag mode.
    TagStyle default Filled {
        Filled => "filled",
        Outline => "outline",
        Pill => "pill",
    }
}

style_option! {
    BulletStyle default Disc {
        Disc => "disc",
        Square => "square",
        Check => "check",
        None => "none",
    }
}

style_option! {
    /// Placement of the date token on experience/education entries.
    DateAlign default Right {
        Right => "right",
        Below => "below",
    }
}

style_option! {
    DateStyle default Plain {
        Plain => "plain",
        Italic => "italic",
        Bold => "bold",
        Pill => "pill",
    }
}

style_option! {
    /// Styling of the company / degree line.
    CompanyStyle default Italic {
        Plain => "plain",
        Italic => "italic",
        Bold => "bold",
        Accent => "accent",
    }
}

style_option! {
    SidebarBackground default None {
        None => "none",
        Tint => "tint",
        Fill => "fill",
        Dark => "dark",
    }
}

style_option! {
    SidebarWidth default Normal {
        Narrow => "narrow",
        Normal => "normal",
        Wide => "wide",
    }
}

style_option! {
    /// Page layout.
    ///
    /// `Auto` covers documents saved before the layout option existed: the
    /// layout is then inferred from the sidebar background.
    LayoutType default Auto {
        Auto => "auto",
        Single => "single",
        Sidebar => "sidebar",
        /// Single column with a two-column grid below the summary.
        Grid => "grid",
    }
}

impl BulletStyle {
    /// Marker glyph, `None` when bullets are hidden.
    pub fn glyph(self) -> Option<char> {
        match self {
            BulletStyle::Disc => Some('•'),
            BulletStyle::Square => Some('▪'),
            BulletStyle::Check => Some('✓'),
            BulletStyle::None => None,
        }
    }
}

macro_rules! style_fields {
    (
        $(
            $(#[$fmeta:meta])*
            $field:ident : $ty:ty = $default:expr
        ),+ $(,)?
    ) => {
        /// The full set of visual choices for a resume, independent of content.
        ///
        /// Reading never fails on a single option: a missing, `null` or
        /// unreadable option takes its default.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(from = "StyleConfigurationRepr", rename_all = "camelCase")]
        pub struct StyleConfiguration {
            $( $(#[$fmeta])* pub $field: $ty, )+
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct StyleConfigurationRepr {
            $( $field: Option<Lenient<$ty>>, )+
        }

        impl From<StyleConfigurationRepr> for StyleConfiguration {
            fn from(repr: StyleConfigurationRepr) -> Self {
                Self {
                    $(
                        $field: repr
                            .$field
                            .and_then(|value| value.into_valid(stringify!($field)))
                            .unwrap_or_else(|| $default),
                    )+
                }
            }
        }

        impl Default for StyleConfiguration {
            fn default() -> Self {
                Self {
                    $( $field: $default, )+
                }
            }
        }

        /// A partial [`StyleConfiguration`]: only the options that are `Some` are set.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct StylePatch {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl StyleConfiguration {
            /// Shallow merge: options set in `patch` replace ours, the rest are kept.
            pub fn merged(&self, patch: &StylePatch) -> Self {
                Self {
                    $(
                        $field: match &patch.$field {
                            Some(value) => value.clone(),
                            None => self.$field.clone(),
                        },
                    )+
                }
            }
        }

        impl StylePatch {
            /// Number of options this patch sets.
            pub fn len(&self) -> usize {
                [$( self.$field.is_some() ),+].iter().filter(|set| **set).count()
            }

            /// True when the patch sets nothing.
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }
        }
    };
}

style_fields! {
    /// Theme key, resolved against the style registry at render time.
    theme_color: String = "blue".to_string(),
    font_family: FontFamily = FontFamily::Sans,
    font_size: FontScale = FontScale::Medium,
    line_height: LineHeight = LineHeight::Normal,
    spacing: Spacing = Spacing::Normal,
    page_margin: PageMargin = PageMargin::Normal,
    page_background: PageBackground = PageBackground::White,
    name_size: NameSize = NameSize::Large,
    name_weight: NameWeight = NameWeight::Bold,
    name_case: TextCase = TextCase::AsWritten,
    title_style: TitleStyle = TitleStyle::Plain,
    header_align: HeaderAlign = HeaderAlign::Left,
    header_style: HeaderStyle = HeaderStyle::Plain,
    show_photo: bool = true,
    photo_shape: PhotoShape = PhotoShape::Circle,
    photo_border: PhotoBorder = PhotoBorder::None,
    photo_size: PhotoSize = PhotoSize::Medium,
    contact_style: ContactStyle = ContactStyle::Inline,
    show_icons: bool = true,
    /// Show the LinkedIn and portfolio links in the header.
    show_links: bool = true,
    section_header_style: SectionHeaderStyle = SectionHeaderStyle::Underline,
    section_header_case: TextCase = TextCase::Uppercase,
    divider_style: DividerStyle = DividerStyle::Solid,
    border_style: BorderDecoration = BorderDecoration::None,
    skill_style: SkillStyle = SkillStyle::Tags,
    tag_style: TagStyle = TagStyle::Filled,
    bullet_style: BulletStyle = BulletStyle::Disc,
    date_align: DateAlign = DateAlign::Right,
    date_style: DateStyle = DateStyle::Plain,
    company_style: CompanyStyle = CompanyStyle::Italic,
    sidebar_bg: SidebarBackground = SidebarBackground::None,
    sidebar_width: SidebarWidth = SidebarWidth::Normal,
    layout_type: LayoutType = LayoutType::Auto,
    /// Put the sidebar on the right instead of the left.
    layout_reverse: bool = false,
    /// Diagonal watermark text; empty for none.
    watermark: String = String::new(),
    /// Footer line; empty for none.
    custom_footer: String = String::new(),
    /// Section ids placed in the sidebar column, overriding the default split.
    sidebar_sections: Option<Vec<String>> = None,
    /// Section ids placed in the main column, overriding the default split.
    main_sections: Option<Vec<String>> = None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enum_value_falls_back_to_default() {
        let json = r#"{"skillStyle": "sparkles", "borderStyle": "corner-accents", "bulletStyle": 7}"#;
        let config: StyleConfiguration = serde_json::from_str(json).unwrap();

        assert_eq!(config.skill_style, SkillStyle::Tags);
        assert_eq!(config.border_style, BorderDecoration::CornerAccents);
        assert_eq!(config.bullet_style, BulletStyle::Disc);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: StyleConfiguration = serde_json::from_str(r#"{"themeColor": "rose"}"#).unwrap();

        assert_eq!(config.theme_color, "rose");
        assert!(config.show_photo);
        assert_eq!(config.layout_type, LayoutType::Auto);
        assert_eq!(config.section_header_case, TextCase::Uppercase);
    }

    #[test]
    fn test_serializes_with_wire_keys() {
        let config = StyleConfiguration {
            sidebar_bg: SidebarBackground::Tint,
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["sidebarBg"], "tint");
        assert_eq!(value["borderStyle"], "none");
        assert_eq!(value["nameSize"], "large");
    }

    #[test]
    fn test_merged_overwrites_only_patched_options() {
        let config = StyleConfiguration {
            watermark: "DRAFT".to_string(),
            show_photo: true,
            ..Default::default()
        };
        let patch = StylePatch {
            show_photo: Some(false),
            skill_style: Some(SkillStyle::Bars),
            ..Default::default()
        };

        let merged = config.merged(&patch);
        assert!(!merged.show_photo);
        assert_eq!(merged.skill_style, SkillStyle::Bars);
        assert_eq!(merged.watermark, "DRAFT");
        assert_eq!(patch.len(), 2);
    }

    #[test]
    fn test_patch_serializes_only_set_options() {
        let patch = StylePatch {
            divider_style: Some(DividerStyle::Dotted),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value, serde_json::json!({"dividerStyle": "dotted"}));
    }

    #[test]
    fn test_unreadable_plain_options_keep_the_rest() {
        let config: StyleConfiguration =
            serde_json::from_str(r#"{"themeColor":"rose","skillStyle":"bars","watermark":null}"#).unwrap();
        assert_eq!(config.theme_color, "rose");
        assert_eq!(config.skill_style, SkillStyle::Bars);
        assert_eq!(config.watermark, "");

        let config: StyleConfiguration = serde_json::from_str(
            r#"{"showPhoto":"false","showIcons":null,"layoutReverse":1,"customFooter":5,
                "themeColor":["teal"],"sidebarSections":"skills","mainSections":["summary",3],
                "dividerStyle":"dotted"}"#,
        )
        .unwrap();
        let defaults = StyleConfiguration::default();
        assert_eq!(config.show_photo, defaults.show_photo);
        assert_eq!(config.show_icons, defaults.show_icons);
        assert_eq!(config.layout_reverse, defaults.layout_reverse);
        assert_eq!(config.custom_footer, defaults.custom_footer);
        assert_eq!(config.theme_color, "blue");
        assert_eq!(config.sidebar_sections, None);
        assert_eq!(config.main_sections, None);
        assert_eq!(config.divider_style, DividerStyle::Dotted);
    }

    #[test]
    fn test_bullet_glyphs() {
        assert_eq!(BulletStyle::Check.glyph(), Some('✓'));
        assert_eq!(BulletStyle::None.glyph(), None);
        assert_eq!(BulletStyle::all().len(), 4);
    }
}
