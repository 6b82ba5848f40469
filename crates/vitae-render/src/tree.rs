//! The render tree: a fully resolved, paint-ready description of one resume page.
//!
//! Produced by [`crate::compose`], consumed by [`crate::Renderer`] backends.
//! Everything here is plain data so two trees can be compared for equality.

use kurbo::Size;
use serde::Serialize;
use vitae_core::SerializableColor;
use vitae_core::style::{
    BorderDecoration, CompanyStyle, ContactStyle, DateAlign, DateStyle, DividerStyle, HeaderAlign, HeaderStyle,
    PhotoBorder, PhotoShape, SectionHeaderStyle, TagStyle, TextCase, TitleStyle,
};

/// A composed resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub page: PageStyle,
    pub header: HeaderBlock,
    pub layout: LayoutMode,
    /// Full-width section placed before the columns (the summary in single-column layouts).
    pub lede: Option<RenderedSection>,
    /// Columns, left to right.
    pub columns: Vec<Column>,
    pub overlays: Overlays,
}

impl RenderTree {
    /// All rendered sections in reading order (lede first, then column by column).
    pub fn sections(&self) -> impl Iterator<Item = &RenderedSection> {
        self.lede
            .iter()
            .chain(self.columns.iter().flat_map(|column| column.sections.iter()))
    }

    /// The column with the given role, if present.
    pub fn column(&self, role: ColumnRole) -> Option<&Column> {
        self.columns.iter().find(|column| column.role == role)
    }
}

/// Page-wide typography and geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageStyle {
    /// Page size in millimetres (A4).
    pub size_mm: Size,
    pub margin_mm: f64,
    pub background: SerializableColor,
    pub font_stack: &'static str,
    pub base_font_pt: f64,
    pub line_height: f64,
    pub text_color: SerializableColor,
    pub muted_color: SerializableColor,
    /// Theme colour for headings and accents.
    pub accent: SerializableColor,
    /// Theme colour for rules and frames.
    pub rule_color: SerializableColor,
    /// Theme colour for tinted backgrounds.
    pub tint: SerializableColor,
    pub section_gap_pt: f64,
    pub item_gap_pt: f64,
    pub divider: DividerStyle,
}

/// Name, title, contacts and photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub name: Option<String>,
    pub name_case: TextCase,
    pub name_size_pt: f64,
    pub name_weight: u16,
    pub title: Option<String>,
    pub title_style: TitleStyle,
    pub align: HeaderAlign,
    pub style: HeaderStyle,
    /// Background band for banner headers.
    pub band: Option<SerializableColor>,
    pub contact_style: ContactStyle,
    pub contacts: Vec<ContactItem>,
    pub photo: Option<Photo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    LinkedIn,
    Portfolio,
}

impl ContactKind {
    /// Short glyph shown before the contact when icons are enabled.
    pub fn icon(self) -> &'static str {
        match self {
            ContactKind::Email => "✉",
            ContactKind::Phone => "☎",
            ContactKind::Location => "⌖",
            ContactKind::LinkedIn => "in",
            ContactKind::Portfolio => "⌂",
        }
    }
}

/// One contact detail. The text is always complete, never shortened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub text: String,
    pub href: Option<String>,
    /// Icon colour, `None` when icons are hidden.
    pub icon_color: Option<SerializableColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub src: String,
    pub shape: PhotoShape,
    pub border: PhotoBorder,
    pub border_color: SerializableColor,
    pub size_pt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Resolved page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LayoutMode {
    SingleColumn { grid: bool },
    Sidebar { side: Side },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// The only column of a single-column layout.
    Full,
    Main,
    Sidebar,
    GridLeft,
    GridRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub role: ColumnRole,
    /// Share of the content width, 0.0 - 1.0.
    pub width_fraction: f64,
    pub background: Option<SerializableColor>,
    pub text_color: SerializableColor,
    pub sections: Vec<RenderedSection>,
}

/// A visible section with content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub id: String,
    pub header: SectionHeader,
    pub content: ContentBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionHeader {
    pub title: String,
    pub style: SectionHeaderStyle,
    pub case: TextCase,
    pub color: SerializableColor,
    pub rule_color: SerializableColor,
}

/// Body of a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Free text; each line is a user line break.
    Paragraph { lines: Vec<String>, justified: bool },
    Entries { entries: Vec<EntryBlock> },
    Skills { skills: SkillBlock },
    Bullets { marker: Option<char>, items: Vec<String> },
}

/// One experience or education entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryBlock {
    pub id: String,
    /// Role or institution.
    pub title: Option<String>,
    /// Company or degree.
    pub subtitle: Option<String>,
    pub subtitle_style: CompanyStyle,
    pub date: Option<String>,
    pub date_align: DateAlign,
    pub date_style: DateStyle,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SkillBlock {
    Tags {
        names: Vec<String>,
        style: TagStyle,
        fill: SerializableColor,
        text: SerializableColor,
        border: SerializableColor,
    },
    List { marker: Option<char>, names: Vec<String> },
    Bars {
        bars: Vec<SkillBar>,
        fill: SerializableColor,
        track: SerializableColor,
    },
    /// All names in one comma-separated sentence.
    Sentence { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillBar {
    pub name: String,
    /// Clamped to 0..=100.
    pub level: u8,
}

impl SkillBar {
    /// Filled share of the bar, 0.0 - 1.0.
    pub fn fraction(&self) -> f64 {
        f64::from(self.level) / 100.0
    }
}

/// Decoration painted independently of the sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlays {
    pub border: BorderDecoration,
    pub border_color: SerializableColor,
    pub watermark: Option<Watermark>,
    pub footer: Option<String>,
}

/// Diagonal, faint text across the page centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watermark {
    pub text: String,
    pub color: SerializableColor,
    pub angle_deg: f64,
}
