//! Colour themes.
//!
//! Theme palettes are derived from the Tailwind CSS colour scale, each
//! theme picking one hue for text, borders, tinted backgrounds, fills and
//! icons.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Same colour with the given opacity (0.0 - 1.0).
    pub fn with_opacity(self, opacity: f32) -> Self {
        Color::from(self).with_alpha(opacity.clamp(0.0, 1.0)).into()
    }

    /// CSS hex notation, `#rrggbb` or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A named colour palette referenced by `StyleConfiguration::theme_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Lookup key (e.g. "blue").
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Headings and accented text.
    pub text: SerializableColor,
    /// Rules, dividers and frames.
    pub border: SerializableColor,
    /// Faint background wash.
    pub background: SerializableColor,
    /// Solid fills (banners, bars, chips).
    pub fill: SerializableColor,
    /// Contact icons.
    pub icon: SerializableColor,
}

impl Theme {
    const fn new(
        key: &'static str,
        name: &'static str,
        text: (u8, u8, u8),
        border: (u8, u8, u8),
        background: (u8, u8, u8),
        fill: (u8, u8, u8),
        icon: (u8, u8, u8),
    ) -> Self {
        Self {
            key,
            name,
            text: SerializableColor::rgb(text.0, text.1, text.2),
            border: SerializableColor::rgb(border.0, border.1, border.2),
            background: SerializableColor::rgb(background.0, background.1, background.2),
            fill: SerializableColor::rgb(fill.0, fill.1, fill.2),
            icon: SerializableColor::rgb(icon.0, icon.1, icon.2),
        }
    }
}

/// Key of the theme used when a configuration names an unknown one.
pub const DEFAULT_THEME_KEY: &str = "blue";

/// Body text colour shared by all themes.
pub const BODY_TEXT: SerializableColor = SerializableColor::rgb(31, 41, 55);

/// Secondary text (dates, captions).
pub const MUTED_TEXT: SerializableColor = SerializableColor::rgb(107, 114, 128);

// Shades: text = 800, border = 500, background = 50, fill = 600, icon = 500
pub const BUILTIN_THEMES: &[Theme] = &[
    Theme::new("blue", "Blue", (30, 64, 175), (59, 130, 246), (239, 246, 255), (37, 99, 235), (59, 130, 246)),
    Theme::new("indigo", "Indigo", (55, 48, 163), (99, 102, 241), (238, 242, 255), (79, 70, 229), (99, 102, 241)),
    Theme::new("violet", "Violet", (91, 33, 182), (139, 92, 246), (245, 243, 255), (124, 58, 237), (139, 92, 246)),
    Theme::new("emerald", "Emerald", (6, 95, 70), (16, 185, 129), (236, 253, 245), (5, 150, 105), (16, 185, 129)),
    Theme::new("teal", "Teal", (17, 94, 89), (20, 184, 166), (240, 253, 250), (13, 148, 136), (20, 184, 166)),
    Theme::new("sky", "Sky", (7, 89, 133), (14, 165, 233), (240, 249, 255), (2, 132, 199), (14, 165, 233)),
    Theme::new("rose", "Rose", (159, 18, 57), (244, 63, 94), (255, 241, 242), (225, 29, 72), (244, 63, 94)),
    Theme::new("crimson", "Crimson", (153, 27, 27), (239, 68, 68), (254, 242, 242), (220, 38, 38), (239, 68, 68)),
    Theme::new("amber", "Amber", (146, 64, 14), (245, 158, 11), (255, 251, 235), (217, 119, 6), (245, 158, 11)),
    Theme::new("orange", "Orange", (154, 52, 18), (249, 115, 22), (255, 247, 237), (234, 88, 12), (249, 115, 22)),
    Theme::new("slate", "Slate", (30, 41, 59), (100, 116, 139), (248, 250, 252), (71, 85, 105), (100, 116, 139)),
    Theme::new("charcoal", "Charcoal", (23, 23, 23), (82, 82, 82), (250, 250, 250), (38, 38, 38), (64, 64, 64)),
];
