//! Read-only catalog of themes and template presets.

use crate::template::{TemplatePreset, builtin_templates};
use crate::theme::{BUILTIN_THEMES, DEFAULT_THEME_KEY, Theme};
use std::sync::LazyLock;

static BUILTIN: LazyLock<StyleRegistry> = LazyLock::new(StyleRegistry::with_builtins);

/// Themes and presets available to the renderer and the template applier.
///
/// Passed by reference to whatever needs it; never modified after construction.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    themes: Vec<Theme>,
    templates: Vec<TemplatePreset>,
    default_theme: Theme,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl StyleRegistry {
    /// Build a registry. `default_theme` answers lookups for unknown keys.
    pub fn new(themes: Vec<Theme>, templates: Vec<TemplatePreset>, default_theme: Theme) -> Self {
        Self {
            themes,
            templates,
            default_theme,
        }
    }

    /// A registry holding the built-in themes and presets.
    pub fn with_builtins() -> Self {
        let default_theme = BUILTIN_THEMES
            .iter()
            .find(|theme| theme.key == DEFAULT_THEME_KEY)
            .copied()
            .unwrap_or(BUILTIN_THEMES[0]);
        Self::new(BUILTIN_THEMES.to_vec(), builtin_templates(), default_theme)
    }

    /// Shared instance of [`StyleRegistry::with_builtins`].
    pub fn builtin() -> &'static StyleRegistry {
        &BUILTIN
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn templates(&self) -> &[TemplatePreset] {
        &self.templates
    }

    pub fn theme(&self, key: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.key == key)
    }

    /// Theme for `key`, or the default theme when the key is unknown.
    pub fn resolve_theme(&self, key: &str) -> &Theme {
        self.theme(key).unwrap_or_else(|| {
            log::debug!("unknown theme {key:?}, using {}", self.default_theme.key);
            &self.default_theme
        })
    }

    pub fn default_theme(&self) -> &Theme {
        &self.default_theme
    }

    pub fn template(&self, key: &str) -> Option<&TemplatePreset> {
        self.templates.iter().find(|preset| preset.key == key)
    }
}
