//! Theme selection.
//!
//! Widgets never compute colors. They carry a [`ThemeKey`] (theme plus
//! variant), expose it as classes on their root element, and hand it to an
//! optional [`StyleProvider`] supplied by the embedder.

use serde::{Deserialize, Serialize};

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const KEYWORDS: &'static [&'static str] = &["light", "dark"];

    pub fn keyword(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Theme> {
        match keyword {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Rendering variant: translucent blur effects or a cheaper flat look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Blur,
    Performance,
}

impl Variant {
    pub const KEYWORDS: &'static [&'static str] = &["blur", "performance"];

    pub fn keyword(self) -> &'static str {
        match self {
            Variant::Blur => "blur",
            Variant::Performance => "performance",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Variant> {
        match keyword {
            "blur" => Some(Variant::Blur),
            "performance" => Some(Variant::Performance),
            _ => None,
        }
    }
}

/// The pair a style provider is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ThemeKey {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub variant: Variant,
}

impl ThemeKey {
    pub fn new(theme: Theme, variant: Variant) -> Self {
        Self { theme, variant }
    }

    /// Root element classes: `theme-<theme>` and `variant-<variant>`.
    pub fn classes(self) -> [String; 2] {
        [
            format!("theme-{}", self.theme.keyword()),
            format!("variant-{}", self.variant.keyword()),
        ]
    }
}

/// External styling collaborator: a pure function from a theme key and a
/// widget type to inline style declarations for the widget's root element.
pub trait StyleProvider {
    fn declarations(&self, key: ThemeKey, widget_type: &str) -> Vec<(String, String)>;
}

impl<F> StyleProvider for F
where
    F: Fn(ThemeKey, &str) -> Vec<(String, String)>,
{
    fn declarations(&self, key: ThemeKey, widget_type: &str) -> Vec<(String, String)> {
        self(key, widget_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip() {
        for t in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_keyword(t.keyword()), Some(t));
        }
        for v in [Variant::Blur, Variant::Performance] {
            assert_eq!(Variant::from_keyword(v.keyword()), Some(v));
        }
        assert_eq!(Theme::from_keyword("sepia"), None);
    }

    #[test]
    fn key_classes() {
        let key = ThemeKey::new(Theme::Dark, Variant::Performance);
        assert_eq!(key.classes(), ["theme-dark".to_string(), "variant-performance".to_string()]);
    }

    #[test]
    fn key_deserializes_with_defaults() {
        let key: ThemeKey = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(key, ThemeKey::new(Theme::Dark, Variant::Blur));
    }

    #[test]
    fn closures_are_style_providers() {
        let provider = |key: ThemeKey, _: &str| {
            vec![("color-scheme".to_string(), key.theme.keyword().to_string())]
        };
        let decls = provider.declarations(ThemeKey::default(), "Button");
        assert_eq!(decls, vec![("color-scheme".to_string(), "light".to_string())]);
    }
}
