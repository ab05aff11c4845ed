//! Loader widget: an activity indicator in three styles.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding, AttributeBinding,
    Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Patch, View};
use crate::theme::ThemeKey;
use crate::widget::{Host, Widget};

use super::{apply_theme, assign, assign_bool, assign_size, assign_text, themed, Size};

/// Animation style of a [`Loader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    #[default]
    Spinner,
    Dots,
    Pulse,
}

impl LoaderKind {
    pub const KEYWORDS: &'static [&'static str] = &["spinner", "dots", "pulse"];

    pub fn keyword(self) -> &'static str {
        match self {
            LoaderKind::Spinner => "spinner",
            LoaderKind::Dots => "dots",
            LoaderKind::Pulse => "pulse",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<LoaderKind> {
        match keyword {
            "spinner" => Some(LoaderKind::Spinner),
            "dots" => Some(LoaderKind::Dots),
            "pulse" => Some(LoaderKind::Pulse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub size: Size,
    #[serde(rename = "type")]
    pub kind: LoaderKind,
    pub visible: bool,
    pub label: String,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            size: Size::Medium,
            kind: LoaderKind::Spinner,
            visible: true,
            label: String::new(),
            theme: ThemeKey::default(),
        }
    }
}

impl LoaderConfig {
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_kind(mut self, kind: LoaderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Loader {
    host: Host,
    size: Size,
    kind: LoaderKind,
    visible: bool,
    label: String,
}

impl Loader {
    pub fn new(kind: LoaderKind) -> Self {
        Self::from_config(LoaderConfig::default().with_kind(kind))
    }

    pub fn from_config(config: LoaderConfig) -> Self {
        let mut loader = Self {
            host: Host::new(),
            size: Size::Medium,
            kind: LoaderKind::Spinner,
            visible: true,
            label: String::new(),
        };
        set_property(&mut loader, "size", FieldValue::text(config.size.keyword()));
        set_property(&mut loader, "type", FieldValue::text(config.kind.keyword()));
        set_property(&mut loader, "visible", FieldValue::Bool(config.visible));
        set_property(&mut loader, "label", FieldValue::text(config.label));
        apply_theme(&mut loader, config.theme);
        loader
    }

    pub fn kind(&self) -> LoaderKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) -> bool {
        set_property(self, "visible", FieldValue::Bool(true))
    }

    pub fn hide(&mut self) -> bool {
        set_property(self, "visible", FieldValue::Bool(false))
    }

    fn indicator(&self) -> View {
        let base = View::new("div")
            .part("indicator")
            .class("loader-indicator")
            .class(self.kind.keyword());
        match self.kind {
            LoaderKind::Dots => {
                base.children((0..3).map(|_| View::new("span").class("loader-dot")))
            }
            LoaderKind::Spinner | LoaderKind::Pulse => base,
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::from_config(LoaderConfig::default())
    }
}

impl Reflect for Loader {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "size",
            Coercion::Keyword { allowed: Size::KEYWORDS, default: "medium" },
            |w: &Loader| FieldValue::text(w.size.keyword()),
            |w: &mut Loader, v: FieldValue| assign_size(&mut w.size, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "type",
            Coercion::Keyword { allowed: LoaderKind::KEYWORDS, default: "spinner" },
            |w: &Loader| FieldValue::text(w.kind.keyword()),
            |w: &mut Loader, v: FieldValue| {
                v.as_text()
                    .and_then(LoaderKind::from_keyword)
                    .is_some_and(|kind| assign(&mut w.kind, kind))
            },
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "visible",
            Coercion::NotFalse,
            |w: &Loader| FieldValue::Bool(w.visible),
            |w: &mut Loader, v: FieldValue| assign_bool(&mut w.visible, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "label",
            Coercion::Text { default: "" },
            |w: &Loader| FieldValue::text(w.label.as_str()),
            |w: &mut Loader, v: FieldValue| assign_text(&mut w.label, v),
            Invalidation::Patch,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Loader {
    fn widget_type(&self) -> &'static str {
        "Loader"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        themed(View::new("div"), &self.host)
            .part("loader")
            .class("loader")
            .class(self.size.keyword())
            .class_if("hidden", !self.visible)
            .attr("role", "status")
            .attr("aria-busy", self.visible.to_string())
            .child(self.indicator())
            .child(View::new("span").part("label").class("loader-label").text(self.label.as_str()))
    }

    fn patches(&self) -> Vec<Patch> {
        vec![
            Patch::class("loader", "hidden", !self.visible),
            Patch::attr("loader", "aria-busy", Some(self.visible.to_string())),
            Patch::text("label", self.label.as_str()),
        ]
    }

    fn observed_attributes(&self) -> Vec<&'static str> {
        observed::<Self>()
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> bool {
        attribute_changed(self, name, value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
