//! Persona widget: an avatar with a name, title and description.
//!
//! Without an avatar image the first letter of the name stands in.

use std::any::Any;

use serde::Deserialize;

use crate::event::{Detail, Notification, NotificationKind, UiEvent};
use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding, AttributeBinding,
    Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, View};
use crate::theme::ThemeKey;
use crate::widget::{Context, Host, Widget};

use super::{apply_theme, assign_size, assign_text, themed, Size};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub description: String,
    pub size: Size,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Unknown".into(),
            title: String::new(),
            avatar: String::new(),
            description: String::new(),
            size: Size::Medium,
            theme: ThemeKey::default(),
        }
    }
}

impl PersonaConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Persona {
    host: Host,
    name: String,
    title: String,
    avatar: String,
    description: String,
    size: Size,
}

impl Persona {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(PersonaConfig::default().with_name(name))
    }

    pub fn from_config(config: PersonaConfig) -> Self {
        let mut persona = Self {
            host: Host::new(),
            name: PersonaConfig::default().name,
            title: String::new(),
            avatar: String::new(),
            description: String::new(),
            size: Size::Medium,
        };
        set_property(&mut persona, "name", FieldValue::text(config.name));
        set_property(&mut persona, "title", FieldValue::text(config.title));
        set_property(&mut persona, "avatar", FieldValue::text(config.avatar));
        set_property(&mut persona, "description", FieldValue::text(config.description));
        set_property(&mut persona, "size", FieldValue::text(config.size.keyword()));
        apply_theme(&mut persona, config.theme);
        persona
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Uppercased first letter of the name.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    fn avatar_view(&self) -> View {
        let avatar = View::new("div").part("avatar").class("persona-avatar");
        if self.avatar.is_empty() {
            avatar.child(View::new("span").class("persona-initial").text(self.initial()))
        } else {
            avatar.child(
                View::new("img")
                    .attr("src", self.avatar.as_str())
                    .attr("alt", self.name.as_str()),
            )
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::from_config(PersonaConfig::default())
    }
}

impl Reflect for Persona {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "name",
            Coercion::Text { default: "Unknown" },
            |w: &Persona| FieldValue::text(w.name.as_str()),
            |w: &mut Persona, v: FieldValue| assign_text(&mut w.name, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "title",
            Coercion::Text { default: "" },
            |w: &Persona| FieldValue::text(w.title.as_str()),
            |w: &mut Persona, v: FieldValue| assign_text(&mut w.title, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "avatar",
            Coercion::Text { default: "" },
            |w: &Persona| FieldValue::text(w.avatar.as_str()),
            |w: &mut Persona, v: FieldValue| assign_text(&mut w.avatar, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "description",
            Coercion::Text { default: "" },
            |w: &Persona| FieldValue::text(w.description.as_str()),
            |w: &mut Persona, v: FieldValue| assign_text(&mut w.description, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "size",
            Coercion::Keyword { allowed: Size::KEYWORDS, default: "medium" },
            |w: &Persona| FieldValue::text(w.size.keyword()),
            |w: &mut Persona, v: FieldValue| assign_size(&mut w.size, v),
            Invalidation::Rebuild,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Persona {
    fn widget_type(&self) -> &'static str {
        "Persona"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        let details = View::new("div")
            .part("details")
            .class("persona-details")
            .child(View::new("div").part("name").class("persona-name").text(self.name.as_str()))
            .child_opt((!self.title.is_empty()).then(|| {
                View::new("div").part("title").class("persona-title").text(self.title.as_str())
            }))
            .child_opt((!self.description.is_empty()).then(|| {
                View::new("div")
                    .part("description")
                    .class("persona-description")
                    .text(self.description.as_str())
            }));

        themed(View::new("div"), &self.host)
            .part("persona")
            .class("persona")
            .class(self.size.keyword())
            .child(self.avatar_view())
            .child(details)
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[("persona", Listen::Click)]
    }

    fn observed_attributes(&self) -> Vec<&'static str> {
        observed::<Self>()
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> bool {
        attribute_changed(self, name, value)
    }

    fn handle_event(&mut self, _part: &str, event: &UiEvent, _cx: &mut Context<'_>) {
        if let UiEvent::Click(_) = event {
            self.host.emit(Notification::new(
                NotificationKind::PersonaClick,
                Detail::Persona {
                    name: self.name.clone(),
                    title: self.title.clone(),
                },
            ));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
