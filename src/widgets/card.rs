//! Card widget: a titled container.
//!
//! Content is not part of the card's own state. Child widgets mounted under
//! the card in a [`Document`](crate::document::Document) render into its
//! `content` slot.

use std::any::Any;

use serde::Deserialize;

use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding, AttributeBinding,
    Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Patch, View};
use crate::theme::ThemeKey;
use crate::widget::{Host, Widget};

use super::{apply_theme, assign_text, themed};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub title: String,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: "Card".into(),
            theme: ThemeKey::default(),
        }
    }
}

impl CardConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

#[derive(Debug)]
pub struct Card {
    host: Host,
    title: String,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_config(CardConfig::default().with_title(title))
    }

    pub fn from_config(config: CardConfig) -> Self {
        let mut card = Self {
            host: Host::new(),
            title: CardConfig::default().title,
        };
        card.set_title(config.title);
        apply_theme(&mut card, config.theme);
        card
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        set_property(self, "title", FieldValue::text(title))
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::from_config(CardConfig::default())
    }
}

impl Reflect for Card {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "title",
            Coercion::Text { default: "Card" },
            |w: &Card| FieldValue::text(w.title.as_str()),
            |w: &mut Card, v: FieldValue| assign_text(&mut w.title, v),
            Invalidation::Patch,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Card {
    fn widget_type(&self) -> &'static str {
        "Card"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        themed(View::new("div"), &self.host)
            .part("card")
            .class("card")
            .child(View::new("h3").part("title").class("card-title").text(self.title.as_str()))
            .child(
                View::new("div")
                    .part("content")
                    .class("card-content")
                    .child(View::new("slot")),
            )
    }

    fn patches(&self) -> Vec<Patch> {
        vec![Patch::text("title", self.title.as_str())]
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::set_attribute;
    use crate::widget::flush;

    #[test]
    fn empty_title_falls_back() {
        let mut card = Card::new("Stats");
        set_attribute(&mut card, "title", Some(""));
        assert_eq!(card.title(), "Card");
    }

    #[test]
    fn title_patches_in_place() {
        let mut card = Card::new("Stats");
        flush(&mut card, None);
        card.set_title("Totals");
        assert_eq!(flush(&mut card, None), Invalidation::Patch);
        assert_eq!(card.host().surface().part_text("title").as_deref(), Some("Totals"));
        assert_eq!(card.host().surface().rebuild_count(), 1);
    }

    #[test]
    fn renders_markup() {
        let mut card = Card::default();
        flush(&mut card, None);
        insta::assert_snapshot!(card.host().surface().to_markup(), @r#"
        <div part="card" class="theme-light variant-blur card">
          <h3 part="title" class="card-title">Card</h3>
          <div part="content" class="card-content">
            <slot></slot>
          </div>
        </div>
        "#);
    }
}
