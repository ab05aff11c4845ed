//! Button widget: a pressable button with a text label.
//!
//! The pressed look (`active`) follows the pointer: set on pointer down,
//! cleared on release, leave or cancel. A click is re-emitted to the
//! embedder only while the button is enabled.

use std::any::Any;

use serde::Deserialize;

use crate::event::{Notification, NotificationKind, UiEvent};
use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding, AttributeBinding,
    Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, Patch, View};
use crate::theme::ThemeKey;
use crate::widget::{Context, Host, Widget};

use super::{apply_theme, assign_bool, assign_text, themed};

// ---------------------------------------------------------------------------
// ButtonConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub text: String,
    pub disabled: bool,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            text: "Button".into(),
            disabled: false,
            theme: ThemeKey::default(),
        }
    }
}

impl ButtonConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A pressable button.
///
/// # Examples
///
/// ```
/// # use frost_ui::widgets::{Button, ButtonConfig};
/// let save = Button::new("Save");
/// let locked = Button::from_config(ButtonConfig::default().with_disabled(true));
/// ```
#[derive(Debug)]
pub struct Button {
    host: Host,
    text: String,
    disabled: bool,
    pressed: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_config(ButtonConfig::default().with_text(text))
    }

    pub fn from_config(config: ButtonConfig) -> Self {
        let mut button = Self {
            host: Host::new(),
            text: ButtonConfig::default().text,
            disabled: false,
            pressed: false,
        };
        button.set_text(config.text);
        button.set_disabled(config.disabled);
        apply_theme(&mut button, config.theme);
        button
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        set_property(self, "text", FieldValue::text(text))
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        set_property(self, "disabled", FieldValue::Bool(disabled))
    }

    /// Whether the pointer is currently pressing the button.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.host.schedule(Invalidation::Patch);
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::from_config(ButtonConfig::default())
    }
}

impl Reflect for Button {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "text",
            Coercion::Text { default: "Button" },
            |w: &Button| FieldValue::text(w.text.as_str()),
            |w: &mut Button, v: FieldValue| assign_text(&mut w.text, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "disabled",
            Coercion::Presence,
            |w: &Button| FieldValue::Bool(w.disabled),
            |w: &mut Button, v: FieldValue| assign_bool(&mut w.disabled, v),
            Invalidation::Rebuild,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Button {
    fn widget_type(&self) -> &'static str {
        "Button"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        themed(View::new("button"), &self.host)
            .part("button")
            .class("button")
            .class_if("active", self.pressed)
            .flag("disabled", self.disabled)
            .attr("aria-disabled", self.disabled.to_string())
            .focusable(!self.disabled)
            .text(self.text.as_str())
    }

    fn patches(&self) -> Vec<Patch> {
        vec![
            Patch::class("button", "active", self.pressed),
            Patch::text("button", self.text.as_str()),
        ]
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[("button", Listen::Pointer), ("button", Listen::Click)]
    }

    fn observed_attributes(&self) -> Vec<&'static str> {
        observed::<Self>()
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> bool {
        attribute_changed(self, name, value)
    }

    fn handle_event(&mut self, _part: &str, event: &UiEvent, _cx: &mut Context<'_>) {
        match event {
            UiEvent::PointerDown(_) if !self.disabled => self.set_pressed(true),
            UiEvent::PointerUp(_) | UiEvent::PointerLeave | UiEvent::PointerCancel => {
                self.set_pressed(false)
            }
            UiEvent::Click(_) if !self.disabled => {
                self.host.emit(Notification::bare(NotificationKind::Click));
            }
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
