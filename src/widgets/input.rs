//! Input widget: a text field with a floating label and an error message.
//!
//! The caret is transient DOM state owned by the [`Surface`], counted in
//! characters, so it survives rebuilds (a theme switch while typing keeps
//! focus and the caret where they were). Edits patch the field's `value` in
//! place and never rebuild.
//!
//! [`Surface`]: crate::render::Surface

use std::any::Any;

use serde::Deserialize;

use crate::event::{Key, KeyEvent, Modifiers, Notification, NotificationKind, UiEvent};
use crate::reflect::{
    attribute_changed, observed, reflect_property, set_property, theme_binding, variant_binding,
    AttributeBinding, Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, Patch, View};
use crate::theme::ThemeKey;
use crate::widget::{Context, Host, Widget};

use super::{apply_theme, assign_bool, assign_text, themed};

/// Accepted `type` keywords.
pub const INPUT_TYPES: &[&str] = &["text", "password", "email", "number", "search", "tel", "url"];

// ---------------------------------------------------------------------------
// InputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub placeholder: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub disabled: bool,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            kind: "text".into(),
            placeholder: " ".into(),
            label: String::new(),
            value: String::new(),
            required: false,
            disabled: false,
            theme: ThemeKey::default(),
        }
    }
}

impl InputConfig {
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
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
// Input
// ---------------------------------------------------------------------------

/// A text field.
///
/// # Examples
///
/// ```
/// # use frost_ui::widgets::{Input, InputConfig};
/// let email = Input::from_config(
///     InputConfig::default().with_kind("email").with_label("Email").with_required(true),
/// );
/// ```
#[derive(Debug)]
pub struct Input {
    host: Host,
    kind: String,
    placeholder: String,
    label: String,
    value: String,
    required: bool,
    disabled: bool,
    error: Option<String>,
    focused: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::from_config(InputConfig::default())
    }

    pub fn from_config(config: InputConfig) -> Self {
        let defaults = InputConfig::default();
        let mut input = Self {
            host: Host::new(),
            kind: defaults.kind,
            placeholder: defaults.placeholder,
            label: String::new(),
            value: String::new(),
            required: false,
            disabled: false,
            error: None,
            focused: false,
        };
        set_property(&mut input, "type", FieldValue::text(config.kind));
        set_property(&mut input, "placeholder", FieldValue::text(config.placeholder));
        set_property(&mut input, "label", FieldValue::text(config.label));
        set_property(&mut input, "value", FieldValue::text(config.value));
        set_property(&mut input, "required", FieldValue::Bool(config.required));
        set_property(&mut input, "disabled", FieldValue::Bool(config.disabled));
        apply_theme(&mut input, config.theme);
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        set_property(self, "value", FieldValue::text(value))
    }

    /// Empty the field.
    pub fn clear(&mut self) -> bool {
        self.set_value("")
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show `message` under the field.
    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.host.schedule(Invalidation::Patch);
    }

    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.host.schedule(Invalidation::Patch);
        }
    }

    /// Caret offset in characters.
    pub fn caret(&self) -> usize {
        self.host.surface().caret()
    }

    fn label_active(&self) -> bool {
        self.focused || !self.value.is_empty()
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Byte offset of character `chars` in the value, clamped to its end.
    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Apply a user edit: store the value, patch the field in place, move
    /// the caret and emit `input`.
    fn edit(&mut self, value: String, caret: usize) {
        self.value = value;
        reflect_property(self, "value");
        let surface = self.host.surface_mut();
        surface.apply(&[Patch::attr("input", "value", Some(self.value.clone()))]);
        surface.set_caret(caret);
        self.host.schedule(Invalidation::Patch);
        self.host
            .emit(Notification::text(NotificationKind::Input, self.value.as_str()));
    }

    fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let caret = self.caret().min(self.char_len());
        let at = self.byte_offset(caret);
        let mut value = self.value.clone();
        value.insert_str(at, text);
        self.edit(value, caret + text.chars().count());
    }

    fn delete_backward(&mut self) {
        let caret = self.caret().min(self.char_len());
        if caret == 0 {
            return;
        }
        let (start, end) = (self.byte_offset(caret - 1), self.byte_offset(caret));
        let mut value = self.value.clone();
        value.replace_range(start..end, "");
        self.edit(value, caret - 1);
    }

    fn delete_forward(&mut self) {
        let caret = self.caret().min(self.char_len());
        if caret >= self.char_len() {
            return;
        }
        let (start, end) = (self.byte_offset(caret), self.byte_offset(caret + 1));
        let mut value = self.value.clone();
        value.replace_range(start..end, "");
        self.edit(value, caret);
    }

    fn move_caret(&mut self, caret: usize) {
        self.host.surface_mut().set_caret(caret);
    }

    fn commit(&mut self) {
        self.host
            .emit(Notification::text(NotificationKind::Change, self.value.as_str()));
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let caret = self.caret();
        match key.code {
            Key::Char(c) if (key.modifiers & (Modifiers::CTRL | Modifiers::ALT)).is_empty() => {
                self.insert(c.encode_utf8(&mut [0; 4]));
            }
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::Left => self.move_caret(caret.saturating_sub(1)),
            Key::Right => self.move_caret(caret + 1),
            Key::Home => self.move_caret(0),
            Key::End => self.move_caret(self.char_len()),
            Key::Enter => self.commit(),
            _ => {}
        }
    }

    fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.host.schedule(Invalidation::Patch);
        let kind = if focused {
            NotificationKind::Focus
        } else {
            NotificationKind::Blur
        };
        self.host.emit(Notification::bare(kind));
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflect for Input {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "type",
            Coercion::Keyword { allowed: INPUT_TYPES, default: "text" },
            |w: &Input| FieldValue::text(w.kind.as_str()),
            |w: &mut Input, v: FieldValue| assign_text(&mut w.kind, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "placeholder",
            Coercion::Text { default: " " },
            |w: &Input| FieldValue::text(w.placeholder.as_str()),
            |w: &mut Input, v: FieldValue| assign_text(&mut w.placeholder, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "label",
            Coercion::Text { default: "" },
            |w: &Input| FieldValue::text(w.label.as_str()),
            |w: &mut Input, v: FieldValue| assign_text(&mut w.label, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "value",
            Coercion::Text { default: "" },
            |w: &Input| FieldValue::text(w.value.as_str()),
            |w: &mut Input, v: FieldValue| assign_text(&mut w.value, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "required",
            Coercion::Presence,
            |w: &Input| FieldValue::Bool(w.required),
            |w: &mut Input, v: FieldValue| assign_bool(&mut w.required, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "disabled",
            Coercion::Presence,
            |w: &Input| FieldValue::Bool(w.disabled),
            |w: &mut Input, v: FieldValue| assign_bool(&mut w.disabled, v),
            Invalidation::Rebuild,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Input {
    fn widget_type(&self) -> &'static str {
        "Input"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        let field = View::new("input")
            .part("input")
            .class("input-field")
            .attr("type", self.kind.as_str())
            .attr("placeholder", self.placeholder.as_str())
            .attr("value", self.value.as_str())
            .flag("required", self.required)
            .flag("disabled", self.disabled)
            .focusable(!self.disabled);
        let label = View::new("label")
            .part("label")
            .class("input-label")
            .class_if("active", self.label_active())
            .text(self.label.as_str())
            .child_opt(
                self.required
                    .then(|| View::new("span").class("required-mark").text("*")),
            );
        let error = View::new("div")
            .part("error")
            .class("error-message")
            .class_if("visible", self.error.is_some())
            .text(self.error.as_deref().unwrap_or_default());

        themed(View::new("div"), &self.host)
            .part("container")
            .class("input-container")
            .class_if("focused", self.focused)
            .class_if("invalid", self.error.is_some())
            .class_if("disabled", self.disabled)
            .child(field)
            .child(label)
            .child(error)
    }

    fn patches(&self) -> Vec<Patch> {
        vec![
            Patch::attr("input", "value", Some(self.value.clone())),
            Patch::attr("input", "placeholder", Some(self.placeholder.clone())),
            Patch::class("container", "focused", self.focused),
            Patch::class("container", "invalid", self.error.is_some()),
            Patch::class("label", "active", self.label_active()),
            Patch::text("label", self.label.as_str()),
            Patch::class("error", "visible", self.error.is_some()),
            Patch::text("error", self.error.as_deref().unwrap_or_default()),
        ]
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[
            ("input", Listen::Text),
            ("input", Listen::Key),
            ("input", Listen::Focus),
            ("input", Listen::Click),
            ("label", Listen::Click),
        ]
    }

    fn observed_attributes(&self) -> Vec<&'static str> {
        observed::<Self>()
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> bool {
        attribute_changed(self, name, value)
    }

    fn handle_event(&mut self, _part: &str, event: &UiEvent, cx: &mut Context<'_>) {
        match event {
            UiEvent::Focus => self.set_focused(true),
            UiEvent::Blur => self.set_focused(false),
            _ if self.disabled => {}
            UiEvent::Click(_) => cx.focus("input"),
            UiEvent::TextInput(text) => self.insert(text),
            UiEvent::TextCommit => self.commit(),
            UiEvent::Key(key) => self.handle_key(key),
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
