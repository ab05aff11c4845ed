//! Slider widget: a bounded, stepped numeric value picked by dragging,
//! clicking the track, or the keyboard.
//!
//! The thumb and progress bar are positioned by in-place style patches, so
//! a drag never rebuilds the tree. Each value change during a drag emits
//! `input`; releasing emits one `change` if the value moved. Track clicks and
//! key presses are atomic and emit both at once. A cancelled drag restores
//! the value it started from without a `change`.

use std::any::Any;

use serde::Deserialize;

use crate::event::{Notification, UiEvent};
use crate::geometry::Axis;
use crate::gesture::{key_step, point_from_click, DragEnd, GestureEngine};
use crate::reflect::{
    attribute_changed, observed, reflect_property, set_property, theme_binding, variant_binding,
    AttributeBinding, Coercion, Fallback, FieldValue, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, Patch, View};
use crate::theme::ThemeKey;
use crate::value::{format_number, round_to_precision, NumericRange};
use crate::widget::{Context, Host, Widget};

use super::{apply_theme, assign, assign_bool, assign_text, themed};

// ---------------------------------------------------------------------------
// SliderConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    pub label: String,
    pub disabled: bool,
    pub orientation: Axis,
    pub show_value: bool,
    /// Display template; `{value}` is replaced by the current value.
    pub value_text: String,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            value: 0.0,
            label: "Slider".into(),
            disabled: false,
            orientation: Axis::Horizontal,
            show_value: true,
            value_text: String::new(),
            theme: ThemeKey::default(),
        }
    }
}

impl SliderConfig {
    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_orientation(mut self, orientation: Axis) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_show_value(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    pub fn with_value_text(mut self, template: impl Into<String>) -> Self {
        self.value_text = template.into();
        self
    }

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

/// A range slider.
///
/// # Examples
///
/// ```
/// # use frost_ui::widgets::{Slider, SliderConfig};
/// let volume = Slider::from_config(
///     SliderConfig::default().with_range(0.0, 100.0, 5.0).with_value(40.0),
/// );
/// assert_eq!(volume.value(), 40.0);
/// ```
#[derive(Debug)]
pub struct Slider {
    host: Host,
    range: NumericRange,
    value: f64,
    label: String,
    disabled: bool,
    orientation: Axis,
    show_value: bool,
    value_text: String,
    engine: GestureEngine,
}

impl Slider {
    pub fn new() -> Self {
        Self::from_config(SliderConfig::default())
    }

    pub fn from_config(config: SliderConfig) -> Self {
        let defaults = SliderConfig::default();
        let mut slider = Self {
            host: Host::new(),
            range: NumericRange::default(),
            value: defaults.value,
            label: defaults.label,
            disabled: false,
            orientation: Axis::Horizontal,
            show_value: true,
            value_text: String::new(),
            engine: GestureEngine::new(),
        };
        slider.set_step(config.step);
        slider.set_min(config.min);
        slider.set_max(config.max);
        slider.set_value(config.value);
        set_property(&mut slider, "label", FieldValue::text(config.label));
        slider.set_disabled(config.disabled);
        slider.set_orientation(config.orientation);
        set_property(&mut slider, "show-value", FieldValue::Bool(config.show_value));
        set_property(&mut slider, "value-text", FieldValue::text(config.value_text));
        apply_theme(&mut slider, config.theme);
        slider
    }

    // ── Properties ───────────────────────────────────────────────────

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Clamped and snapped. Emits nothing.
    pub fn set_value(&mut self, value: f64) -> bool {
        set_property(self, "value", FieldValue::Number(value))
    }

    pub fn range(&self) -> NumericRange {
        self.range
    }

    pub fn set_min(&mut self, min: f64) -> bool {
        set_property(self, "min", FieldValue::Number(min))
    }

    pub fn set_max(&mut self, max: f64) -> bool {
        set_property(self, "max", FieldValue::Number(max))
    }

    pub fn set_step(&mut self, step: f64) -> bool {
        set_property(self, "step", FieldValue::Number(step))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        set_property(self, "disabled", FieldValue::Bool(disabled))
    }

    pub fn orientation(&self) -> Axis {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Axis) -> bool {
        set_property(self, "orientation", FieldValue::text(orientation.keyword()))
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_active()
    }

    /// The value as displayed: the `value-text` template with `{value}`
    /// substituted, or the bare number.
    pub fn display_value(&self) -> String {
        let number = format_number(self.value);
        if self.value_text.is_empty() {
            number
        } else {
            self.value_text.replace("{value}", &number)
        }
    }

    // ── Field setters ────────────────────────────────────────────────

    fn set_range(&mut self, range: NumericRange) -> bool {
        if !assign(&mut self.range, range) {
            return false;
        }
        let snapped = self.range.snap(self.value);
        if assign(&mut self.value, snapped) {
            reflect_property(self, "value");
        }
        true
    }

    fn set_min_field(&mut self, v: FieldValue) -> bool {
        v.as_number()
            .is_some_and(|min| self.set_range(self.range.with_min(min)))
    }

    fn set_max_field(&mut self, v: FieldValue) -> bool {
        v.as_number()
            .is_some_and(|max| self.set_range(self.range.with_max(max)))
    }

    fn set_step_field(&mut self, v: FieldValue) -> bool {
        v.as_number()
            .is_some_and(|step| self.set_range(self.range.with_step(step)))
    }

    fn set_value_field(&mut self, v: FieldValue) -> bool {
        v.as_number()
            .is_some_and(|value| assign(&mut self.value, self.range.snap(value)))
    }

    fn set_orientation_field(&mut self, v: FieldValue) -> bool {
        v.as_text()
            .and_then(Axis::from_keyword)
            .is_some_and(|axis| assign(&mut self.orientation, axis))
    }

    // ── User changes ─────────────────────────────────────────────────

    /// Apply a value produced by user input and mirror it.
    fn apply_user_value(&mut self, value: f64) {
        self.value = value;
        reflect_property(self, "value");
        self.host.schedule(Invalidation::Patch);
    }

    /// Atomic change: `input` and `change` together.
    fn jump_to(&mut self, value: f64) {
        if value == self.value {
            return;
        }
        self.apply_user_value(value);
        self.host.emit(Notification::input(value));
        self.host.emit(Notification::change(value));
    }

    // ── Rendering helpers ────────────────────────────────────────────

    fn percent(&self) -> String {
        let pct = round_to_precision(self.range.fraction(self.value) * 100.0, 4);
        format!("{}%", format_number(pct))
    }

    /// Style properties positioning the thumb and sizing the progress bar.
    fn position_properties(&self) -> (&'static str, &'static str) {
        match self.orientation {
            Axis::Horizontal => ("left", "width"),
            Axis::Vertical => ("bottom", "height"),
        }
    }

    fn value_text_attr(&self) -> Option<String> {
        (!self.value_text.is_empty()).then(|| self.display_value())
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Attribute table
// ---------------------------------------------------------------------------

impl Reflect for Slider {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "min",
            Coercion::Number { default: 0.0, fallback: Fallback::Default },
            |w: &Slider| FieldValue::Number(w.range.min()),
            Slider::set_min_field,
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "max",
            Coercion::Number { default: 100.0, fallback: Fallback::Default },
            |w: &Slider| FieldValue::Number(w.range.max()),
            Slider::set_max_field,
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "step",
            Coercion::Number { default: 1.0, fallback: Fallback::Default },
            |w: &Slider| FieldValue::Number(w.range.step()),
            Slider::set_step_field,
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "value",
            Coercion::Number { default: 0.0, fallback: Fallback::Current },
            |w: &Slider| FieldValue::Number(w.value),
            Slider::set_value_field,
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "label",
            Coercion::Text { default: "Slider" },
            |w: &Slider| FieldValue::text(w.label.as_str()),
            |w: &mut Slider, v: FieldValue| assign_text(&mut w.label, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "disabled",
            Coercion::Presence,
            |w: &Slider| FieldValue::Bool(w.disabled),
            |w: &mut Slider, v: FieldValue| assign_bool(&mut w.disabled, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "orientation",
            Coercion::Keyword {
                allowed: &["horizontal", "vertical"],
                default: "horizontal",
            },
            |w: &Slider| FieldValue::text(w.orientation.keyword()),
            Slider::set_orientation_field,
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "show-value",
            Coercion::NotFalse,
            |w: &Slider| FieldValue::Bool(w.show_value),
            |w: &mut Slider, v: FieldValue| assign_bool(&mut w.show_value, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "value-text",
            Coercion::Text { default: "" },
            |w: &Slider| FieldValue::text(w.value_text.as_str()),
            |w: &mut Slider, v: FieldValue| assign_text(&mut w.value_text, v),
            Invalidation::Patch,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

impl Widget for Slider {
    fn widget_type(&self) -> &'static str {
        "Slider"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        let (position, size) = self.position_properties();
        let percent = self.percent();

        let header = View::new("div")
            .part("header")
            .class("slider-header")
            .child(View::new("label").part("label").text(self.label.as_str()))
            .child_opt(
                self.show_value
                    .then(|| View::new("span").part("value").text(self.display_value())),
            );

        let mut thumb = View::new("div")
            .part("thumb")
            .class("slider-thumb")
            .attr("role", "slider")
            .attr("aria-valuemin", format_number(self.range.min()))
            .attr("aria-valuemax", format_number(self.range.max()))
            .attr("aria-valuenow", format_number(self.value))
            .attr("aria-orientation", self.orientation.keyword())
            .attr("aria-disabled", self.disabled.to_string())
            .style(position, percent.clone())
            .focusable(!self.disabled);
        if let Some(text) = self.value_text_attr() {
            thumb = thumb.attr("aria-valuetext", text);
        }
        if !self.disabled {
            thumb = thumb.attr("tabindex", "0");
        }

        let track = View::new("div")
            .part("track")
            .class("slider-track")
            .child(View::new("div").part("progress").class("slider-progress").style(size, percent))
            .child(thumb);

        themed(View::new("div"), &self.host)
            .part("slider")
            .class("slider")
            .class(self.orientation.keyword())
            .class_if("disabled", self.disabled)
            .class_if("dragging", self.engine.is_active())
            .child(header)
            .child(track)
    }

    fn patches(&self) -> Vec<Patch> {
        let (position, size) = self.position_properties();
        let percent = self.percent();
        vec![
            Patch::style("thumb", position, percent.clone()),
            Patch::style("progress", size, percent),
            Patch::text("value", self.display_value()),
            Patch::text("label", self.label.as_str()),
            Patch::class("slider", "dragging", self.engine.is_active()),
            Patch::attr("thumb", "aria-valuenow", Some(format_number(self.value))),
            Patch::attr("thumb", "aria-valuemin", Some(format_number(self.range.min()))),
            Patch::attr("thumb", "aria-valuemax", Some(format_number(self.range.max()))),
            Patch::attr("thumb", "aria-valuetext", self.value_text_attr()),
        ]
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[
            ("thumb", Listen::Pointer),
            ("thumb", Listen::Click),
            ("thumb", Listen::Key),
            ("track", Listen::Click),
        ]
    }

    fn observed_attributes(&self) -> Vec<&'static str> {
        observed::<Self>()
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> bool {
        attribute_changed(self, name, value)
    }

    fn handle_event(&mut self, part: &str, event: &UiEvent, cx: &mut Context<'_>) {
        match event {
            UiEvent::PointerDown(p) => {
                if self.disabled {
                    return;
                }
                let track = self.host.part_bounds("track");
                if self.engine.begin(self.orientation, p.position, self.value, track) {
                    cx.capture_pointer();
                    cx.focus("thumb");
                    self.host.schedule(Invalidation::Patch);
                }
            }
            UiEvent::PointerMove(p) => {
                if let Some(value) = self.engine.update(&self.range, p.position) {
                    self.apply_user_value(value);
                    self.host.emit(Notification::input(value));
                }
            }
            UiEvent::PointerUp(_) => {
                if !self.engine.is_active() {
                    return;
                }
                cx.release_pointer();
                if let DragEnd::Commit(value) = self.engine.end() {
                    self.host.emit(Notification::change(value));
                }
                self.host.schedule(Invalidation::Patch);
            }
            UiEvent::PointerCancel => {
                if !self.engine.is_active() {
                    return;
                }
                cx.release_pointer();
                if let DragEnd::Restore(value) = self.engine.cancel() {
                    self.apply_user_value(value);
                    self.host.emit(Notification::input(value));
                }
                self.host.schedule(Invalidation::Patch);
            }
            UiEvent::Click(_) if part == "thumb" => {
                cx.stop_propagation();
                if !self.disabled {
                    cx.focus("thumb");
                }
            }
            UiEvent::Click(point) => {
                if self.disabled {
                    return;
                }
                let track = self.host.part_bounds("track");
                let value = point_from_click(&self.range, track, *point, self.orientation);
                cx.focus("thumb");
                self.jump_to(value);
            }
            UiEvent::Key(key) => {
                if self.disabled {
                    return;
                }
                if let Some(value) = key_step(&self.range, self.value, key.code) {
                    self.jump_to(value);
                }
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
