//! Select widget: a single choice from a list of `{value, text}` options
//! shown in a dropdown.
//!
//! Choosing an option emits `change` and `select-change` with
//! `{index, value, text}`, but only when the selection actually changes.
//! Programmatic selection through `value` / `selected_index` is silent.

use std::any::Any;

use serde::Deserialize;
use tokio::time::Instant;

use crate::event::{Detail, Key, Notification, NotificationKind, Selection, UiEvent};
use crate::overlay::OverlayPhase;
use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding,
    AttributeBinding, Coercion, FieldValue, Reflect, SelectOption,
};
use crate::render::{Invalidation, Listen, ListenerSpec, View};
use crate::theme::ThemeKey;
use crate::widget::{Context, Host, Widget};

use super::dropdown::Dropdown;
use super::{apply_theme, assign, assign_bool, assign_text, themed};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    pub options: Vec<SelectOption>,
    /// Initially selected option value.
    pub value: Option<String>,
    pub label: String,
    pub placeholder: String,
    pub disabled: bool,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            value: None,
            label: String::new(),
            placeholder: "Select".into(),
            disabled: false,
            theme: ThemeKey::default(),
        }
    }
}

impl SelectConfig {
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
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
// Select
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Select {
    host: Host,
    options: Vec<SelectOption>,
    selected: Option<usize>,
    label: String,
    placeholder: String,
    disabled: bool,
    dropdown: Dropdown,
}

impl Select {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self::from_config(SelectConfig::default().with_options(options))
    }

    pub fn from_config(config: SelectConfig) -> Self {
        let mut select = Self {
            host: Host::new(),
            options: Vec::new(),
            selected: None,
            label: String::new(),
            placeholder: SelectConfig::default().placeholder,
            disabled: false,
            dropdown: Dropdown::default(),
        };
        set_property(&mut select, "options", FieldValue::Options(config.options));
        if let Some(value) = config.value {
            select.set_value(&value);
        }
        set_property(&mut select, "label", FieldValue::text(config.label));
        set_property(&mut select, "placeholder", FieldValue::text(config.placeholder));
        set_property(&mut select, "disabled", FieldValue::Bool(config.disabled));
        apply_theme(&mut select, config.theme);
        select
    }

    // ── Options and selection ────────────────────────────────────────

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replace the option list. Clears the selection.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.host.reflect("value", None);
        let cleared = self.selected.take().is_some();
        if !set_property(self, "options", FieldValue::Options(options)) && cleared {
            self.host.schedule(Invalidation::Rebuild);
        }
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Value of the selected option.
    pub fn value(&self) -> Option<&str> {
        self.selected_option().map(|o| o.value.as_str())
    }

    /// Select the option whose value is `value`; an unknown value clears
    /// the selection. Emits nothing.
    pub fn set_value(&mut self, value: &str) -> bool {
        set_property(self, "value", FieldValue::text(value))
    }

    /// Index of the selected option, `-1` when nothing is selected.
    pub fn selected_index(&self) -> i64 {
        self.selected.map_or(-1, |i| i as i64)
    }

    /// Select by index. `-1` clears; anything outside `-1..len` is ignored.
    /// Emits nothing.
    pub fn set_selected_index(&mut self, index: i64) -> bool {
        let next = match index {
            -1 => None,
            i if i >= 0 && (i as usize) < self.options.len() => Some(i as usize),
            _ => {
                log::debug!("selectedIndex {index} out of bounds");
                return false;
            }
        };
        if !assign(&mut self.selected, next) {
            return false;
        }
        self.reflect_value();
        self.host.schedule(Invalidation::Rebuild);
        true
    }

    /// Choose option `index` as a user would. Emits `change` and
    /// `select-change` when the selection changed. Returns `false` for an
    /// unknown index or the already selected option.
    pub fn select_option(&mut self, index: usize) -> bool {
        let Some(option) = self.options.get(index) else {
            log::debug!("select_option({index}) out of bounds");
            return false;
        };
        if self.selected == Some(index) {
            return false;
        }
        let selection = Selection::new(index, option.value.as_str(), option.text.as_str());
        self.selected = Some(index);
        self.reflect_value();
        self.host.schedule(Invalidation::Rebuild);
        self.host.emit(Notification::new(
            NotificationKind::Change,
            Detail::Selection(selection.clone()),
        ));
        self.host.emit(Notification::new(
            NotificationKind::SelectChange,
            Detail::Selection(selection),
        ));
        true
    }

    /// Mirror the selection into the `value` attribute, absent when none.
    fn reflect_value(&mut self) {
        let value = self.value().map(str::to_owned);
        self.host.reflect("value", value);
    }

    // ── Dropdown ─────────────────────────────────────────────────────

    pub fn phase(&self) -> OverlayPhase {
        self.dropdown.phase()
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub fn open(&mut self) -> bool {
        self.overlay_changed(|d| d.open())
    }

    pub fn close(&mut self, now: Instant) -> bool {
        self.overlay_changed(|d| d.close(now))
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        self.overlay_changed(|d| d.toggle(now))
    }

    fn overlay_changed(&mut self, f: impl FnOnce(&mut Dropdown) -> bool) -> bool {
        let changed = f(&mut self.dropdown);
        if changed {
            self.host.schedule(Invalidation::Rebuild);
        }
        changed
    }

    // ── Field setters ────────────────────────────────────────────────

    fn set_options_field(&mut self, v: FieldValue) -> bool {
        let FieldValue::Options(options) = v else {
            return false;
        };
        if !assign(&mut self.options, options) {
            return false;
        }
        // Options may arrive after the value attribute.
        let wanted = self.host.attribute("value").map(str::to_owned);
        self.selected = wanted.and_then(|v| self.options.iter().position(|o| o.value == v));
        true
    }

    fn set_value_field(&mut self, v: FieldValue) -> bool {
        let Some(value) = v.as_text() else {
            return false;
        };
        let index = self.options.iter().position(|o| o.value == value);
        if index.is_none() && !value.is_empty() {
            log::debug!("select value `{value}` matches no option");
        }
        assign(&mut self.selected, index)
    }

    fn option_index(part: &str) -> Option<usize> {
        part.strip_prefix("option-")?.parse().ok()
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::from_config(SelectConfig::default())
    }
}

impl Reflect for Select {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "options",
            Coercion::OptionList,
            |w: &Select| FieldValue::Options(w.options.clone()),
            Select::set_options_field,
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "value",
            Coercion::Text { default: "" },
            |w: &Select| FieldValue::text(w.value().unwrap_or_default()),
            Select::set_value_field,
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "label",
            Coercion::Text { default: "" },
            |w: &Select| FieldValue::text(w.label.as_str()),
            |w: &mut Select, v: FieldValue| assign_text(&mut w.label, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "placeholder",
            Coercion::Text { default: "Select" },
            |w: &Select| FieldValue::text(w.placeholder.as_str()),
            |w: &mut Select, v: FieldValue| assign_text(&mut w.placeholder, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "disabled",
            Coercion::Presence,
            |w: &Select| FieldValue::Bool(w.disabled),
            |w: &mut Select, v: FieldValue| assign_bool(&mut w.disabled, v),
            Invalidation::Rebuild,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Select {
    fn widget_type(&self) -> &'static str {
        "Select"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        let display = match self.selected_option() {
            Some(option) => View::new("span")
                .part("display")
                .class("select-value")
                .text(option.text.as_str()),
            None => View::new("span")
                .part("display")
                .class("select-value")
                .class("placeholder")
                .text(self.placeholder.as_str()),
        };
        let mut field = View::new("div")
            .part("field")
            .class("select-field")
            .attr("role", "combobox")
            .attr("aria-expanded", self.is_open().to_string())
            .attr("aria-disabled", self.disabled.to_string())
            .focusable(!self.disabled)
            .child(display)
            .child(View::new("span").part("arrow").class("select-arrow"));
        if !self.disabled {
            field = field.attr("tabindex", "0");
        }

        let dropdown = self.dropdown.container("select-dropdown").map(|container| {
            let container = container.attr("role", "listbox");
            if self.options.is_empty() {
                return container.child(
                    View::new("div").part("empty").class("select-empty").text("No options"),
                );
            }
            container.children(self.options.iter().enumerate().map(|(i, option)| {
                let selected = self.selected == Some(i);
                View::new("div")
                    .part(format!("option-{i}"))
                    .class("select-option")
                    .class_if("selected", selected)
                    .attr("role", "option")
                    .attr("aria-selected", selected.to_string())
                    .attr("data-value", option.value.as_str())
                    .text(option.text.as_str())
            }))
        });

        themed(View::new("div"), &self.host)
            .part("select")
            .class("select")
            .class_if("open", self.phase() == OverlayPhase::Open)
            .class_if("disabled", self.disabled)
            .child_opt(
                (!self.label.is_empty())
                    .then(|| View::new("label").part("label").class("select-label").text(self.label.as_str())),
            )
            .child(field)
            .child_opt(dropdown)
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[
            ("field", Listen::Click),
            ("field", Listen::Key),
            (".select-option", Listen::Click),
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
            UiEvent::Click(_) if part == "field" => {
                cx.stop_propagation();
                if !self.disabled {
                    self.toggle(cx.now());
                }
            }
            UiEvent::Click(_) => {
                cx.stop_propagation();
                if let Some(index) = Self::option_index(part) {
                    self.select_option(index);
                    self.close(cx.now());
                }
            }
            UiEvent::Key(key) if !self.disabled => match key.code {
                Key::Enter | Key::Char(' ') => {
                    self.toggle(cx.now());
                }
                Key::Escape => {
                    self.close(cx.now());
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn connected(&mut self, cx: &mut Context<'_>) {
        self.dropdown.connect(cx);
    }

    fn disconnected(&mut self, cx: &mut Context<'_>) {
        self.dropdown.disconnect(cx);
    }

    fn on_outside_click(&mut self, cx: &mut Context<'_>) {
        let now = cx.now();
        self.overlay_changed(|d| d.outside_click(now));
    }

    fn on_frame(&mut self, _cx: &mut Context<'_>) {
        self.overlay_changed(Dropdown::frame);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.dropdown.next_deadline()
    }

    fn poll_timers(&mut self, cx: &mut Context<'_>) {
        let now = cx.now();
        self.overlay_changed(|d| d.poll(now));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::overlay::{OverlayRegistry, DROPDOWN_EXIT};
    use crate::reflect::set_attribute;
    use crate::widget::{flush, WidgetId};
    use pretty_assertions::assert_eq;
    use slotmap::SlotMap;

    fn ab() -> Vec<SelectOption> {
        vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")]
    }

    fn click(select: &mut Select, part: &str, now: Instant) -> bool {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let mut registry = OverlayRegistry::new();
        let mut cx = Context::new(ids.insert(()), now, &mut registry);
        select.handle_event(part, &UiEvent::Click(Point::ORIGIN), &mut cx);
        cx.is_propagation_stopped()
    }

    fn kinds(select: &mut Select) -> Vec<NotificationKind> {
        select.host_mut().take_notifications().into_iter().map(|n| n.kind).collect()
    }

    #[test]
    fn no_value_means_no_selection() {
        let select = Select::new(ab());
        assert_eq!(select.selected_index(), -1);
        assert_eq!(select.value(), None);
    }

    #[test]
    fn select_option_emits_once() {
        let mut select = Select::new(ab());
        assert!(select.select_option(1));
        assert_eq!(select.value(), Some("b"));
        assert_eq!(select.host().attribute("value"), Some("b"));
        let out = select.host_mut().take_notifications();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, NotificationKind::Change);
        assert_eq!(out[1].kind, NotificationKind::SelectChange);
        assert_eq!(
            out[0].detail_json(),
            serde_json::json!({"index": 1, "value": "b", "text": "B"})
        );
        // Same option again changes nothing.
        assert!(!select.select_option(1));
        assert!(select.host_mut().take_notifications().is_empty());
    }

    #[test]
    fn programmatic_selection_is_silent() {
        let mut select = Select::new(ab());
        assert!(select.set_value("b"));
        assert_eq!(select.selected_index(), 1);
        assert!(select.set_selected_index(0));
        assert_eq!(select.value(), Some("a"));
        assert!(!select.set_selected_index(2));
        assert!(!select.set_selected_index(-2));
        assert!(select.set_selected_index(-1));
        assert_eq!(select.host().attribute("value"), None);
        assert!(kinds(&mut select).is_empty());
    }

    #[test]
    fn value_attribute_before_options() {
        let mut select = Select::default();
        set_attribute(&mut select, "value", Some("b"));
        assert_eq!(select.selected_index(), -1);
        set_attribute(
            &mut select,
            "options",
            Some(r#"[{"value":"a","text":"A"},{"value":"b","text":"B"}]"#),
        );
        assert_eq!(select.selected_index(), 1);
    }

    #[test]
    fn malformed_options_fall_back_to_empty() {
        let mut select = Select::new(ab());
        set_attribute(&mut select, "options", Some("[{broken"));
        assert!(select.options().is_empty());
    }

    #[test]
    fn set_options_resets_selection() {
        let mut select = Select::from_config(SelectConfig::default().with_options(ab()).with_value("a"));
        assert_eq!(select.selected_index(), 0);
        select.set_options(vec![SelectOption::new("c", "C")]);
        assert_eq!(select.selected_index(), -1);
        assert_eq!(select.host().attribute("value"), None);
    }

    #[test]
    fn field_click_toggles_and_stops_propagation() {
        let now = Instant::now();
        let mut select = Select::new(ab());
        assert!(click(&mut select, "field", now));
        assert_eq!(select.phase(), OverlayPhase::Opening);
        select.dropdown.frame();
        assert_eq!(select.phase(), OverlayPhase::Open);
        click(&mut select, "field", now);
        assert_eq!(select.phase(), OverlayPhase::Closing);
    }

    #[test]
    fn option_click_selects_and_closes() {
        let now = Instant::now();
        let mut select = Select::new(ab());
        select.open();
        select.dropdown.frame();
        flush(&mut select, None);
        assert!(select.host().surface().query_part("option-1").is_some());

        click(&mut select, "option-1", now);
        assert_eq!(select.value(), Some("b"));
        assert_eq!(select.phase(), OverlayPhase::Closing);
        assert_eq!(
            kinds(&mut select),
            vec![NotificationKind::Change, NotificationKind::SelectChange]
        );

        // Markup stays for the exit animation.
        flush(&mut select, None);
        let dom = select.host().surface().dom();
        let dropdown = dom.get(dom.query_part("dropdown").unwrap()).unwrap();
        assert!(dropdown.has_class("closing"));

        select.dropdown.poll(now + DROPDOWN_EXIT);
        select.host_mut().schedule(Invalidation::Rebuild);
        flush(&mut select, None);
        assert_eq!(select.host().surface().query_part("dropdown"), None);
    }

    #[test]
    fn disabled_field_does_not_open() {
        let now = Instant::now();
        let mut select = Select::from_config(SelectConfig::default().with_options(ab()).with_disabled(true));
        click(&mut select, "field", now);
        assert_eq!(select.phase(), OverlayPhase::Idle);
    }

    #[test]
    fn renders_placeholder_and_empty_list() {
        let mut select = Select::default();
        select.open();
        select.dropdown.frame();
        flush(&mut select, None);
        insta::assert_snapshot!(select.host().surface().to_markup(), @r#"
        <div part="select" class="theme-light variant-blur select open">
          <div part="field" class="select-field" aria-disabled="false" aria-expanded="true" role="combobox" tabindex="0">
            <span part="display" class="select-value placeholder">Select</span>
            <span part="arrow" class="select-arrow"></span>
          </div>
          <div part="dropdown" class="select-dropdown open" role="listbox">
            <div part="empty" class="select-empty">No options</div>
          </div>
        </div>
        "#);
    }
}
