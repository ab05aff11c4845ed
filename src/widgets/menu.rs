//! Menu widget: a trigger button that opens a list of actions.
//!
//! Items come from the `items` attribute as JSON, e.g.
//! `[{"text":"Open","value":"open"},{"type":"separator"}]`. Choosing an item
//! emits `menu-select` with `{index, value, text}` and closes the menu.

use std::any::Any;

use serde::Deserialize;
use tokio::time::Instant;

use crate::event::{Detail, Key, Notification, NotificationKind, Selection, UiEvent};
use crate::overlay::OverlayPhase;
use crate::reflect::{
    attribute_changed, observed, set_property, theme_binding, variant_binding, AttributeBinding,
    Coercion, FieldValue, MenuItem, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, View};
use crate::theme::ThemeKey;
use crate::widget::{Context, Host, Widget};

use super::dropdown::Dropdown;
use super::{apply_theme, assign, assign_bool, assign_text, themed};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub items: Vec<MenuItem>,
    pub label: String,
    pub disabled: bool,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            label: "Menu".into(),
            disabled: false,
            theme: ThemeKey::default(),
        }
    }
}

impl MenuConfig {
    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.items = items;
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

    pub fn with_theme(mut self, theme: ThemeKey) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Menu {
    host: Host,
    items: Vec<MenuItem>,
    label: String,
    disabled: bool,
    dropdown: Dropdown,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self::from_config(MenuConfig::default().with_items(items))
    }

    pub fn from_config(config: MenuConfig) -> Self {
        let mut menu = Self {
            host: Host::new(),
            items: Vec::new(),
            label: MenuConfig::default().label,
            disabled: false,
            dropdown: Dropdown::default(),
        };
        menu.set_items(config.items);
        set_property(&mut menu, "label", FieldValue::text(config.label));
        set_property(&mut menu, "disabled", FieldValue::Bool(config.disabled));
        apply_theme(&mut menu, config.theme);
        menu
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<MenuItem>) -> bool {
        set_property(self, "items", FieldValue::Items(items))
    }

    /// Append an item supplied by the embedder after the configured ones.
    pub fn push_item(&mut self, item: MenuItem) -> bool {
        let mut items = self.items.clone();
        items.push(item);
        self.set_items(items)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Choose item `index` as a user would. Separators and unknown indices
    /// are ignored.
    pub fn select_item(&mut self, index: usize) -> bool {
        let Some(item) = self.items.get(index).filter(|item| !item.is_separator()) else {
            log::debug!("menu item {index} is not selectable");
            return false;
        };
        let selection = Selection::new(index, item.value.as_str(), item.text.as_str());
        self.host.emit(Notification::new(
            NotificationKind::MenuSelect,
            Detail::Selection(selection),
        ));
        true
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

    fn item_index(part: &str) -> Option<usize> {
        part.strip_prefix("item-")?.parse().ok()
    }

    fn item_view(index: usize, item: &MenuItem) -> View {
        if item.is_separator() {
            return View::new("div")
                .part(format!("separator-{index}"))
                .class("menu-separator")
                .attr("role", "separator");
        }
        View::new("div")
            .part(format!("item-{index}"))
            .class("menu-item")
            .attr("role", "menuitem")
            .attr("data-value", item.value.as_str())
            .text(item.text.as_str())
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::from_config(MenuConfig::default())
    }
}

impl Reflect for Menu {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "items",
            Coercion::ItemList,
            |w: &Menu| FieldValue::Items(w.items.clone()),
            |w: &mut Menu, v: FieldValue| match v {
                FieldValue::Items(items) => assign(&mut w.items, items),
                _ => false,
            },
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "label",
            Coercion::Text { default: "Menu" },
            |w: &Menu| FieldValue::text(w.label.as_str()),
            |w: &mut Menu, v: FieldValue| assign_text(&mut w.label, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "disabled",
            Coercion::Presence,
            |w: &Menu| FieldValue::Bool(w.disabled),
            |w: &mut Menu, v: FieldValue| assign_bool(&mut w.disabled, v),
            Invalidation::Rebuild,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Menu {
    fn widget_type(&self) -> &'static str {
        "Menu"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        let trigger = View::new("button")
            .part("trigger")
            .class("menu-trigger")
            .flag("disabled", self.disabled)
            .attr("aria-expanded", self.is_open().to_string())
            .attr("aria-haspopup", "menu")
            .focusable(!self.disabled)
            .child(View::new("span").part("label").class("menu-label").text(self.label.as_str()))
            .child(View::new("span").part("arrow").class("menu-arrow"));

        let dropdown = self.dropdown.container("menu-dropdown").map(|container| {
            container
                .attr("role", "menu")
                .children(self.items.iter().enumerate().map(|(i, item)| Self::item_view(i, item)))
        });

        themed(View::new("div"), &self.host)
            .part("menu")
            .class("menu")
            .class_if("open", self.phase() == OverlayPhase::Open)
            .class_if("disabled", self.disabled)
            .child(trigger)
            .child_opt(dropdown)
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[
            ("trigger", Listen::Click),
            ("trigger", Listen::Key),
            (".menu-item", Listen::Click),
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
            UiEvent::Click(_) if part == "trigger" => {
                cx.stop_propagation();
                if !self.disabled {
                    self.toggle(cx.now());
                }
            }
            UiEvent::Click(_) => {
                cx.stop_propagation();
                if let Some(index) = Self::item_index(part) {
                    if self.select_item(index) {
                        self.close(cx.now());
                    }
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
