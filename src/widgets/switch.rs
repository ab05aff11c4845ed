//! Switch widget: an on/off toggle that can be clicked or dragged.
//!
//! Clicking the track or the thumb toggles. Dragging the thumb moves it
//! between its two end positions; on release the switch settles on the end
//! nearer to the thumb center, and `change` fires only if that differs from
//! the state the drag started in. A click landing exactly where a drag was
//! released is the platform's trailing click for that drag and is
//! swallowed; any other click toggles.

use std::any::Any;

use serde::Deserialize;

use crate::event::{Notification, UiEvent};
use crate::geometry::Point;
use crate::gesture::toggle::{rest_position, ToggleDrag};
use crate::reflect::{
    attribute_changed, observed, reflect_property, set_property, theme_binding, variant_binding,
    AttributeBinding, Coercion, FieldValue, Reflect,
};
use crate::render::{Invalidation, Listen, ListenerSpec, Patch, View};
use crate::theme::ThemeKey;
use crate::value::format_number;
use crate::widget::{Context, Host, Widget};

use super::{apply_theme, assign_bool, assign_text, themed};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    pub checked: bool,
    pub disabled: bool,
    pub label: String,
    #[serde(flatten)]
    pub theme: ThemeKey,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            checked: false,
            disabled: false,
            label: "Switch".into(),
            theme: ThemeKey::default(),
        }
    }
}

impl SwitchConfig {
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
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
// Switch
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Switch {
    host: Host,
    checked: bool,
    disabled: bool,
    label: String,
    drag: Option<ToggleDrag>,
    /// Release point of the last drag that moved the thumb.
    drag_release: Option<Point>,
}

impl Switch {
    pub fn new() -> Self {
        Self::from_config(SwitchConfig::default())
    }

    pub fn from_config(config: SwitchConfig) -> Self {
        let mut switch = Self {
            host: Host::new(),
            checked: false,
            disabled: false,
            label: SwitchConfig::default().label,
            drag: None,
            drag_release: None,
        };
        switch.set_checked(config.checked);
        switch.set_disabled(config.disabled);
        switch.set_label(config.label);
        apply_theme(&mut switch, config.theme);
        switch
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Programmatic set. Emits nothing.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        set_property(self, "checked", FieldValue::Bool(checked))
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        set_property(self, "disabled", FieldValue::Bool(disabled))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> bool {
        set_property(self, "label", FieldValue::text(label))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Flip the state as a user click would, emitting `change`.
    pub fn toggle(&mut self) {
        self.commit(!self.checked);
    }

    /// Current thumb offset in pixels.
    pub fn thumb_left(&self) -> f64 {
        match &self.drag {
            Some(drag) => drag.left(),
            None => rest_position(self.checked),
        }
    }

    fn commit(&mut self, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.checked = checked;
        reflect_property(self, "checked");
        self.host.emit(Notification::checked(checked));
        self.host.schedule(Invalidation::Patch);
    }

    fn thumb_style(&self) -> String {
        format!("{}px", format_number(self.thumb_left()))
    }
}

impl Default for Switch {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflect for Switch {
    const ATTRIBUTES: &'static [AttributeBinding<Self>] = &[
        AttributeBinding::new(
            "checked",
            Coercion::Presence,
            |w: &Switch| FieldValue::Bool(w.checked),
            |w: &mut Switch, v: FieldValue| assign_bool(&mut w.checked, v),
            Invalidation::Patch,
        ),
        AttributeBinding::new(
            "disabled",
            Coercion::Presence,
            |w: &Switch| FieldValue::Bool(w.disabled),
            |w: &mut Switch, v: FieldValue| assign_bool(&mut w.disabled, v),
            Invalidation::Rebuild,
        ),
        AttributeBinding::new(
            "label",
            Coercion::Text { default: "Switch" },
            |w: &Switch| FieldValue::text(w.label.as_str()),
            |w: &mut Switch, v: FieldValue| assign_text(&mut w.label, v),
            Invalidation::Patch,
        ),
        theme_binding(),
        variant_binding(),
    ];
}

impl Widget for Switch {
    fn widget_type(&self) -> &'static str {
        "Switch"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    fn view(&self) -> View {
        let thumb = View::new("div")
            .part("thumb")
            .class("switch-thumb")
            .style("left", self.thumb_style());
        let track = View::new("div")
            .part("track")
            .class("switch-track")
            .attr("role", "switch")
            .attr("aria-checked", self.checked.to_string())
            .attr("aria-disabled", self.disabled.to_string())
            .focusable(!self.disabled)
            .child(thumb);
        themed(View::new("label"), &self.host)
            .part("switch")
            .class("switch")
            .class_if("on", self.checked)
            .class_if("disabled", self.disabled)
            .child(track)
            .child(View::new("span").part("label").class("switch-label").text(self.label.as_str()))
    }

    fn patches(&self) -> Vec<Patch> {
        vec![
            Patch::class("switch", "on", self.checked),
            Patch::attr("track", "aria-checked", Some(self.checked.to_string())),
            Patch::style("thumb", "left", self.thumb_style()),
            Patch::text("label", self.label.as_str()),
        ]
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        &[
            ("track", Listen::Click),
            ("thumb", Listen::Click),
            ("thumb", Listen::Pointer),
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
            UiEvent::PointerDown(p) => {
                if self.disabled {
                    return;
                }
                self.drag_release = None;
                self.drag = Some(ToggleDrag::begin(p.position.x, self.checked));
                cx.capture_pointer();
            }
            UiEvent::PointerMove(p) => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.update(p.position.x);
                    self.host.schedule(Invalidation::Patch);
                }
            }
            UiEvent::PointerUp(p) => {
                let Some(drag) = self.drag.take() else {
                    log::debug!("switch release ignored: no drag");
                    return;
                };
                cx.release_pointer();
                self.drag_release = drag.moved().then_some(p.position);
                self.host.schedule(Invalidation::Patch);
                self.commit(drag.decide());
            }
            UiEvent::PointerCancel => {
                if self.drag.take().is_some() {
                    cx.release_pointer();
                    self.host.schedule(Invalidation::Patch);
                }
            }
            UiEvent::Click(point) => {
                let trailing = self.drag_release.take() == Some(*point);
                if self.disabled || trailing {
                    return;
                }
                self.toggle();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Detail, NotificationKind, PointerEvent};
    use crate::geometry::Point;
    use crate::overlay::OverlayRegistry;
    use crate::reflect::set_attribute;
    use crate::widget::{flush, Capture, WidgetId};
    use slotmap::SlotMap;
    use tokio::time::Instant;

    fn send(switch: &mut Switch, part: &str, event: UiEvent) -> Option<Capture> {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let mut registry = OverlayRegistry::new();
        let mut cx = Context::new(ids.insert(()), Instant::now(), &mut registry);
        switch.handle_event(part, &event, &mut cx);
        cx.capture()
    }

    fn changes(switch: &mut Switch) -> Vec<bool> {
        switch
            .host_mut()
            .take_notifications()
            .into_iter()
            .filter(|n| n.kind == NotificationKind::Change)
            .map(|n| match n.detail {
                Detail::Checked { checked } => checked,
                other => panic!("unexpected detail {other:?}"),
            })
            .collect()
    }

    #[test]
    fn click_toggles_and_reflects() {
        let mut switch = Switch::new();
        send(&mut switch, "track", UiEvent::Click(Point::ORIGIN));
        assert!(switch.is_checked());
        assert_eq!(switch.host().attribute("checked"), Some(""));
        send(&mut switch, "thumb", UiEvent::Click(Point::ORIGIN));
        assert!(!switch.is_checked());
        assert_eq!(switch.host().attribute("checked"), None);
        assert_eq!(changes(&mut switch), vec![true, false]);
    }

    #[test]
    fn drag_past_midpoint_turns_on_once() {
        let mut switch = Switch::new();
        let capture = send(&mut switch, "thumb", UiEvent::PointerDown(PointerEvent::at(15.0, 14.0)));
        assert_eq!(capture, Some(Capture::Acquire));
        send(&mut switch, "thumb", UiEvent::PointerMove(PointerEvent::at(25.0, 14.0)));
        send(&mut switch, "thumb", UiEvent::PointerMove(PointerEvent::at(40.0, 14.0)));
        assert_eq!(switch.thumb_left(), 26.0);
        let capture = send(&mut switch, "thumb", UiEvent::PointerUp(PointerEvent::at(40.0, 14.0)));
        assert_eq!(capture, Some(Capture::Release));
        assert!(switch.is_checked());
        assert_eq!(switch.thumb_left(), 31.0);
        // The trailing platform click does not undo the drag.
        send(&mut switch, "thumb", UiEvent::Click(Point::new(40.0, 14.0)));
        assert!(switch.is_checked());
        assert_eq!(changes(&mut switch), vec![true]);
    }

    #[test]
    fn click_after_drag_without_trailing_click_toggles() {
        let mut switch = Switch::new();
        send(&mut switch, "thumb", UiEvent::PointerDown(PointerEvent::at(15.0, 14.0)));
        send(&mut switch, "thumb", UiEvent::PointerMove(PointerEvent::at(45.0, 14.0)));
        send(&mut switch, "thumb", UiEvent::PointerUp(PointerEvent::at(45.0, 14.0)));
        assert!(switch.is_checked());
        assert_eq!(changes(&mut switch), vec![true]);

        send(&mut switch, "track", UiEvent::Click(Point::new(5.0, 14.0)));
        assert!(!switch.is_checked());
        assert_eq!(changes(&mut switch), vec![false]);
    }

    #[test]
    fn short_drag_snaps_back_silently() {
        let mut switch = Switch::new();
        send(&mut switch, "thumb", UiEvent::PointerDown(PointerEvent::at(15.0, 14.0)));
        send(&mut switch, "thumb", UiEvent::PointerMove(PointerEvent::at(20.0, 14.0)));
        send(&mut switch, "thumb", UiEvent::PointerUp(PointerEvent::at(20.0, 14.0)));
        assert!(!switch.is_checked());
        assert!(changes(&mut switch).is_empty());
    }

    #[test]
    fn cancel_keeps_state() {
        let mut switch = Switch::from_config(SwitchConfig::default().with_checked(true));
        send(&mut switch, "thumb", UiEvent::PointerDown(PointerEvent::at(45.0, 14.0)));
        send(&mut switch, "thumb", UiEvent::PointerMove(PointerEvent::at(0.0, 14.0)));
        assert_eq!(switch.thumb_left(), 1.0);
        send(&mut switch, "thumb", UiEvent::PointerCancel);
        assert!(switch.is_checked());
        assert!(!switch.is_dragging());
        assert_eq!(switch.thumb_left(), 31.0);
        assert!(changes(&mut switch).is_empty());
    }

    #[test]
    fn disabled_ignores_input_but_accepts_property() {
        let mut switch = Switch::new();
        set_attribute(&mut switch, "disabled", Some(""));
        send(&mut switch, "track", UiEvent::Click(Point::ORIGIN));
        assert_eq!(send(&mut switch, "thumb", UiEvent::PointerDown(PointerEvent::at(1.0, 1.0))), None);
        assert!(!switch.is_checked());
        assert!(switch.set_checked(true));
        assert!(switch.is_checked());
        assert!(changes(&mut switch).is_empty());
    }

    #[test]
    fn patches_thumb_position() {
        let mut switch = Switch::new();
        flush(&mut switch, None);
        switch.set_checked(true);
        assert_eq!(flush(&mut switch, None), Invalidation::Patch);
        let dom = switch.host().surface().dom();
        let thumb = dom.get(dom.query_part("thumb").unwrap()).unwrap();
        assert_eq!(thumb.style.get("left").map(String::as_str), Some("31px"));
        let root = dom.get(dom.query_part("switch").unwrap()).unwrap();
        assert!(root.has_class("on"));
    }
}
