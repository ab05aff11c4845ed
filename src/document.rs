//! Document: owns mounted widgets and drives them.
//!
//! The [`Document`] plays the platform's part for every widget: it stores
//! the widget tree (parent links only, each widget's internals stay in its
//! own [`Surface`](crate::render::Surface)), routes input to the listening
//! part, holds pointer capture for drags, dispatches document-level outside
//! clicks, tracks focus, fires timers against its own clock, and turns each
//! widget's outbox into [`Envelope`]s bubbling to the root.
//!
//! # Examples
//!
//! ```
//! # use frost_ui::{Document, Point};
//! # use frost_ui::widgets::{Card, Switch};
//! let mut doc = Document::new();
//! let card = doc.mount(Card::new("Settings"));
//! let switch = doc.mount_child(card, Switch::new()).unwrap();
//! doc.render();
//! doc.click(switch, "track", Point::ORIGIN);
//! // The card sees the switch's `change` on the way up.
//! assert!(doc.drain_notifications()[0].reaches(card));
//! ```

use std::time::Duration;

use slotmap::{SecondaryMap, SlotMap};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

use crate::event::{
    Envelope, EventDispatcher, KeyEvent, NotificationKind, PointerEvent, UiEvent,
};
use crate::geometry::{Point, Rect};
use crate::overlay::{OverlayRegistry, Timed};
use crate::reflect;
use crate::render::Invalidation;
use crate::theme::StyleProvider;
use crate::widget::{flush, Capture, Context, LifecycleEvent, LifecycleTracker, Widget, WidgetId};
use crate::widgets::{Notification, NotificationConfig};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a widget asked for during one callback.
#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    stopped: bool,
    capture: Option<Capture>,
    focus: Option<&'static str>,
    remove: bool,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

pub struct Document {
    widgets: SlotMap<WidgetId, Box<dyn Widget>>,
    parents: SecondaryMap<WidgetId, WidgetId>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    registry: OverlayRegistry,
    lifecycle: LifecycleTracker,
    dispatcher: EventDispatcher,
    focus: Option<WidgetId>,
    capture: Option<(WidgetId, String)>,
    now: Instant,
    provider: Option<Box<dyn StyleProvider>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            parents: SecondaryMap::new(),
            children: SecondaryMap::new(),
            registry: OverlayRegistry::new(),
            lifecycle: LifecycleTracker::new(),
            dispatcher: EventDispatcher::new(),
            focus: None,
            capture: None,
            now: Instant::now(),
            provider: None,
        }
    }

    /// Use `provider` for every widget's root styles from the next render on.
    pub fn with_style_provider(mut self, provider: impl StyleProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// The document clock.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    // ── Tree ─────────────────────────────────────────────────────────

    /// Mount `widget` as a root and connect it.
    pub fn mount(&mut self, widget: impl Widget) -> WidgetId {
        self.attach(Box::new(widget), None)
    }

    /// Mount `widget` under `parent`. `None` if `parent` is not mounted.
    pub fn mount_child(&mut self, parent: WidgetId, widget: impl Widget) -> Option<WidgetId> {
        if !self.widgets.contains_key(parent) {
            return None;
        }
        Some(self.attach(Box::new(widget), Some(parent)))
    }

    fn attach(&mut self, widget: Box<dyn Widget>, parent: Option<WidgetId>) -> WidgetId {
        let id = self.widgets.insert(widget);
        self.children.insert(id, Vec::new());
        if let Some(parent) = parent {
            self.parents.insert(id, parent);
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.push(id);
            }
        }
        self.lifecycle.on_connect(id);
        self.call(id, |w, cx| w.connected(cx));
        log::debug!("mounted {id:?}");
        id
    }

    /// Disconnect and drop `id` and everything under it.
    pub fn unmount(&mut self, id: WidgetId) -> bool {
        if !self.widgets.contains_key(id) {
            return false;
        }
        for child in self.children.get(id).cloned().unwrap_or_default() {
            self.unmount(child);
        }
        self.call(id, |w, cx| w.disconnected(cx));
        self.registry.unregister_owner(id);
        self.registry.queue_mut().remove(id);
        self.lifecycle.on_disconnect(id);
        if let Some(parent) = self.parents.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|c| *c != id);
            }
        }
        self.children.remove(id);
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.capture.as_ref().is_some_and(|(c, _)| *c == id) {
            self.capture = None;
        }
        self.widgets.remove(id);
        self.notify_queue();
        log::debug!("unmounted {id:?}");
        true
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parents.get(id).copied()
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Whether `target` is `owner` or lies under it.
    pub fn is_inside(&self, owner: WidgetId, target: WidgetId) -> bool {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == owner {
                return true;
            }
            current = self.parents.get(id).copied();
        }
        false
    }

    // ── Widget access ────────────────────────────────────────────────

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| w.as_ref())
    }

    /// Typed access to a mounted widget.
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.widgets.get(id)?.as_any().downcast_ref::<W>()
    }

    /// Run `f` on a mounted widget of type `W`. Whatever it emits is routed
    /// like any other notification.
    pub fn update<W: Widget, R>(&mut self, id: WidgetId, f: impl FnOnce(&mut W) -> R) -> Option<R> {
        self.call(id, |w, _| w.as_any_mut().downcast_mut::<W>().map(f))
            .flatten()
    }

    /// Write an attribute as an embedder would.
    pub fn set_attribute(&mut self, id: WidgetId, name: &str, value: Option<&str>) -> bool {
        self.call(id, |w, _| reflect::set_attribute(w, name, value))
            .unwrap_or(false)
    }

    pub fn remove_attribute(&mut self, id: WidgetId, name: &str) -> bool {
        self.set_attribute(id, name, None)
    }

    pub fn attribute(&self, id: WidgetId, name: &str) -> Option<&str> {
        self.widgets.get(id)?.host().attribute(name)
    }

    /// Report the laid-out rectangle of `part` of widget `id`.
    pub fn set_part_bounds(&mut self, id: WidgetId, part: &str, rect: Rect) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.host_mut().set_part_bounds(part, rect);
        }
    }

    pub fn part_bounds(&self, id: WidgetId, part: &str) -> Rect {
        self.widgets
            .get(id)
            .map_or(Rect::EMPTY, |w| w.host().part_bounds(part))
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Flush every pending render. Returns how many widgets rendered.
    pub fn render(&mut self) -> usize {
        let ids: Vec<WidgetId> = self.widgets.keys().collect();
        ids.into_iter()
            .filter(|&id| self.render_widget(id) != Invalidation::None)
            .count()
    }

    fn render_widget(&mut self, id: WidgetId) -> Invalidation {
        let Some(widget) = self.widgets.get_mut(id) else {
            return Invalidation::None;
        };
        let kind = flush(widget.as_mut(), self.provider.as_deref());
        self.lifecycle.on_render(id, kind);
        kind
    }

    /// Rendered internal markup of `id`, after flushing it.
    pub fn markup(&mut self, id: WidgetId) -> Option<String> {
        self.render_widget(id);
        self.widgets.get(id).map(|w| w.host().surface().to_markup())
    }

    pub fn lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    // ── Callbacks ────────────────────────────────────────────────────

    /// Call into widget `id` with a fresh context, then act on what it
    /// asked for.
    fn call<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> R,
    ) -> Option<R> {
        self.call_with_outcome(id, f).map(|(out, _)| out)
    }

    fn call_with_outcome<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> R,
    ) -> Option<(R, Outcome)> {
        let widget = self.widgets.get_mut(id)?;
        let mut cx = Context::new(id, self.now, &mut self.registry);
        let out = f(widget.as_mut(), &mut cx);
        let outcome = Outcome {
            stopped: cx.is_propagation_stopped(),
            capture: cx.capture(),
            focus: cx.focus_request(),
            remove: cx.is_removal_requested(),
        };
        self.finish(id, outcome);
        Some((out, outcome))
    }

    fn finish(&mut self, id: WidgetId, outcome: Outcome) {
        self.route_notifications(id);
        if let Some(part) = outcome.focus {
            self.focus(id, part);
        }
        if outcome.remove {
            self.unmount(id);
        } else {
            self.notify_queue();
        }
    }

    fn route_notifications(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get_mut(id) else {
            return;
        };
        let outbox = widget.host_mut().take_notifications();
        if outbox.is_empty() {
            return;
        }
        let parents = &self.parents;
        let path = EventDispatcher::bubble_path(id, |w| parents.get(w).copied());
        for notification in outbox {
            self.dispatcher
                .push(Envelope::new(notification, id, path.clone()));
        }
    }

    /// Let every queued notification re-read its offset after the stack
    /// changed.
    fn notify_queue(&mut self) {
        if !self.registry.queue_mut().take_dirty() {
            return;
        }
        for member in self.registry.queue().ids() {
            self.call(member, |w, cx| w.on_queue_changed(cx));
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// The part of `id` that handles `event` aimed at `part`: the nearest
    /// inclusive ancestor listening for its kind.
    fn listening_part(&self, id: WidgetId, part: &str, event: &UiEvent) -> Option<String> {
        let surface = self.widgets.get(id)?.host().surface();
        let dom = surface.dom();
        let node = dom.query_part(part)?;
        let kind = event.listen_kind();
        std::iter::once(node)
            .chain(dom.ancestors(node))
            .find(|&n| surface.listens(n, kind))
            .and_then(|n| dom.part_of(n))
            .map(str::to_owned)
    }

    /// Deliver `event` at `part` of `id`. `None` when nothing listens.
    fn deliver(&mut self, id: WidgetId, part: &str, event: UiEvent) -> Option<(String, Outcome)> {
        self.render_widget(id);
        let Some(target) = self.listening_part(id, part, &event) else {
            log::trace!("no listener for {:?} at `{part}`", event.listen_kind());
            return None;
        };
        let (_, outcome) =
            self.call_with_outcome(id, |w, cx| w.handle_event(&target, &event, cx))?;
        Some((target, outcome))
    }

    pub fn pointer_down(&mut self, id: WidgetId, part: &str, pointer: PointerEvent) -> bool {
        let Some((target, outcome)) = self.deliver(id, part, UiEvent::PointerDown(pointer)) else {
            return false;
        };
        if outcome.capture == Some(Capture::Acquire) {
            self.capture = Some((id, target));
        }
        true
    }

    /// Move the pointer. Only a capturing widget sees moves.
    pub fn pointer_move(&mut self, pointer: PointerEvent) -> bool {
        self.to_capture(UiEvent::PointerMove(pointer), false)
    }

    pub fn pointer_up(&mut self, pointer: PointerEvent) -> bool {
        self.to_capture(UiEvent::PointerUp(pointer), true)
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.to_capture(UiEvent::PointerCancel, true)
    }

    fn to_capture(&mut self, event: UiEvent, ends: bool) -> bool {
        let Some((id, part)) = self.capture.clone() else {
            log::debug!("{:?} ignored: no pointer capture", event.listen_kind());
            return false;
        };
        let outcome = self.call_with_outcome(id, |w, cx| w.handle_event(&part, &event, cx));
        if ends || outcome.is_some_and(|(_, o)| o.capture == Some(Capture::Release)) {
            self.capture = None;
        }
        true
    }

    pub fn pointer_leave(&mut self, id: WidgetId, part: &str) -> bool {
        self.deliver(id, part, UiEvent::PointerLeave).is_some()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Click `part` of `id` at `point`, then let document-level listeners
    /// outside `id` react unless the widget stopped propagation.
    pub fn click(&mut self, id: WidgetId, part: &str, point: Point) -> bool {
        let delivered = self.deliver(id, part, UiEvent::Click(point));
        let stopped = delivered.as_ref().is_some_and(|(_, o)| o.stopped);
        if !stopped {
            self.dispatch_outside_click(Some(id));
        }
        delivered.is_some()
    }

    /// Click on the document outside every widget.
    pub fn click_background(&mut self) {
        self.dispatch_outside_click(None);
    }

    fn dispatch_outside_click(&mut self, target: Option<WidgetId>) {
        let owners = self
            .registry
            .dispatch_outside_click(target, |owner, t| self.is_inside(owner, t));
        for owner in owners {
            self.call(owner, |w, cx| w.on_outside_click(cx));
        }
    }

    /// Move keyboard focus to `part` of `id`. Returns `false` if the part
    /// cannot take focus.
    pub fn focus(&mut self, id: WidgetId, part: &str) -> bool {
        self.render_widget(id);
        let focused = self
            .widgets
            .get_mut(id)
            .is_some_and(|w| w.host_mut().surface_mut().focus_part(part));
        if !focused {
            return false;
        }
        if let Some(previous) = self.focus.filter(|p| *p != id) {
            self.blur_widget(previous);
        }
        self.focus = Some(id);
        self.deliver(id, part, UiEvent::Focus);
        true
    }

    /// Drop keyboard focus.
    pub fn blur(&mut self) -> bool {
        match self.focus.take() {
            Some(id) => {
                self.blur_widget(id);
                true
            }
            None => false,
        }
    }

    fn blur_widget(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get_mut(id) else {
            return;
        };
        let part = widget.host().surface().focused_part().map(str::to_owned);
        widget.host_mut().surface_mut().blur();
        if let Some(part) = part {
            self.deliver(id, &part, UiEvent::Blur);
        }
    }

    pub fn focused(&self) -> Option<(WidgetId, &str)> {
        let id = self.focus?;
        let part = self.widgets.get(id)?.host().surface().focused_part()?;
        Some((id, part))
    }

    fn to_focused(&mut self, event: UiEvent) -> bool {
        let Some((id, part)) = self.focused().map(|(id, p)| (id, p.to_owned())) else {
            log::debug!("{:?} ignored: nothing focused", event.listen_kind());
            return false;
        };
        self.deliver(id, &part, event).is_some()
    }

    /// Press a key in the focused part.
    pub fn key(&mut self, key: KeyEvent) -> bool {
        self.to_focused(UiEvent::Key(key))
    }

    /// Insert text in the focused part.
    pub fn type_text(&mut self, text: &str) -> bool {
        self.to_focused(UiEvent::TextInput(text.to_owned()))
    }

    pub fn commit_text(&mut self) -> bool {
        self.to_focused(UiEvent::TextCommit)
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// The next animation frame.
    pub fn frame(&mut self) {
        let ids: Vec<WidgetId> = self.widgets.keys().collect();
        for id in ids {
            self.call(id, |w, cx| w.on_frame(cx));
        }
    }

    /// Earliest pending timer of any widget.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.widgets.values().filter_map(|w| w.next_deadline()).min()
    }

    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.now + by);
    }

    /// Move the clock to `until`, firing every timer on the way in
    /// deadline order.
    pub fn advance_to(&mut self, until: Instant) {
        while let Some(deadline) = self.next_deadline().filter(|d| *d <= until) {
            self.now = self.now.max(deadline);
            let due: Vec<WidgetId> = self
                .widgets
                .iter()
                .filter(|(_, w)| w.next_deadline().is_some_and(|d| d <= self.now))
                .map(|(id, _)| id)
                .collect();
            for id in due {
                self.call(id, |w, cx| w.poll_timers(cx));
            }
        }
        self.now = self.now.max(until);
    }

    // ── Notifications ────────────────────────────────────────────────

    /// Drain every routed notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Envelope> {
        self.dispatcher.drain()
    }

    /// Pending notifications of `kind`.
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.dispatcher.count(kind)
    }

    /// Stream every notification routed from now on.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Envelope> {
        self.dispatcher.subscribe()
    }

    /// Mount and show a notification toast.
    pub fn show_notification(&mut self, config: NotificationConfig) -> WidgetId {
        self.mount(Notification::from_config(config))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Timed for Document {
    fn next_deadline(&self) -> Option<Instant> {
        Document::next_deadline(self)
    }

    fn poll(&mut self, now: Instant) {
        self.advance_to(now);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, NotificationKind};
    use crate::overlay::{OverlayPhase, DROPDOWN_EXIT, NOTIFICATION_EXIT};
    use crate::reflect::SelectOption;
    use crate::widgets::{Button, Card, Input, Select, Slider, SliderConfig, Switch};
    use pretty_assertions::assert_eq;

    fn kinds(doc: &mut Document) -> Vec<NotificationKind> {
        doc.drain_notifications().iter().map(Envelope::kind).collect()
    }

    #[test]
    fn notifications_bubble_to_ancestors() {
        let mut doc = Document::new();
        let card = doc.mount(Card::new("Settings"));
        let button = doc.mount_child(card, Button::new("Save")).unwrap();
        doc.render();
        assert!(doc.click(button, "button", Point::ORIGIN));

        let out = doc.drain_notifications();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sender, button);
        assert_eq!(out[0].path, vec![button, card]);
        assert!(out[0].reaches(card));
    }

    #[test]
    fn unmount_drops_subtree() {
        let mut doc = Document::new();
        let card = doc.mount(Card::default());
        let child = doc.mount_child(card, Switch::new()).unwrap();
        assert!(doc.unmount(card));
        assert!(!doc.contains(child));
        assert!(doc.is_empty());
        assert!(!doc.unmount(card));
    }

    #[test]
    fn outside_click_closes_open_select() {
        let mut doc = Document::new();
        let options = vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")];
        let select = doc.mount(Select::new(options));
        let button = doc.mount(Button::new("Elsewhere"));
        assert_eq!(doc.registry().listener_count(), 1);

        doc.render();
        doc.click(select, "field", Point::ORIGIN);
        // Still opening: the opening click never closes it.
        doc.click_background();
        assert_eq!(doc.get::<Select>(select).unwrap().phase(), OverlayPhase::Opening);

        doc.frame();
        doc.click(button, "button", Point::ORIGIN);
        assert_eq!(doc.get::<Select>(select).unwrap().phase(), OverlayPhase::Closing);
        doc.advance(DROPDOWN_EXIT);
        assert_eq!(doc.get::<Select>(select).unwrap().phase(), OverlayPhase::Idle);

        doc.unmount(select);
        assert_eq!(doc.registry().listener_count(), 0);
    }

    #[test]
    fn pointer_capture_routes_drag_moves() {
        let mut doc = Document::new();
        let slider = doc.mount(Slider::from_config(SliderConfig::default().with_range(0.0, 100.0, 5.0)));
        doc.set_part_bounds(slider, "track", Rect::new(0.0, 0.0, 200.0, 6.0));
        doc.render();

        assert!(doc.pointer_down(slider, "thumb", PointerEvent::at(0.0, 3.0)));
        assert!(doc.is_capturing());
        assert_eq!(doc.focused().map(|(_, part)| part.to_owned()).as_deref(), Some("thumb"));
        doc.pointer_move(PointerEvent::at(104.0, 3.0));
        doc.pointer_up(PointerEvent::at(104.0, 3.0));
        assert!(!doc.is_capturing());

        assert_eq!(doc.get::<Slider>(slider).unwrap().value(), 50.0);
        assert_eq!(kinds(&mut doc), vec![NotificationKind::Input, NotificationKind::Change]);
        assert!(!doc.pointer_move(PointerEvent::at(150.0, 3.0)));
    }

    #[test]
    fn track_click_after_switch_drag_toggles() {
        let mut doc = Document::new();
        let switch = doc.mount(Switch::new());
        doc.render();

        doc.pointer_down(switch, "thumb", PointerEvent::at(15.0, 14.0));
        doc.pointer_move(PointerEvent::at(45.0, 14.0));
        doc.pointer_up(PointerEvent::at(45.0, 14.0));
        assert!(doc.get::<Switch>(switch).unwrap().is_checked());
        assert_eq!(kinds(&mut doc), vec![NotificationKind::Change]);

        doc.click(switch, "track", Point::new(5.0, 14.0));
        assert!(!doc.get::<Switch>(switch).unwrap().is_checked());
        assert_eq!(kinds(&mut doc), vec![NotificationKind::Change]);
    }

    #[test]
    fn focus_moves_between_widgets() {
        let mut doc = Document::new();
        let first = doc.mount(Input::new());
        let second = doc.mount(Input::new());
        assert!(doc.focus(first, "input"));
        doc.type_text("hi");
        assert!(doc.focus(second, "input"));
        assert_eq!(doc.get::<Input>(first).unwrap().value(), "hi");
        assert!(!doc.get::<Input>(first).unwrap().is_focused());
        assert!(doc.get::<Input>(second).unwrap().is_focused());

        assert_eq!(
            kinds(&mut doc),
            vec![
                NotificationKind::Focus,
                NotificationKind::Input,
                NotificationKind::Blur,
                NotificationKind::Focus,
            ]
        );
        assert!(doc.key(KeyEvent::plain(Key::Enter)));
        assert_eq!(kinds(&mut doc), vec![NotificationKind::Change]);
    }

    #[test]
    fn attribute_writes_go_through_reflection() {
        let mut doc = Document::new();
        let slider = doc.mount(Slider::default());
        assert!(doc.set_attribute(slider, "value", Some("250")));
        assert_eq!(doc.get::<Slider>(slider).unwrap().value(), 100.0);
        assert!(!doc.set_attribute(slider, "value", Some("250")));
        assert!(doc.attribute(slider, "value").is_some());
    }

    #[test]
    fn update_routes_emitted_notifications() {
        let mut doc = Document::new();
        let switch = doc.mount(Switch::new());
        doc.update::<Switch, _>(switch, |s| s.toggle());
        assert_eq!(doc.count(NotificationKind::Change), 1);
        assert_eq!(doc.update::<Button, _>(switch, |_| ()), None);
    }

    #[test]
    fn notification_lifecycle_in_document() {
        let mut doc = Document::new();
        let first = doc.show_notification(NotificationConfig::default().with_duration(1000));
        let second = doc.show_notification(NotificationConfig::default().with_duration(0));
        doc.frame();
        assert_eq!(doc.registry().queue().ids(), vec![second, first]);
        assert!(doc.get::<Notification>(first).unwrap().offset() > 0.0);

        doc.advance(Duration::from_millis(1000) + NOTIFICATION_EXIT);
        assert!(!doc.contains(first));
        assert_eq!(doc.registry().queue().ids(), vec![second]);
        assert_eq!(doc.count(NotificationKind::Close), 1);
        assert_eq!(doc.next_deadline(), None);
    }

    #[test]
    fn lifecycle_events_record_renders() {
        let mut doc = Document::new();
        let button = doc.mount(Button::new("Go"));
        assert_eq!(doc.render(), 1);
        assert_eq!(doc.render(), 0);
        assert_eq!(
            doc.lifecycle_events(),
            vec![
                LifecycleEvent::Connected { id: button },
                LifecycleEvent::Rendered { id: button, kind: Invalidation::Rebuild },
            ]
        );
    }

    #[test]
    fn style_provider_reaches_every_root() {
        let provider = |key: crate::theme::ThemeKey, widget_type: &str| {
            vec![("--frost-widget".to_string(), format!("{widget_type}/{}", key.variant.keyword()))]
        };
        let mut doc = Document::new().with_style_provider(provider);
        let button = doc.mount(Button::new("Go"));
        let markup = doc.markup(button).unwrap();
        assert!(markup.contains("--frost-widget: Button/blur"));
    }
}
