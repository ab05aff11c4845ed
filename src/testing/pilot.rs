//! Pilot: programmatic interaction with a headless Document.
//!
//! The `Pilot` wraps a [`Document`] and simulates user input against widget
//! parts the way a user would reach them: clicks land at the center of the
//! part's reported bounds, drags press, move and release, keys go to the
//! focused part, and time moves forward explicitly.

use std::time::Duration;

use crate::document::Document;
use crate::event::{Envelope, Key, KeyEvent, Modifiers, NotificationKind, PointerEvent};
use crate::geometry::{Point, Rect};
use crate::widget::{Widget, WidgetId};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless document driver for testing.
///
/// Every interaction renders pending widgets first, so tests never have to
/// remember to flush before aiming at a part.
///
/// # Examples
///
/// ```
/// use frost_ui::testing::Pilot;
/// use frost_ui::widgets::Switch;
///
/// let mut pilot = Pilot::new();
/// let switch = pilot.mount(Switch::new());
/// pilot.click(switch, "track");
/// assert!(pilot.document().get::<Switch>(switch).unwrap().is_checked());
/// ```
pub struct Pilot {
    document: Document,
}

impl Pilot {
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Drive an existing document, e.g. one with a style provider.
    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    // ── Mounting ─────────────────────────────────────────────────────

    /// Mount `widget` as a root and render it.
    pub fn mount(&mut self, widget: impl Widget) -> WidgetId {
        let id = self.document.mount(widget);
        self.document.render();
        id
    }

    /// Mount `widget` under `parent` and render it.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not mounted.
    pub fn mount_child(&mut self, parent: WidgetId, widget: impl Widget) -> WidgetId {
        let id = self
            .document
            .mount_child(parent, widget)
            .expect("parent is mounted");
        self.document.render();
        id
    }

    /// Report the laid-out bounds of `part`, as a layout pass would.
    pub fn layout(&mut self, id: WidgetId, part: &str, rect: Rect) {
        self.document.set_part_bounds(id, part, rect);
    }

    // ── Pointer ──────────────────────────────────────────────────────

    fn center(&self, id: WidgetId, part: &str) -> Point {
        self.document.part_bounds(id, part).center()
    }

    /// Click at the center of `part`.
    pub fn click(&mut self, id: WidgetId, part: &str) -> bool {
        let point = self.center(id, part);
        self.click_at(id, part, point)
    }

    pub fn click_at(&mut self, id: WidgetId, part: &str, point: Point) -> bool {
        self.document.render();
        let delivered = self.document.click(id, part, point);
        self.document.render();
        delivered
    }

    /// Click the document background.
    pub fn click_outside(&mut self) {
        self.document.click_background();
        self.document.render();
    }

    /// Press on `part` at its center, move through `points`, release at the
    /// last one.
    pub fn drag(&mut self, id: WidgetId, part: &str, points: &[Point]) -> bool {
        let start = self.center(id, part);
        self.document.render();
        if !self.document.pointer_down(id, part, PointerEvent::at(start.x, start.y)) {
            return false;
        }
        let mut last = start;
        for point in points {
            self.document.pointer_move(PointerEvent::at(point.x, point.y));
            last = *point;
        }
        self.document.pointer_up(PointerEvent::at(last.x, last.y));
        self.document.render();
        true
    }

    /// Start a drag on `part` and abandon it.
    pub fn drag_cancel(&mut self, id: WidgetId, part: &str, points: &[Point]) -> bool {
        let start = self.center(id, part);
        self.document.render();
        if !self.document.pointer_down(id, part, PointerEvent::at(start.x, start.y)) {
            return false;
        }
        for point in points {
            self.document.pointer_move(PointerEvent::at(point.x, point.y));
        }
        self.document.pointer_cancel();
        self.document.render();
        true
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    pub fn focus(&mut self, id: WidgetId, part: &str) -> bool {
        let focused = self.document.focus(id, part);
        self.document.render();
        focused
    }

    /// Press a key with no modifiers in the focused part.
    pub fn press(&mut self, key: Key) -> bool {
        self.press_with(key, Modifiers::NONE)
    }

    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let handled = self.document.key(KeyEvent::new(key, modifiers));
        self.document.render();
        handled
    }

    /// Type `text` into the focused part one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.document.type_text(&ch.to_string());
        }
        self.document.render();
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Deliver one animation frame.
    pub fn frame(&mut self) {
        self.document.frame();
        self.document.render();
    }

    /// Move the document clock forward by `millis`.
    pub fn advance(&mut self, millis: u64) {
        self.document.advance(Duration::from_millis(millis));
        self.document.render();
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Drain routed notifications.
    pub fn notifications(&mut self) -> Vec<Envelope> {
        self.document.drain_notifications()
    }

    /// Drain routed notifications, keeping only their kinds.
    pub fn notification_kinds(&mut self) -> Vec<NotificationKind> {
        self.notifications().iter().map(Envelope::kind).collect()
    }

    pub fn markup(&mut self, id: WidgetId) -> String {
        self.document.markup(id).unwrap_or_default()
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, Card, Input, Slider, SliderConfig, Switch};
    use pretty_assertions::assert_eq;

    #[test]
    fn click_aims_at_part_center() {
        let mut pilot = Pilot::new();
        let switch = pilot.mount(Switch::new());
        pilot.layout(switch, "track", Rect::new(10.0, 10.0, 60.0, 32.0));
        assert!(pilot.click(switch, "track"));
        assert!(pilot.document().get::<Switch>(switch).unwrap().is_checked());
        assert_eq!(pilot.notification_kinds(), vec![NotificationKind::Change]);
    }

    #[test]
    fn drag_moves_slider() {
        let mut pilot = Pilot::new();
        let slider = pilot.mount(Slider::from_config(SliderConfig::default().with_value(50.0)));
        pilot.layout(slider, "track", Rect::new(0.0, 0.0, 100.0, 6.0));
        pilot.layout(slider, "thumb", Rect::new(45.0, 0.0, 10.0, 6.0));

        assert!(pilot.drag(slider, "thumb", &[Point::new(60.0, 3.0), Point::new(75.0, 3.0)]));
        assert_eq!(pilot.document().get::<Slider>(slider).unwrap().value(), 75.0);
        assert_eq!(
            pilot.notification_kinds(),
            vec![NotificationKind::Input, NotificationKind::Input, NotificationKind::Change]
        );
    }

    #[test]
    fn drag_cancel_restores() {
        let mut pilot = Pilot::new();
        let slider = pilot.mount(Slider::from_config(SliderConfig::default().with_value(50.0)));
        pilot.layout(slider, "track", Rect::new(0.0, 0.0, 100.0, 6.0));
        pilot.layout(slider, "thumb", Rect::new(45.0, 0.0, 10.0, 6.0));

        assert!(pilot.drag_cancel(slider, "thumb", &[Point::new(80.0, 3.0)]));
        assert_eq!(pilot.document().get::<Slider>(slider).unwrap().value(), 50.0);
        assert_eq!(
            pilot.notification_kinds(),
            vec![NotificationKind::Input, NotificationKind::Input]
        );
    }

    #[test]
    fn typing_goes_to_focused_input() {
        let mut pilot = Pilot::new();
        let card = pilot.mount(Card::new("Profile"));
        let input = pilot.mount_child(card, Input::new());
        assert!(!pilot.press(Key::Enter));

        assert!(pilot.focus(input, "input"));
        pilot.type_text("ok");
        assert!(pilot.press(Key::Enter));
        assert_eq!(pilot.document().get::<Input>(input).unwrap().value(), "ok");

        let out = pilot.notifications();
        assert!(out.iter().all(|e| e.reaches(card)));
        assert_eq!(out.last().map(Envelope::kind), Some(NotificationKind::Change));
    }

    #[test]
    fn markup_of_unknown_widget_is_empty() {
        let mut pilot = Pilot::new();
        let button = pilot.mount(Button::new("Go"));
        pilot.document_mut().unmount(button);
        assert_eq!(pilot.markup(button), "");
    }
}
