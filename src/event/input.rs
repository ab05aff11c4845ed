//! Platform input events, decoupled from any backend.
//!
//! Defines [`UiEvent`] and its supporting types. Crossterm events convert
//! via `From` impls and [`from_crossterm`], so the widget code never touches
//! a backend type. Terminal cells map to points in cell units.

use std::ops::{BitAnd, BitOr};

use crossterm::event as ct;

use crate::geometry::Point;
use crate::render::Listen;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any key without a dedicated variant.
    Other,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent / PointerEvent
// ---------------------------------------------------------------------------

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

/// Device that produced a pointer event. Mouse and touch are handled
/// identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Pointer position plus the producing device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub position: Point,
    pub kind: PointerKind,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            ..Self::default()
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            kind: PointerKind::Touch,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

/// Input delivered to a widget part.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// The platform aborted the gesture (touch cancel, lost capture).
    PointerCancel,
    /// Pointer left the part while pressed.
    PointerLeave,
    Click(Point),
    Key(KeyEvent),
    /// Text inserted at the caret.
    TextInput(String),
    /// The text field's value was committed (native `change`).
    TextCommit,
    Focus,
    Blur,
}

impl UiEvent {
    /// The listener kind a node needs to receive this event.
    pub fn listen_kind(&self) -> Listen {
        match self {
            UiEvent::PointerDown(_)
            | UiEvent::PointerMove(_)
            | UiEvent::PointerUp(_)
            | UiEvent::PointerCancel
            | UiEvent::PointerLeave => Listen::Pointer,
            UiEvent::Click(_) => Listen::Click,
            UiEvent::Key(_) => Listen::Key,
            UiEvent::TextInput(_) | UiEvent::TextCommit => Listen::Text,
            UiEvent::Focus | UiEvent::Blur => Listen::Focus,
        }
    }

    /// Pointer position for pointer and click events.
    pub fn position(&self) -> Option<Point> {
        match self {
            UiEvent::PointerDown(p) | UiEvent::PointerMove(p) | UiEvent::PointerUp(p) => {
                Some(p.position)
            }
            UiEvent::Click(point) => Some(*point),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(ct::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(ct::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(ct::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(event: ct::KeyEvent) -> Self {
        let code = match event.code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::BackTab => Key::BackTab,
            ct::KeyCode::Backspace => Key::Backspace,
            ct::KeyCode::Delete => Key::Delete,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Up => Key::Up,
            ct::KeyCode::Down => Key::Down,
            ct::KeyCode::Home => Key::Home,
            ct::KeyCode::End => Key::End,
            ct::KeyCode::PageUp => Key::PageUp,
            ct::KeyCode::PageDown => Key::PageDown,
            _ => Key::Other,
        };
        KeyEvent::new(code, convert_modifiers(event.modifiers))
    }
}

impl From<ct::MouseEvent> for PointerEvent {
    fn from(event: ct::MouseEvent) -> Self {
        PointerEvent {
            position: Point::new(f64::from(event.column), f64::from(event.row)),
            kind: PointerKind::Mouse,
            modifiers: convert_modifiers(event.modifiers),
        }
    }
}

/// Convert a crossterm event into a [`UiEvent`].
///
/// Returns `None` for key releases, scroll and resize events, and
/// non-left mouse buttons.
pub fn from_crossterm(event: ct::Event) -> Option<UiEvent> {
    match event {
        ct::Event::Key(key) if key.kind == ct::KeyEventKind::Release => None,
        ct::Event::Key(key) => Some(UiEvent::Key(KeyEvent::from(key))),
        ct::Event::Mouse(mouse) => {
            let pointer = PointerEvent::from(mouse);
            match mouse.kind {
                ct::MouseEventKind::Down(ct::MouseButton::Left) => Some(UiEvent::PointerDown(pointer)),
                ct::MouseEventKind::Drag(ct::MouseButton::Left) => Some(UiEvent::PointerMove(pointer)),
                ct::MouseEventKind::Up(ct::MouseButton::Left) => Some(UiEvent::PointerUp(pointer)),
                ct::MouseEventKind::Moved => Some(UiEvent::PointerMove(pointer)),
                _ => None,
            }
        }
        ct::Event::Paste(text) => Some(UiEvent::TextInput(text)),
        ct::Event::FocusGained => Some(UiEvent::Focus),
        ct::Event::FocusLost => Some(UiEvent::Blur),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods & Modifiers::ALT, Modifiers::ALT);
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn key_event_conversion() {
        let event = ct::KeyEvent::new(ct::KeyCode::PageUp, ct::KeyModifiers::SHIFT);
        let key = KeyEvent::from(event);
        assert_eq!(key.code, Key::PageUp);
        assert!(key.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn unknown_key_maps_to_other() {
        let event = ct::KeyEvent::new(ct::KeyCode::F(5), ct::KeyModifiers::NONE);
        assert_eq!(KeyEvent::from(event).code, Key::Other);
    }

    #[test]
    fn mouse_events_map_to_pointer_events() {
        let mouse = |kind| ct::MouseEvent {
            kind,
            column: 12,
            row: 3,
            modifiers: ct::KeyModifiers::NONE,
        };
        let down = from_crossterm(ct::Event::Mouse(mouse(ct::MouseEventKind::Down(ct::MouseButton::Left))));
        assert_eq!(down, Some(UiEvent::PointerDown(PointerEvent::at(12.0, 3.0))));
        let drag = from_crossterm(ct::Event::Mouse(mouse(ct::MouseEventKind::Drag(ct::MouseButton::Left))));
        assert!(matches!(drag, Some(UiEvent::PointerMove(_))));
        let right = from_crossterm(ct::Event::Mouse(mouse(ct::MouseEventKind::Down(ct::MouseButton::Right))));
        assert_eq!(right, None);
    }

    #[test]
    fn paste_becomes_text_input() {
        let event = from_crossterm(ct::Event::Paste("hi".into()));
        assert_eq!(event, Some(UiEvent::TextInput("hi".into())));
    }

    #[test]
    fn listen_kinds() {
        assert_eq!(UiEvent::PointerCancel.listen_kind(), Listen::Pointer);
        assert_eq!(UiEvent::Click(Point::ORIGIN).listen_kind(), Listen::Click);
        assert_eq!(UiEvent::TextCommit.listen_kind(), Listen::Text);
        assert_eq!(UiEvent::Blur.listen_kind(), Listen::Focus);
    }

    #[test]
    fn touch_and_mouse_share_positions() {
        let touch = UiEvent::PointerMove(PointerEvent::touch(4.0, 5.0));
        assert_eq!(touch.position(), Some(Point::new(4.0, 5.0)));
        assert_eq!(UiEvent::Focus.position(), None);
    }
}
