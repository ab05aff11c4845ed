//! Event system: platform input in, notifications out.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::EventDispatcher;
pub use input::{from_crossterm, Key, KeyEvent, Modifiers, PointerEvent, PointerKind, UiEvent};
pub use message::{Detail, Envelope, Notification, NotificationKind, Selection};
