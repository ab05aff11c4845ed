//! # frost-ui
//!
//! Headless, themeable interactive widgets.
//!
//! frost-ui models the behavior of a small widget set (buttons, switches,
//! sliders, dropdowns, inputs, toasts) without drawing anything. Each widget
//! keeps its state in typed fields, mirrors it into string attributes,
//! renders a private element tree, and reports what happened as outbound
//! notifications. An embedder supplies geometry, input and a clock.
//!
//! ## Core Systems
//!
//! - **[`reflect`]**: attribute reflection between string attributes and typed fields
//! - **[`gesture`]**: pointer drags, clicks and keys turned into values
//! - **[`overlay`]**: dropdown and toast lifecycles, outside clicks, the notification stack
//! - **[`render`]**: declarative views, patch-vs-rebuild scheduling, focus-preserving surfaces
//! - **[`dom`]**: slotmap-backed element arena each widget renders into
//! - **[`widget`]** / **[`widgets`]**: the widget trait and the built-in widgets
//! - **[`document`]**: mounts widgets and routes input, timers and notifications
//! - **[`event`]**: platform input and outbound notifications
//! - **[`value`]**, **[`geometry`]**, **[`theme`]**: shared primitives

// Foundation
pub mod geometry;
pub mod theme;
pub mod value;

// Core systems
pub mod dom;
pub mod gesture;
pub mod overlay;
pub mod reflect;
pub mod render;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Document
pub mod document;

// Headless testing
pub mod testing;

pub use document::Document;
pub use event::{Envelope, NotificationKind, UiEvent};
pub use geometry::{Axis, Point, Rect};
pub use theme::{Theme, ThemeKey, Variant};
pub use widget::{Widget, WidgetId};
