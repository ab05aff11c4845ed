//! Gesture-to-value engine.
//!
//! Click-to-jump, drag and keyboard stepping all funnel through
//! [`NumericRange::snap`](crate::value::NumericRange::snap), so every path
//! yields a clamped value on the step grid. Switches use [`ToggleDrag`], a
//! two-position threshold decision instead of a continuous value.

pub mod drag;
pub mod engine;
pub mod keyboard;
pub mod toggle;

pub use drag::{point_from_click, DragSession};
pub use engine::{CancelPolicy, DragEnd, GestureEngine};
pub use keyboard::{key_step, PAGE_STEPS};
pub use toggle::ToggleDrag;
