//! Binary toggle drag for switches.
//!
//! The thumb travels between two end positions inside the track. Releasing
//! commits to whichever end the thumb center is closer to; the pointer
//! position itself is never mapped to a value.

/// Track width in pixels.
pub const TRACK_WIDTH: f64 = 60.0;
/// Thumb diameter in pixels.
pub const THUMB_SIZE: f64 = 28.0;
/// Thumb left offset when off.
pub const THUMB_OFF: f64 = 1.0;
/// Thumb left offset when on.
pub const THUMB_ON: f64 = TRACK_WIDTH - THUMB_SIZE - THUMB_OFF;

/// Thumb left offset for a resting switch.
pub fn rest_position(checked: bool) -> f64 {
    if checked {
        THUMB_ON
    } else {
        THUMB_OFF
    }
}

/// An in-flight switch thumb drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleDrag {
    start_x: f64,
    start_left: f64,
    left: f64,
    moved: bool,
}

impl ToggleDrag {
    pub fn begin(pointer_x: f64, checked: bool) -> Self {
        let left = rest_position(checked);
        Self {
            start_x: pointer_x,
            start_left: left,
            left,
            moved: false,
        }
    }

    /// Follow the pointer. Returns the new thumb offset, bounded to the two
    /// end positions.
    pub fn update(&mut self, pointer_x: f64) -> f64 {
        let left = (self.start_left + pointer_x - self.start_x).clamp(THUMB_OFF, THUMB_ON);
        if left != self.left {
            self.moved = true;
        }
        self.left = left;
        left
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    /// Whether the thumb ever left its starting position.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// The checked state implied by the thumb position: on when the thumb
    /// center is at or past the track midpoint.
    pub fn decide(&self) -> bool {
        self.left + THUMB_SIZE / 2.0 >= TRACK_WIDTH / 2.0
    }
}
