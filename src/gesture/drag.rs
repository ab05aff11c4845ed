//! Pointer position to value mapping.

use crate::geometry::{Axis, Point, Rect};
use crate::value::NumericRange;

/// Map a single click onto the range: linear over `track` along `axis`,
/// then clamped and snapped.
///
/// Vertical tracks increase bottom-to-top.
pub fn point_from_click(range: &NumericRange, track: Rect, pointer: Point, axis: Axis) -> f64 {
    range.snap(range.value_at(axis.fraction_in(track, pointer)))
}

/// One in-flight drag. Created on pointer down, dropped on up or cancel.
///
/// The track geometry is a snapshot taken when the drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub axis: Axis,
    pub start_pointer: Point,
    pub start_value: f64,
    pub track: Rect,
    /// Last value produced by [`DragSession::value_at`] and accepted by the
    /// engine.
    pub last_value: f64,
}

impl DragSession {
    pub fn begin(axis: Axis, pointer: Point, start_value: f64, track: Rect) -> Self {
        Self {
            axis,
            start_pointer: pointer,
            start_value,
            track,
            last_value: start_value,
        }
    }

    /// Value for the pointer at `pointer`: the start value plus the pointer
    /// travel as a share of the track length, scaled to the range span.
    pub fn value_at(&self, range: &NumericRange, pointer: Point) -> f64 {
        let length = self.track.length(self.axis);
        let ratio = if length > 0.0 {
            self.axis.travel(self.start_pointer, pointer) / length
        } else {
            0.0
        };
        range.snap(self.start_value + ratio * (range.max() - range.min()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Rect {
        Rect::new(100.0, 0.0, 200.0, 200.0)
    }

    #[test]
    fn click_maps_linearly_and_snaps() {
        let range = NumericRange::new(0.0, 100.0, 5.0);
        let v = point_from_click(&range, track(), Point::new(100.0 + 0.52 * 200.0, 10.0), Axis::Horizontal);
        assert_eq!(v, 50.0);
    }

    #[test]
    fn click_outside_track_clamps() {
        let range = NumericRange::new(0.0, 100.0, 1.0);
        assert_eq!(point_from_click(&range, track(), Point::new(50.0, 0.0), Axis::Horizontal), 0.0);
        assert_eq!(point_from_click(&range, track(), Point::new(900.0, 0.0), Axis::Horizontal), 100.0);
    }

    #[test]
    fn vertical_click_is_inverted() {
        let range = NumericRange::new(0.0, 10.0, 1.0);
        assert_eq!(point_from_click(&range, track(), Point::new(0.0, 150.0), Axis::Vertical), 3.0);
    }

    #[test]
    fn drag_is_relative_to_start() {
        let range = NumericRange::new(0.0, 100.0, 1.0);
        let s = DragSession::begin(Axis::Horizontal, Point::new(150.0, 5.0), 25.0, track());
        assert_eq!(s.value_at(&range, Point::new(190.0, 80.0)), 45.0);
        assert_eq!(s.value_at(&range, Point::new(0.0, 5.0)), 0.0);
    }

    #[test]
    fn drag_on_degenerate_track_holds_start() {
        let range = NumericRange::default();
        let s = DragSession::begin(Axis::Horizontal, Point::ORIGIN, 40.0, Rect::EMPTY);
        assert_eq!(s.value_at(&range, Point::new(500.0, 0.0)), 40.0);
    }
}
