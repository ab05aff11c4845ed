//! Core geometry types: Point, Rect, Axis.
//!
//! Coordinates are CSS pixels in viewport space (`clientX`/`clientY`), so all
//! fields are `f64`. Screen Y grows downward; [`Axis::Vertical`] accounts for
//! that when mapping a pointer onto a value range.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in viewport space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The viewport origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The coordinate of this point along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle, the equivalent of a `getBoundingClientRect()`
/// snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// A zero-sized rectangle at the origin.
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge.
    #[inline]
    pub fn left(self) -> f64 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub fn top(self) -> f64 {
        self.y
    }

    /// Right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// The center point.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `p` lies inside this rectangle (right/bottom edges exclusive).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Extent of the rectangle along `axis`.
    #[inline]
    pub fn length(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// The same rectangle moved by `dx`, `dy`.
    #[inline]
    pub fn translate(self, dx: f64, dy: f64) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..self }
    }
}

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// The axis a one-dimensional control moves along.
///
/// Horizontal values increase left-to-right. Vertical values increase
/// bottom-to-top, which is inverted relative to screen Y.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Attribute keyword for this axis.
    pub fn keyword(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }

    /// Parse an attribute keyword. Unknown keywords yield `None`.
    pub fn from_keyword(keyword: &str) -> Option<Axis> {
        match keyword {
            "horizontal" => Some(Axis::Horizontal),
            "vertical" => Some(Axis::Vertical),
            _ => None,
        }
    }

    /// Signed pointer travel from `start` to `current` in value direction.
    ///
    /// Positive means "towards max" on both axes.
    #[inline]
    pub fn travel(self, start: Point, current: Point) -> f64 {
        match self {
            Axis::Horizontal => current.x - start.x,
            Axis::Vertical => start.y - current.y,
        }
    }

    /// Fraction of `track` covered by `p`, in value direction, unclamped.
    ///
    /// Returns `0.0` for a degenerate track.
    pub fn fraction_in(self, track: Rect, p: Point) -> f64 {
        let length = track.length(self);
        if length <= 0.0 {
            return 0.0;
        }
        match self {
            Axis::Horizontal => (p.x - track.left()) / length,
            Axis::Vertical => 1.0 - (p.y - track.top()) / length,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
