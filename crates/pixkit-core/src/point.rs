//! Pixel coordinates.
//!
//! Coordinates are signed. A UI computes them from pointer positions
//! relative to a canvas, so a click just left of or above the canvas
//! legitimately produces a negative value. Whether a point is usable is
//! decided by [`PixelBuffer::contains`](crate::PixelBuffer::contains),
//! which checks both bounds.

use std::fmt;

/// A pixel coordinate, `(0, 0)` at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point offset by `(dx, dy)`, saturating at the `i32` range.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The four 4-connected neighbours: right, left, down, up.
    #[inline]
    pub const fn neighbors4(self) -> [Point; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
