//! Integer geometry for layout output and hit testing.

use std::fmt;

use crate::domain::color::Rgb;

/// Axis-aligned rectangle in screen coordinates: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Strict containment: points on the border are outside.
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        x < px
            && px < x + i64::from(self.width)
            && y < py
            && py < y + i64::from(self.height)
    }

    /// True if the two rectangles share interior area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (ax0, ay0) = (i64::from(self.x), i64::from(self.y));
        let (ax1, ay1) = (ax0 + i64::from(self.width), ay0 + i64::from(self.height));
        let (bx0, by0) = (i64::from(other.x), i64::from(other.y));
        let (bx1, by1) = (bx0 + i64::from(other.width), by0 + i64::from(other.height));
        ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }
}

impl From<(i32, i32, u32, u32)> for Rect {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One rendered leaf: where it goes and how it is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub rect: Rect,
    pub color: Rgb,
}
