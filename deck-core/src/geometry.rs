//! Inch-based geometry shared by every layout.
//!
//! All coordinates are absolute, measured in inches from the canvas top-left
//! corner. Conversion to English Metric Units happens only at the serializer
//! boundary via [`Rect::to_emu`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Tolerance used when comparing accumulated inch offsets against bounds.
pub const EPSILON: f64 = 1e-9;

/// Convert inches to whole EMUs.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Convert points to whole EMUs.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn points_to_emu(points: f64) -> i64 {
    (points * EMU_PER_POINT).round() as i64
}

/// A position in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Distance from the left edge.
    pub x: f64,
    /// Distance from the top edge.
    pub y: f64,
}

impl Point {
    /// The canvas origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by the given deltas.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A width and height in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both extents are finite and non-negative.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}x{:.3}in", self.width, self.height)
    }
}

/// An axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent from the origin.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Create a rectangle from raw inch values.
    #[must_use]
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Left edge.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    /// Top edge.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    #[must_use]
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Self::from_xywh(
            self.origin.x + dx,
            self.origin.y + dy,
            self.size.width - 2.0 * dx,
            self.size.height - 2.0 * dy,
        )
    }

    /// Whether this rectangle lies inside a canvas of the given size.
    #[must_use]
    pub fn fits_within(&self, canvas: Size) -> bool {
        self.size.is_valid()
            && self.origin.x.is_finite()
            && self.origin.y.is_finite()
            && self.origin.x >= -EPSILON
            && self.origin.y >= -EPSILON
            && self.right() <= canvas.width + EPSILON
            && self.bottom() <= canvas.height + EPSILON
    }

    /// Whether this rectangle lies inside `other`.
    #[must_use]
    pub fn contained_in(&self, other: &Rect) -> bool {
        self.origin.x >= other.origin.x - EPSILON
            && self.origin.y >= other.origin.y - EPSILON
            && self.right() <= other.right() + EPSILON
            && self.bottom() <= other.bottom() + EPSILON
    }

    /// Whether the two rectangles share any interior area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.right() - EPSILON
            && other.origin.x < self.right() - EPSILON
            && self.origin.y < other.bottom() - EPSILON
            && other.origin.y < self.bottom() - EPSILON
    }

    /// The rectangle as `(x, y, cx, cy)` in EMUs.
    #[must_use]
    pub fn to_emu(&self) -> (i64, i64, i64, i64) {
        (
            inches_to_emu(self.origin.x),
            inches_to_emu(self.origin.y),
            inches_to_emu(self.size.width),
            inches_to_emu(self.size.height),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}) {}",
            self.origin.x, self.origin.y, self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_inset() {
        let rect = Rect::from_xywh(0.5, 1.3, 2.5, 0.5);
        assert!((rect.right() - 3.0).abs() < EPSILON);
        assert!((rect.bottom() - 1.8).abs() < EPSILON);

        let inner = rect.inset(0.1, 0.05);
        assert!((inner.x() - 0.6).abs() < EPSILON);
        assert!((inner.y() - 1.35).abs() < EPSILON);
        assert!((inner.width() - 2.3).abs() < EPSILON);
        assert!((inner.height() - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_fits_within_canvas() {
        let canvas = Size::new(10.0, 5.625);
        assert!(Rect::from_xywh(0.0, 0.0, 10.0, 5.625).fits_within(canvas));
        assert!(Rect::from_xywh(9.2, 5.2, 0.6, 0.3).fits_within(canvas));
        assert!(!Rect::from_xywh(9.5, 0.0, 1.0, 1.0).fits_within(canvas));
        assert!(!Rect::from_xywh(-0.1, 0.0, 1.0, 1.0).fits_within(canvas));
        assert!(!Rect::from_xywh(0.0, 0.0, -1.0, 1.0).fits_within(canvas));
        assert!(!Rect::from_xywh(f64::NAN, 0.0, 1.0, 1.0).fits_within(canvas));
    }

    #[test]
    fn test_intersects_ignores_touching_edges() {
        let a = Rect::from_xywh(0.0, 0.0, 1.0, 1.0);
        let b = Rect::from_xywh(1.0, 0.0, 1.0, 1.0);
        let c = Rect::from_xywh(0.5, 0.5, 1.0, 1.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&b));
    }

    #[test]
    fn test_emu_conversion() {
        let rect = Rect::from_xywh(1.0, 0.5, 10.0, 5.625);
        assert_eq!(rect.to_emu(), (914_400, 457_200, 9_144_000, 5_143_500));
        assert_eq!(points_to_emu(2.0), 25_400);
    }
}
