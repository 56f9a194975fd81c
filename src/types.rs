//! Strongly-typed layout primitives resolved against a bounding rectangle.
//!
//! Design goals:
//! - No bare reference-length math in domain logic
//! - Relative quantities stay unitless until resolution time

use std::hash::{Hash, Hasher};

use glam::{DVec2, dvec2};

/// A scalar measured against a reference length.
///
/// Absolute dimensions are fixed lengths independent of context; relative
/// dimensions are unitless fractions multiplied against the reference length
/// at resolution time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// A fixed length, independent of the reference.
    Absolute(f64),
    /// A unitless fraction of the reference length.
    Relative(f64),
}

impl Dimension {
    pub const ZERO: Dimension = Dimension::Absolute(0.0);

    /// Resolve to a concrete length against `reference`.
    #[inline]
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Dimension::Absolute(value) => value,
            Dimension::Relative(fraction) => fraction * reference,
        }
    }

    /// True iff the underlying number is exactly zero.
    ///
    /// `Relative(0.0)` is zero regardless of the reference length.
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Dimension::Absolute(value) | Dimension::Relative(value) => value == 0.0,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::ZERO
    }
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // -0.0 and 0.0 compare equal; normalize before taking bits
        match self {
            Dimension::Absolute(value) => {
                state.write_u8(0);
                state.write_u64((value + 0.0).to_bits());
            }
            Dimension::Relative(fraction) => {
                state.write_u8(1);
                state.write_u64((fraction + 0.0).to_bits());
            }
        }
    }
}

/// A point built from two dimensions, resolved against a reference size.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Default)]
pub struct DimensionPoint {
    pub x: Dimension,
    pub y: Dimension,
}

impl DimensionPoint {
    pub fn new(x: Dimension, y: Dimension) -> Self {
        DimensionPoint { x, y }
    }

    /// Resolve both components: x against the width, y against the height.
    pub fn resolve(self, reference: DVec2) -> DVec2 {
        dvec2(self.x.resolve(reference.x), self.y.resolve(reference.y))
    }
}

/// A size built from two dimensions, resolved against a reference size.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Default)]
pub struct DimensionSize {
    pub width: Dimension,
    pub height: Dimension,
}

impl DimensionSize {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        DimensionSize { width, height }
    }

    pub fn resolve(self, reference: DVec2) -> DVec2 {
        dvec2(
            self.width.resolve(reference.x),
            self.height.resolve(reference.y),
        )
    }
}

/// Per-edge insets. Horizontal edges resolve against the rect width,
/// vertical edges against the rect height.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Default)]
pub struct EdgeInsets {
    pub top: Dimension,
    pub left: Dimension,
    pub bottom: Dimension,
    pub right: Dimension,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: Dimension::ZERO,
        left: Dimension::ZERO,
        bottom: Dimension::ZERO,
        right: Dimension::ZERO,
    };

    pub fn new(top: Dimension, left: Dimension, bottom: Dimension, right: Dimension) -> Self {
        EdgeInsets {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same dimension on all four edges.
    pub fn uniform(inset: Dimension) -> Self {
        EdgeInsets {
            top: inset,
            left: inset,
            bottom: inset,
            right: inset,
        }
    }

    /// A fixed length on all four edges.
    pub fn absolute(inset: f64) -> Self {
        Self::uniform(Dimension::Absolute(inset))
    }

    /// True iff every edge is zero.
    pub fn is_zero(&self) -> bool {
        self.top.is_zero() && self.left.is_zero() && self.bottom.is_zero() && self.right.is_zero()
    }
}

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        min: DVec2::ZERO,
        max: DVec2::ZERO,
    };

    /// Create a rect from an origin and extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            min: dvec2(x, y),
            max: dvec2(x + width, y + height),
        }
    }

    /// Create a rect spanning two arbitrary corner points.
    pub fn from_points(a: DVec2, b: DVec2) -> Rect {
        Rect {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink the rect by the given edge insets, each resolved against this
    /// rect's width (horizontal edges) or height (vertical edges).
    pub fn inset(self, insets: &EdgeInsets) -> Rect {
        let size = self.size();
        Rect {
            min: dvec2(
                self.min.x + insets.left.resolve(size.x),
                self.min.y + insets.top.resolve(size.y),
            ),
            max: dvec2(
                self.max.x - insets.right.resolve(size.x),
                self.max.y - insets.bottom.resolve(size.y),
            ),
        }
    }

    /// Grow the rect outward by `amount` on every edge (negative shrinks).
    pub fn expand(self, amount: f64) -> Rect {
        Rect {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }

    /// True iff the rect has non-positive width or height.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// True iff the point lies within the rect (edges inclusive).
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

impl Hash for Rect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in [self.min.x, self.min.y, self.max.x, self.max.y] {
            state.write_u64((value + 0.0).to_bits());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Dimension tests ====================

    #[test]
    fn absolute_resolves_to_itself() {
        assert_eq!(Dimension::Absolute(12.5).resolve(100.0), 12.5);
        assert_eq!(Dimension::Absolute(12.5).resolve(0.0), 12.5);
    }

    #[test]
    fn relative_resolves_against_reference() {
        assert_eq!(Dimension::Relative(0.25).resolve(200.0), 50.0);
        assert_eq!(Dimension::Relative(0.25).resolve(0.0), 0.0);
    }

    #[test]
    fn relative_zero_is_zero_regardless_of_reference() {
        assert!(Dimension::Relative(0.0).is_zero());
        assert!(Dimension::Absolute(0.0).is_zero());
        assert!(!Dimension::Relative(0.001).is_zero());
        assert!(!Dimension::Absolute(-1.0).is_zero());
    }

    #[test]
    fn dimension_point_resolves_componentwise() {
        let point = DimensionPoint::new(Dimension::Relative(0.5), Dimension::Absolute(10.0));
        assert_eq!(point.resolve(dvec2(200.0, 100.0)), dvec2(100.0, 10.0));
    }

    #[test]
    fn dimension_size_resolves_componentwise() {
        let size = DimensionSize::new(Dimension::Absolute(30.0), Dimension::Relative(1.0));
        assert_eq!(size.resolve(dvec2(200.0, 100.0)), dvec2(30.0, 100.0));
    }

    // ==================== EdgeInsets tests ====================

    #[test]
    fn zero_insets_report_zero() {
        assert!(EdgeInsets::ZERO.is_zero());
        assert!(EdgeInsets::uniform(Dimension::Relative(0.0)).is_zero());
        assert!(!EdgeInsets::absolute(1.0).is_zero());
    }

    #[test]
    fn mixed_insets_resolve_against_matching_axes() {
        let insets = EdgeInsets::new(
            Dimension::Absolute(10.0), // top
            Dimension::Relative(0.1),  // left: 10% of width
            Dimension::ZERO,           // bottom
            Dimension::Absolute(20.0), // right
        );
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let inset = rect.inset(&insets);
        assert_eq!(inset.min, dvec2(20.0, 10.0));
        assert_eq!(inset.max, dvec2(180.0, 100.0));
    }

    // ==================== Rect tests ====================

    #[test]
    fn rect_accessors() {
        let rect = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(rect.width(), 200.0);
        assert_eq!(rect.height(), 100.0);
        assert_eq!(rect.size(), dvec2(200.0, 100.0));
        assert_eq!(rect.center(), dvec2(110.0, 70.0));
    }

    #[test]
    fn rect_from_points_normalizes_corners() {
        let rect = Rect::from_points(dvec2(5.0, -2.0), dvec2(-1.0, 4.0));
        assert_eq!(rect.min, dvec2(-1.0, -2.0));
        assert_eq!(rect.max, dvec2(5.0, 4.0));
    }

    #[test]
    fn expand_grows_every_edge() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0).expand(10.0);
        assert_eq!(rect.min, dvec2(-10.0, -10.0));
        assert_eq!(rect.max, dvec2(210.0, 110.0));
    }

    #[test]
    fn degenerate_rects() {
        assert!(Rect::new(0.0, 0.0, 0.0, 100.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 100.0, 0.0).is_degenerate());
        // over-inset rects invert and count as degenerate
        assert!(
            Rect::new(0.0, 0.0, 10.0, 10.0)
                .inset(&EdgeInsets::absolute(6.0))
                .is_degenerate()
        );
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn rect_contains_points() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(dvec2(5.0, 5.0)));
        assert!(rect.contains(dvec2(0.0, 0.0)));
        assert!(!rect.contains(dvec2(-0.1, 5.0)));
    }
}
