//! The shape capability contract and the built-in primitives.
//!
//! A shape is a stateless value: [`Shape::path`] is a pure function of the
//! shape and a bounding rectangle, so equal shape values produce bit-for-bit
//! equal paths for the same rect, from any thread, with no synchronization.
//!
//! The built-ins emit clockwise outlines (screen coordinates, y-down). The
//! combinators in [`combine`](crate::combine) depend on that winding; shapes
//! implemented outside this crate should follow the same convention.

use std::any::Any;
use std::hash::{Hash, Hasher};

use glam::DVec2;

use crate::combine::{CombineMode, CombinedShape, InsetShape, OffsetShape};
use crate::erase::AnyShape;
use crate::errors::PathDataError;
use crate::geometry::{ellipse_path, rect_path, rounded_rect_path};
use crate::path::{ContentMode, Path};
use crate::types::{Dimension, EdgeInsets, Rect};

/// Capability to produce an outline for a bounding rectangle.
pub trait Shape {
    /// Produce the outline for `rect`. Deterministic and pure: the same rect
    /// yields the same path.
    fn path(&self, rect: Rect) -> Path;
}

/// Refinement of [`Shape`] for shapes whose contour can be grown outward or
/// shrunk inward by a signed distance.
pub trait OffsetableShape: Shape {
    /// Produce the outline grown outward by `offset` (negative shrinks).
    ///
    /// Implementations must satisfy `path_with_offset(rect, 0.0) == path(rect)`.
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path;
}

/// Combinator constructors available on every shape.
pub trait ShapeExt: Shape + Sized {
    /// Union with `other` by path concatenation (non-zero fill).
    fn adding<S: Shape>(self, other: S) -> CombinedShape<Self, S> {
        CombinedShape::new(self, other, CombineMode::Add)
    }

    /// Cut `other` out of this shape via winding reversal (non-zero fill).
    fn differencing<S: Shape>(self, other: S) -> CombinedShape<Self, S> {
        CombinedShape::new(self, other, CombineMode::Difference)
    }

    /// Shrink the bounding rectangle by `insets` before resolving.
    fn inset(self, insets: EdgeInsets) -> InsetShape<Self> {
        InsetShape::new(self, insets)
    }

    /// Grow the contour by a fixed signed `amount`.
    fn offset(self, amount: f64) -> OffsetShape<Self>
    where
        Self: OffsetableShape,
    {
        OffsetShape::new(self, amount)
    }

    /// Erase the concrete type for heterogeneous storage.
    fn erased(self) -> AnyShape
    where
        Self: PartialEq + Hash + Clone + Any,
    {
        AnyShape::new(self)
    }
}

impl<S: Shape> ShapeExt for S {}

// ============================================================================
// Primitives
// ============================================================================

/// A circle inscribed in the bounding rectangle: centered, radius
/// `min(width, height) / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Circle;

impl Shape for Circle {
    fn path(&self, rect: Rect) -> Path {
        self.path_with_offset(rect, 0.0)
    }
}

impl OffsetableShape for Circle {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        if rect.is_degenerate() {
            return Path::new();
        }
        let radius = rect.width().min(rect.height()) / 2.0 + offset;
        if radius <= 0.0 {
            return Path::new();
        }
        ellipse_path(rect.center(), DVec2::splat(radius))
    }
}

/// An ellipse filling the bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ellipse;

impl Shape for Ellipse {
    fn path(&self, rect: Rect) -> Path {
        self.path_with_offset(rect, 0.0)
    }
}

impl OffsetableShape for Ellipse {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        if rect.is_degenerate() {
            return Path::new();
        }
        let radii = rect.size() * 0.5 + DVec2::splat(offset);
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return Path::new();
        }
        ellipse_path(rect.center(), radii)
    }
}

/// The bounding rectangle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle;

impl Shape for Rectangle {
    fn path(&self, rect: Rect) -> Path {
        self.path_with_offset(rect, 0.0)
    }
}

impl OffsetableShape for Rectangle {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        if rect.is_degenerate() {
            return Path::new();
        }
        let rect = rect.expand(offset);
        if rect.is_degenerate() {
            return Path::new();
        }
        rect_path(rect)
    }
}

/// The bounding rectangle with rounded corners.
///
/// The corner radius resolves against the shorter rect side and is clamped to
/// half of it. Offsets grow the rect and adjust the radius by the same signed
/// amount, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Default)]
pub struct RoundedRectangle {
    pub corner_radius: Dimension,
}

impl RoundedRectangle {
    pub fn new(corner_radius: Dimension) -> Self {
        RoundedRectangle { corner_radius }
    }
}

impl Shape for RoundedRectangle {
    fn path(&self, rect: Rect) -> Path {
        self.path_with_offset(rect, 0.0)
    }
}

impl OffsetableShape for RoundedRectangle {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        if rect.is_degenerate() {
            return Path::new();
        }
        let shorter = rect.width().min(rect.height());
        let radius = (self.corner_radius.resolve(shorter) + offset).max(0.0);
        let rect = rect.expand(offset);
        if rect.is_degenerate() {
            return Path::new();
        }
        rounded_rect_path(rect, radius)
    }
}

/// A pill: the bounding rectangle with fully rounded short ends
/// (radius `min(width, height) / 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capsule;

impl Shape for Capsule {
    fn path(&self, rect: Rect) -> Path {
        self.path_with_offset(rect, 0.0)
    }
}

impl OffsetableShape for Capsule {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        if rect.is_degenerate() {
            return Path::new();
        }
        let rect = rect.expand(offset);
        if rect.is_degenerate() {
            return Path::new();
        }
        rounded_rect_path(rect, rect.width().min(rect.height()) / 2.0)
    }
}

/// Arbitrary vector art fit to the bounding rectangle with a content mode.
///
/// The wrapped path is interpreted on a `canvas`-sized source and mapped into
/// the target rect on every [`Shape::path`] call. Not offsetable: growing an
/// arbitrary contour requires stroking math this crate does not perform.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    path: Path,
    canvas: DVec2,
    mode: ContentMode,
}

impl PathShape {
    pub fn new(path: Path, canvas: DVec2, mode: ContentMode) -> Self {
        PathShape { path, canvas, mode }
    }

    /// Parse SVG path data and wrap it as a shape.
    pub fn from_svg(data: &str, canvas: DVec2, mode: ContentMode) -> Result<Self, PathDataError> {
        Ok(Self::new(Path::from_svg(data)?, canvas, mode))
    }

    /// The wrapped path on its source canvas, untransformed.
    pub fn source_path(&self) -> &Path {
        &self.path
    }
}

impl Shape for PathShape {
    fn path(&self, rect: Rect) -> Path {
        self.path.resized(self.canvas, rect, self.mode)
    }
}

impl Hash for PathShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        state.write_u64((self.canvas.x + 0.0).to_bits());
        state.write_u64((self.canvas.y + 0.0).to_bits());
        self.mode.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    use crate::path::{FillRule, PathEl};

    const RECT: Rect = Rect {
        min: DVec2::ZERO,
        max: DVec2 { x: 200.0, y: 100.0 },
    };

    #[test]
    fn circle_is_inscribed_and_centered() {
        let path = Circle.path(RECT);
        // starts at the east point of a radius-50 circle centered at (100, 50)
        assert_eq!(path.elements()[0], PathEl::MoveTo(dvec2(150.0, 50.0)));
        assert!(path.contains(dvec2(100.0, 50.0), FillRule::NonZero));
        assert!(!path.contains(dvec2(10.0, 50.0), FillRule::NonZero));
    }

    #[test]
    fn circle_in_zero_area_rect_is_empty() {
        assert!(Circle.path(Rect::new(0.0, 0.0, 0.0, 100.0)).is_empty());
        assert!(Circle.path(Rect::new(0.0, 0.0, 100.0, 0.0)).is_empty());
    }

    #[test]
    fn circle_offset_grows_radius() {
        assert_eq!(
            Circle.path_with_offset(RECT, 10.0),
            ellipse_path(dvec2(100.0, 50.0), DVec2::splat(60.0))
        );
    }

    #[test]
    fn circle_collapsed_by_negative_offset_is_empty() {
        assert!(Circle.path_with_offset(RECT, -50.0).is_empty());
        assert!(Circle.path_with_offset(RECT, -80.0).is_empty());
    }

    #[test]
    fn zero_offset_matches_plain_path() {
        assert_eq!(Circle.path_with_offset(RECT, 0.0), Circle.path(RECT));
        assert_eq!(Ellipse.path_with_offset(RECT, 0.0), Ellipse.path(RECT));
        assert_eq!(Rectangle.path_with_offset(RECT, 0.0), Rectangle.path(RECT));
        assert_eq!(Capsule.path_with_offset(RECT, 0.0), Capsule.path(RECT));
        let rounded = RoundedRectangle::new(Dimension::Absolute(12.0));
        assert_eq!(rounded.path_with_offset(RECT, 0.0), rounded.path(RECT));
    }

    #[test]
    fn ellipse_fills_the_rect() {
        assert_eq!(
            Ellipse.path(RECT),
            ellipse_path(dvec2(100.0, 50.0), dvec2(100.0, 50.0))
        );
    }

    #[test]
    fn rectangle_offset_expands_every_edge() {
        assert_eq!(
            Rectangle.path_with_offset(RECT, 10.0),
            rect_path(RECT.expand(10.0))
        );
        assert_eq!(
            Rectangle.path_with_offset(RECT, -10.0),
            rect_path(RECT.expand(-10.0))
        );
    }

    #[test]
    fn rectangle_collapsed_by_negative_offset_is_empty() {
        assert!(Rectangle.path_with_offset(RECT, -50.0).is_empty());
    }

    #[test]
    fn rounded_rectangle_resolves_radius_against_shorter_side() {
        let relative = RoundedRectangle::new(Dimension::Relative(0.2));
        // shorter side is 100, so the radius is 20
        assert_eq!(relative.path(RECT), rounded_rect_path(RECT, 20.0));
    }

    #[test]
    fn capsule_equals_fully_clamped_rounded_rectangle() {
        let huge = RoundedRectangle::new(Dimension::Absolute(1.0e6));
        assert_eq!(Capsule.path(RECT), huge.path(RECT));
    }

    #[test]
    fn path_shape_resizes_its_source() {
        let square = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .line_to(dvec2(10.0, 0.0))
            .line_to(dvec2(10.0, 10.0))
            .line_to(dvec2(0.0, 10.0))
            .close();
        let shape = PathShape::new(square.clone(), dvec2(10.0, 10.0), ContentMode::Stretch);
        assert_eq!(
            shape.path(RECT),
            square.resized(dvec2(10.0, 10.0), RECT, ContentMode::Stretch)
        );
    }
}
