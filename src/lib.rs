//! Composable 2D vector shapes.
//!
//! A [`Shape`] is a stateless value that resolves a bounding rectangle into a
//! vector [`Path`]. Primitives ([`Circle`], [`Ellipse`], [`Rectangle`],
//! [`RoundedRectangle`], [`Capsule`], [`PathShape`]) compose into boolean
//! unions and differences, edge-inset and contour-offset variants, and can be
//! type-erased for heterogeneous storage:
//!
//! ```
//! use contura::{Circle, FillRule, Rect, Rectangle, Shape, ShapeExt};
//! use glam::dvec2;
//!
//! // a plate with a circular hole
//! let plate = Rectangle.differencing(Circle);
//! let path = plate.path(Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! assert!(path.contains(dvec2(5.0, 5.0), FillRule::NonZero));
//! assert!(!path.contains(dvec2(100.0, 50.0), FillRule::NonZero));
//! ```
//!
//! Combination is path concatenation plus winding reversal; no clipping math
//! runs, so the filled result relies on operands emitting clockwise outlines
//! (all built-ins do). Every shape value is immutable and `path` is pure:
//! concurrent callers need no synchronization.

pub mod combine;
pub mod erase;
pub mod errors;
mod geometry;
mod log;
pub mod path;
pub mod shapes;
mod svg;
pub mod types;

pub use combine::{CombineMode, CombinedShape, InsetShape, OffsetShape};
pub use erase::{AnyOffsetableShape, AnyShape};
pub use errors::PathDataError;
pub use path::{ContentMode, FillRule, Path, PathEl};
pub use shapes::{
    Capsule, Circle, Ellipse, OffsetableShape, PathShape, Rectangle, RoundedRectangle, Shape,
    ShapeExt,
};
pub use types::{Dimension, DimensionPoint, DimensionSize, EdgeInsets, Rect};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn composed_shapes_resolve_end_to_end() {
        let badge = RoundedRectangle::new(Dimension::Absolute(8.0))
            .inset(EdgeInsets::absolute(2.0))
            .adding(Circle.offset(4.0));
        let path = badge.path(Rect::new(0.0, 0.0, 120.0, 48.0));
        assert!(!path.is_empty());
        assert!(path.contains(dvec2(60.0, 24.0), FillRule::NonZero));
    }

    #[test]
    fn erased_values_compare_across_concrete_types() {
        let shapes = [
            AnyShape::new(Circle),
            AnyShape::new(Rectangle),
            AnyShape::new(Circle),
        ];
        assert_eq!(shapes[0], shapes[2]);
        assert_ne!(shapes[0], shapes[1]);
    }
}
