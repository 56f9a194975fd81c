//! Shape combinators: boolean composition, edge insets, and contour offsets.
//!
//! All combinators are plain immutable values over the shapes they wrap; the
//! path is computed on demand and never cached.

use std::hash::{Hash, Hasher};

use crate::path::Path;
use crate::shapes::{OffsetableShape, Shape};
use crate::types::{EdgeInsets, Rect};

/// How a [`CombinedShape`] merges its two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Concatenate both outlines unchanged. With both subpaths wound the same
    /// direction, a non-zero fill yields the union region.
    Add,
    /// Concatenate the main outline with the sub outline's winding reversed,
    /// cutting a hole where the sub region overlaps the main region.
    Difference,
}

/// Boolean composition of two shapes by path concatenation.
///
/// No clipping or intersection math is performed; the fill rule does the work
/// at rendering time. Correctness of the filled result depends on the caller
/// supplying clockwise-wound outlines (the built-in primitives do). Malformed
/// winding produces a well-formed path that fills differently than intended —
/// a documented caller contract, not a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub struct CombinedShape<M, S> {
    pub main: M,
    pub sub: S,
    pub mode: CombineMode,
}

impl<M, S> CombinedShape<M, S> {
    pub fn new(main: M, sub: S, mode: CombineMode) -> Self {
        CombinedShape { main, sub, mode }
    }
}

impl<M: Shape, S: Shape> Shape for CombinedShape<M, S> {
    fn path(&self, rect: Rect) -> Path {
        let mut path = self.main.path(rect);
        match self.mode {
            CombineMode::Add => path.append(self.sub.path(rect)),
            CombineMode::Difference => path.append(self.sub.path(rect).reversed()),
        }
        path
    }
}

impl<M: OffsetableShape, S: OffsetableShape> OffsetableShape for CombinedShape<M, S> {
    /// The offset is forwarded unchanged to both operands.
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        let mut path = self.main.path_with_offset(rect, offset);
        match self.mode {
            CombineMode::Add => path.append(self.sub.path_with_offset(rect, offset)),
            CombineMode::Difference => {
                path.append(self.sub.path_with_offset(rect, offset).reversed())
            }
        }
        path
    }
}

/// Shrinks the bounding rectangle by per-edge insets before delegating to the
/// wrapped shape.
#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub struct InsetShape<S> {
    shape: S,
    insets: EdgeInsets,
    /// All-zero insets skip rectangle resolution entirely.
    zero: bool,
}

impl<S> InsetShape<S> {
    pub fn new(shape: S, insets: EdgeInsets) -> Self {
        let zero = insets.is_zero();
        InsetShape {
            shape,
            insets,
            zero,
        }
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }
}

impl<S: Shape> Shape for InsetShape<S> {
    fn path(&self, rect: Rect) -> Path {
        if self.zero {
            self.shape.path(rect)
        } else {
            self.shape.path(rect.inset(&self.insets))
        }
    }
}

impl<S: OffsetableShape> OffsetableShape for InsetShape<S> {
    /// Insets resolve first; the offset is forwarded unchanged.
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        self.shape.path_with_offset(rect.inset(&self.insets), offset)
    }
}

/// Applies a fixed contour offset to an offsetable shape.
///
/// Offsets accumulate: `OffsetShape::new(s, a).path_with_offset(r, b)` equals
/// `s.path_with_offset(r, a + b)` regardless of nesting depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetShape<S> {
    shape: S,
    amount: f64,
}

impl<S> OffsetShape<S> {
    pub fn new(shape: S, amount: f64) -> Self {
        OffsetShape { shape, amount }
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl<S: OffsetableShape> Shape for OffsetShape<S> {
    fn path(&self, rect: Rect) -> Path {
        self.shape.path_with_offset(rect, self.amount)
    }
}

impl<S: OffsetableShape> OffsetableShape for OffsetShape<S> {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        self.shape.path_with_offset(rect, self.amount + offset)
    }
}

impl<S: Hash> Hash for OffsetShape<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
        state.write_u64((self.amount + 0.0).to_bits());
    }
}
