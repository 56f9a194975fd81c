//! Type-erased shape wrappers for heterogeneous storage.
//!
//! `AnyShape` boxes a concrete shape behind an object-safe trait together
//! with a hashable projection (type identity plus the value's own hash,
//! folded once at construction). Equality compares the projection first and
//! confirms by downcast, so erased values of different concrete types are
//! simply unequal rather than ill-typed.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::path::Path;
use crate::shapes::{OffsetableShape, Shape};
use crate::types::Rect;

/// Fold a shape value into its hashable projection.
fn projection<S: Hash + Any>(shape: &S) -> u64 {
    let mut hasher = DefaultHasher::new();
    TypeId::of::<S>().hash(&mut hasher);
    shape.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// AnyShape
// ============================================================================

pub(crate) trait DynShape: Any {
    fn dyn_path(&self, rect: Rect) -> Path;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
    fn clone_box(&self) -> Box<dyn DynShape>;
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<S> DynShape for S
where
    S: Shape + PartialEq + Clone + Any,
{
    fn dyn_path(&self, rect: Rect) -> Path {
        self.path(rect)
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<S>().is_some_and(|other| self == other)
    }

    fn clone_box(&self) -> Box<dyn DynShape> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<S>()
    }
}

/// A type-erased [`Shape`] that is comparable and hashable across concrete
/// shape types.
pub struct AnyShape {
    key: u64,
    inner: Box<dyn DynShape>,
}

impl AnyShape {
    /// Erase a concrete shape.
    ///
    /// Erasing an already-erased value unwraps it: the original box and
    /// projection are reused, never nested.
    pub fn new<S>(shape: S) -> AnyShape
    where
        S: Shape + PartialEq + Hash + Clone + Any,
    {
        let shape: Box<dyn Any> = Box::new(shape);
        match shape.downcast::<AnyShape>() {
            Ok(wrapped) => *wrapped,
            Err(shape) => {
                let shape = *shape.downcast::<S>().expect("box was built from an S");
                AnyShape {
                    key: projection(&shape),
                    inner: Box::new(shape),
                }
            }
        }
    }

    /// Borrow the wrapped concrete shape, if it has type `S`.
    pub fn downcast_ref<S: Any>(&self) -> Option<&S> {
        self.inner.as_any().downcast_ref()
    }
}

impl Shape for AnyShape {
    fn path(&self, rect: Rect) -> Path {
        self.inner.dyn_path(rect)
    }
}

impl PartialEq for AnyShape {
    fn eq(&self, other: &AnyShape) -> bool {
        self.key == other.key && self.inner.dyn_eq(other.inner.as_any())
    }
}

// Shapes holding NaN fields are never equal to themselves; do not store such
// values in hashed collections.
impl Eq for AnyShape {}

impl Hash for AnyShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.key);
    }
}

impl Clone for AnyShape {
    fn clone(&self) -> AnyShape {
        AnyShape {
            key: self.key,
            inner: self.inner.clone_box(),
        }
    }
}

impl fmt::Debug for AnyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyShape")
            .field(&self.inner.type_name())
            .finish()
    }
}

// ============================================================================
// AnyOffsetableShape
// ============================================================================

pub(crate) trait DynOffsetableShape: Any {
    fn dyn_path(&self, rect: Rect) -> Path;
    fn dyn_path_with_offset(&self, rect: Rect, offset: f64) -> Path;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
    fn clone_box(&self) -> Box<dyn DynOffsetableShape>;
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<S> DynOffsetableShape for S
where
    S: OffsetableShape + PartialEq + Clone + Any,
{
    fn dyn_path(&self, rect: Rect) -> Path {
        self.path(rect)
    }

    fn dyn_path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        self.path_with_offset(rect, offset)
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<S>().is_some_and(|other| self == other)
    }

    fn clone_box(&self) -> Box<dyn DynOffsetableShape> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<S>()
    }
}

/// A type-erased [`OffsetableShape`]; otherwise identical to [`AnyShape`].
pub struct AnyOffsetableShape {
    key: u64,
    inner: Box<dyn DynOffsetableShape>,
}

impl AnyOffsetableShape {
    /// Erase a concrete offsetable shape, unwrapping already-erased values.
    pub fn new<S>(shape: S) -> AnyOffsetableShape
    where
        S: OffsetableShape + PartialEq + Hash + Clone + Any,
    {
        let shape: Box<dyn Any> = Box::new(shape);
        match shape.downcast::<AnyOffsetableShape>() {
            Ok(wrapped) => *wrapped,
            Err(shape) => {
                let shape = *shape.downcast::<S>().expect("box was built from an S");
                AnyOffsetableShape {
                    key: projection(&shape),
                    inner: Box::new(shape),
                }
            }
        }
    }

    /// Borrow the wrapped concrete shape, if it has type `S`.
    pub fn downcast_ref<S: Any>(&self) -> Option<&S> {
        self.inner.as_any().downcast_ref()
    }
}

impl Shape for AnyOffsetableShape {
    fn path(&self, rect: Rect) -> Path {
        self.inner.dyn_path(rect)
    }
}

impl OffsetableShape for AnyOffsetableShape {
    fn path_with_offset(&self, rect: Rect, offset: f64) -> Path {
        self.inner.dyn_path_with_offset(rect, offset)
    }
}

impl PartialEq for AnyOffsetableShape {
    fn eq(&self, other: &AnyOffsetableShape) -> bool {
        self.key == other.key && self.inner.dyn_eq(other.inner.as_any())
    }
}

impl Eq for AnyOffsetableShape {}

impl Hash for AnyOffsetableShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.key);
    }
}

impl Clone for AnyOffsetableShape {
    fn clone(&self) -> AnyOffsetableShape {
        AnyOffsetableShape {
            key: self.key,
            inner: self.inner.clone_box(),
        }
    }
}

impl fmt::Debug for AnyOffsetableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyOffsetableShape")
            .field(&self.inner.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::shapes::{Circle, Rectangle, RoundedRectangle, ShapeExt};
    use crate::types::Dimension;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 100.0)
    }

    #[test]
    fn erased_shape_produces_the_same_path() {
        assert_eq!(AnyShape::new(Circle).path(rect()), Circle.path(rect()));
    }

    #[test]
    fn double_erasure_unwraps_to_the_concrete_value() {
        let once = AnyShape::new(Circle);
        let twice = AnyShape::new(once.clone());
        assert!(twice.downcast_ref::<Circle>().is_some());
        assert!(twice.downcast_ref::<AnyShape>().is_none());
        assert_eq!(once, twice);
    }

    #[test]
    fn equality_distinguishes_concrete_types() {
        assert_ne!(AnyShape::new(Circle), AnyShape::new(Rectangle));
        let a = RoundedRectangle::new(Dimension::Absolute(4.0));
        let b = RoundedRectangle::new(Dimension::Absolute(4.0));
        let c = RoundedRectangle::new(Dimension::Absolute(5.0));
        assert_eq!(AnyShape::new(a), AnyShape::new(b));
        assert_ne!(AnyShape::new(a), AnyShape::new(c));
    }

    #[test]
    fn erased_shapes_work_in_hashed_collections() {
        let mut set = HashSet::new();
        set.insert(AnyShape::new(Circle));
        set.insert(AnyShape::new(Rectangle));
        set.insert(AnyShape::new(Circle)); // duplicate
        assert_eq!(set.len(), 2);
        assert!(set.contains(&AnyShape::new(Circle)));
    }

    #[test]
    fn projection_is_stable_across_clones() {
        let erased = AnyShape::new(RoundedRectangle::new(Dimension::Relative(0.25)));
        let clone = erased.clone();
        assert_eq!(erased.key, clone.key);
        assert_eq!(erased, clone);
    }

    #[test]
    fn ext_method_erases() {
        let erased = Circle.erased();
        assert!(erased.downcast_ref::<Circle>().is_some());
    }

    #[test]
    fn erased_offsetable_forwards_offsets() {
        let erased = AnyOffsetableShape::new(Circle);
        assert_eq!(
            erased.path_with_offset(rect(), 5.0),
            Circle.path_with_offset(rect(), 5.0)
        );
        assert_eq!(erased.path(rect()), Circle.path(rect()));
    }

    #[test]
    fn double_erasure_of_offsetable_unwraps() {
        let once = AnyOffsetableShape::new(Circle);
        let twice = AnyOffsetableShape::new(once.clone());
        assert!(twice.downcast_ref::<Circle>().is_some());
        assert!(twice.downcast_ref::<AnyOffsetableShape>().is_none());
        assert_eq!(once, twice);
    }
}
