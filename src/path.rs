//! Vector path values: ordered move/line/curve/close elements.
//!
//! `Path` is the output of every [`Shape`](crate::shapes::Shape): a plain
//! list of elements in drawing order, with no retained-mode state. Winding is
//! whatever the producer emitted; the combinators in [`combine`](crate::combine)
//! rely on the built-in primitives' clockwise (y-down) convention.

use std::hash::{Hash, Hasher};

use glam::{DVec2, dvec2};

use crate::log::warn;
use crate::types::Rect;

/// A single path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEl {
    /// Start a new subpath at the point.
    MoveTo(DVec2),
    /// Straight segment to the point.
    LineTo(DVec2),
    /// Quadratic Bezier: control point, then endpoint.
    QuadTo(DVec2, DVec2),
    /// Cubic Bezier: two control points, then endpoint.
    CurveTo(DVec2, DVec2, DVec2),
    /// Close the current subpath back to its start point.
    Close,
}

impl Hash for PathEl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn point<H: Hasher>(p: DVec2, state: &mut H) {
            // -0.0 and 0.0 compare equal; normalize before taking bits
            state.write_u64((p.x + 0.0).to_bits());
            state.write_u64((p.y + 0.0).to_bits());
        }
        match *self {
            PathEl::MoveTo(p) => {
                state.write_u8(0);
                point(p, state);
            }
            PathEl::LineTo(p) => {
                state.write_u8(1);
                point(p, state);
            }
            PathEl::QuadTo(c, p) => {
                state.write_u8(2);
                point(c, state);
                point(p, state);
            }
            PathEl::CurveTo(c1, c2, p) => {
                state.write_u8(3);
                point(c1, state);
                point(c2, state);
                point(p, state);
            }
            PathEl::Close => state.write_u8(4),
        }
    }
}

/// Fill rule deciding which regions of a compound path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Non-zero winding number counts as inside.
    #[default]
    NonZero,
    /// Odd crossing count counts as inside.
    EvenOdd,
}

/// Policy for fitting a source canvas into a destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Uniform scale covering the destination; may overflow on one axis.
    AspectFill,
    /// Uniform scale contained by the destination, centered.
    AspectFit,
    /// Independent per-axis scale; aspect ratio not preserved.
    Stretch,
}

/// An immutable-once-built vector path.
#[derive(Debug, Clone, PartialEq, Hash, Default)]
pub struct Path {
    elements: Vec<PathEl>,
}

/// Distance a curve control point may sit from its chord before the curve is
/// subdivided for containment testing.
const FLATTEN_TOLERANCE: f64 = 0.1;
const MAX_FLATTEN_DEPTH: u32 = 16;

impl Path {
    pub fn new() -> Path {
        Path::default()
    }

    /// Append a raw element.
    pub fn push(&mut self, el: PathEl) {
        self.elements.push(el);
    }

    pub fn move_to(mut self, p: DVec2) -> Self {
        self.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: DVec2) -> Self {
        self.push(PathEl::LineTo(p));
        self
    }

    pub fn quad_to(mut self, c: DVec2, p: DVec2) -> Self {
        self.push(PathEl::QuadTo(c, p));
        self
    }

    pub fn curve_to(mut self, c1: DVec2, c2: DVec2, p: DVec2) -> Self {
        self.push(PathEl::CurveTo(c1, c2, p));
        self
    }

    pub fn close(mut self) -> Self {
        self.push(PathEl::Close);
        self
    }

    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Concatenate `other` onto the end of this path, keeping its elements
    /// unchanged. Subpath structure is preserved: the first `MoveTo` of
    /// `other` starts a fresh subpath.
    pub fn append(&mut self, other: Path) {
        self.elements.extend(other.elements);
    }

    /// The path with every subpath's winding direction reversed.
    ///
    /// Control points are swapped so each segment is traversed backwards;
    /// closed subpaths stay closed. Reversal is an involution: reversing
    /// twice yields the original element list.
    pub fn reversed(&self) -> Path {
        let mut out = Path::new();
        let mut pts: Vec<DVec2> = vec![DVec2::ZERO];
        let mut segs: Vec<Seg> = Vec::new();
        let mut open = false;

        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) => {
                    if open {
                        reverse_subpath(&mut out, &pts, &segs, false);
                    }
                    pts.clear();
                    pts.push(p);
                    segs.clear();
                    open = true;
                }
                PathEl::LineTo(p) => {
                    segs.push(Seg::Line);
                    pts.push(p);
                    open = true;
                }
                PathEl::QuadTo(c, p) => {
                    segs.push(Seg::Quad(c));
                    pts.push(p);
                    open = true;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    segs.push(Seg::Cubic(c1, c2));
                    pts.push(p);
                    open = true;
                }
                PathEl::Close => {
                    reverse_subpath(&mut out, &pts, &segs, true);
                    // a segment after a close continues from the subpath start
                    let start = pts[0];
                    pts.clear();
                    pts.push(start);
                    segs.clear();
                    open = false;
                }
            }
        }
        if open {
            reverse_subpath(&mut out, &pts, &segs, false);
        }
        out
    }

    /// Bounding box over all on-curve and control points, or `None` for the
    /// empty path. Conservative: control points may lie outside the drawn
    /// curve.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = dvec2(f64::MAX, f64::MAX);
        let mut max = dvec2(f64::MIN, f64::MIN);
        let mut any = false;
        let mut expand = |p: DVec2| {
            min = min.min(p);
            max = max.max(p);
            any = true;
        };
        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => expand(p),
                PathEl::QuadTo(c, p) => {
                    expand(c);
                    expand(p);
                }
                PathEl::CurveTo(c1, c2, p) => {
                    expand(c1);
                    expand(c2);
                    expand(p);
                }
                PathEl::Close => {}
            }
        }
        any.then_some(Rect { min, max })
    }

    /// Winding-number containment test. Subpaths are treated as implicitly
    /// closed, as they are when filled.
    pub fn contains(&self, point: DVec2, rule: FillRule) -> bool {
        let w = self.winding(point);
        match rule {
            FillRule::NonZero => w != 0,
            FillRule::EvenOdd => w % 2 != 0,
        }
    }

    fn winding(&self, point: DVec2) -> i32 {
        let mut w = 0;
        let mut start = DVec2::ZERO;
        let mut cur = DVec2::ZERO;
        let mut scratch: Vec<DVec2> = Vec::new();

        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) => {
                    if cur != start {
                        w += edge_winding(cur, start, point);
                    }
                    start = p;
                    cur = p;
                }
                PathEl::LineTo(p) => {
                    w += edge_winding(cur, p, point);
                    cur = p;
                }
                PathEl::QuadTo(c, p) => {
                    scratch.clear();
                    flatten_quad(cur, c, p, 0, &mut scratch);
                    let mut a = cur;
                    for &b in &scratch {
                        w += edge_winding(a, b, point);
                        a = b;
                    }
                    cur = p;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    scratch.clear();
                    flatten_cubic(cur, c1, c2, p, 0, &mut scratch);
                    let mut a = cur;
                    for &b in &scratch {
                        w += edge_winding(a, b, point);
                        a = b;
                    }
                    cur = p;
                }
                PathEl::Close => {
                    w += edge_winding(cur, start, point);
                    cur = start;
                }
            }
        }
        if cur != start {
            w += edge_winding(cur, start, point);
        }
        w
    }

    /// Fit a path drawn on a `canvas`-sized source into `into` using the
    /// given content mode.
    ///
    /// A zero-area canvas has no defined scale; the result is the empty path.
    pub fn resized(&self, canvas: DVec2, into: Rect, mode: ContentMode) -> Path {
        if canvas.x <= 0.0 || canvas.y <= 0.0 {
            warn!(
                "degenerate source canvas ({}, {}); resize yields an empty path",
                canvas.x, canvas.y
            );
            return Path::new();
        }
        let scale = match mode {
            ContentMode::Stretch => dvec2(into.width() / canvas.x, into.height() / canvas.y),
            ContentMode::AspectFill => {
                DVec2::splat((into.width() / canvas.x).max(into.height() / canvas.y))
            }
            ContentMode::AspectFit => {
                DVec2::splat((into.width() / canvas.x).min(into.height() / canvas.y))
            }
        };
        // center the scaled canvas on the destination; for stretch this
        // degenerates to mapping the canvas origin onto the rect origin
        let offset = into.center() - canvas * 0.5 * scale;
        self.map_points(|p| p * scale + offset)
    }

    fn map_points(&self, f: impl Fn(DVec2) -> DVec2) -> Path {
        let elements = self
            .elements
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(f(p)),
                PathEl::LineTo(p) => PathEl::LineTo(f(p)),
                PathEl::QuadTo(c, p) => PathEl::QuadTo(f(c), f(p)),
                PathEl::CurveTo(c1, c2, p) => PathEl::CurveTo(f(c1), f(c2), f(p)),
                PathEl::Close => PathEl::Close,
            })
            .collect();
        Path { elements }
    }
}

impl From<Vec<PathEl>> for Path {
    fn from(elements: Vec<PathEl>) -> Path {
        Path { elements }
    }
}

/// Segment kind within one subpath; endpoints live in the parallel waypoint
/// list.
enum Seg {
    Line,
    Quad(DVec2),
    Cubic(DVec2, DVec2),
}

/// Emit one subpath reversed. `pts` holds the waypoints (`pts[0]` the start,
/// `pts[i + 1]` the endpoint of `segs[i]`).
fn reverse_subpath(out: &mut Path, pts: &[DVec2], segs: &[Seg], closed: bool) {
    let n = segs.len();
    out.push(PathEl::MoveTo(pts[n]));
    for i in (0..n).rev() {
        let to = pts[i];
        match segs[i] {
            Seg::Line => out.push(PathEl::LineTo(to)),
            Seg::Quad(c) => out.push(PathEl::QuadTo(c, to)),
            Seg::Cubic(c1, c2) => out.push(PathEl::CurveTo(c2, c1, to)),
        }
    }
    if closed {
        // the close segment becomes the reverse of the original close segment
        out.push(PathEl::Close);
    }
}

/// Winding contribution of the directed edge `a -> b` for a ray cast from
/// `point` (Sunday's crossing test).
fn edge_winding(a: DVec2, b: DVec2, point: DVec2) -> i32 {
    if a.y <= point.y {
        if b.y > point.y && (b - a).perp_dot(point - a) > 0.0 {
            return 1;
        }
    } else if b.y <= point.y && (b - a).perp_dot(point - a) < 0.0 {
        return -1;
    }
    0
}

fn line_distance(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return (point - a).length();
    }
    ab.perp_dot(point - a).abs() / len_sq.sqrt()
}

fn flatten_quad(p0: DVec2, c: DVec2, p1: DVec2, depth: u32, out: &mut Vec<DVec2>) {
    if line_distance(c, p0, p1) <= FLATTEN_TOLERANCE || depth >= MAX_FLATTEN_DEPTH {
        out.push(p1);
        return;
    }
    let ab = (p0 + c) * 0.5;
    let bc = (c + p1) * 0.5;
    let mid = (ab + bc) * 0.5;
    flatten_quad(p0, ab, mid, depth + 1, out);
    flatten_quad(mid, bc, p1, depth + 1, out);
}

fn flatten_cubic(p0: DVec2, c1: DVec2, c2: DVec2, p1: DVec2, depth: u32, out: &mut Vec<DVec2>) {
    let flat = line_distance(c1, p0, p1).max(line_distance(c2, p0, p1));
    if flat <= FLATTEN_TOLERANCE || depth >= MAX_FLATTEN_DEPTH {
        out.push(p1);
        return;
    }
    let ab = (p0 + c1) * 0.5;
    let bc = (c1 + c2) * 0.5;
    let cd = (c2 + p1) * 0.5;
    let abbc = (ab + bc) * 0.5;
    let bccd = (bc + cd) * 0.5;
    let mid = (abbc + bccd) * 0.5;
    flatten_cubic(p0, ab, abbc, mid, depth + 1, out);
    flatten_cubic(mid, bccd, cd, p1, depth + 1, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Path {
        Path::new()
            .move_to(dvec2(0.0, 0.0))
            .line_to(dvec2(10.0, 0.0))
            .line_to(dvec2(10.0, 10.0))
            .line_to(dvec2(0.0, 10.0))
            .close()
    }

    #[test]
    fn builder_collects_elements() {
        let path = Path::new()
            .move_to(dvec2(1.0, 2.0))
            .line_to(dvec2(3.0, 4.0))
            .close();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(dvec2(1.0, 2.0)),
                PathEl::LineTo(dvec2(3.0, 4.0)),
                PathEl::Close,
            ]
        );
    }

    #[test]
    fn append_concatenates_unchanged() {
        let mut path = Path::new().move_to(dvec2(0.0, 0.0)).line_to(dvec2(1.0, 0.0));
        let tail = Path::new().move_to(dvec2(5.0, 5.0)).close();
        path.append(tail.clone());
        assert_eq!(path.len(), 4);
        assert_eq!(&path.elements()[2..], tail.elements());
    }

    #[test]
    fn reversed_open_polyline() {
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .line_to(dvec2(10.0, 0.0))
            .line_to(dvec2(10.0, 5.0));
        let expected = Path::new()
            .move_to(dvec2(10.0, 5.0))
            .line_to(dvec2(10.0, 0.0))
            .line_to(dvec2(0.0, 0.0));
        assert_eq!(path.reversed(), expected);
    }

    #[test]
    fn reversed_closed_subpath_stays_closed() {
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .line_to(dvec2(10.0, 0.0))
            .line_to(dvec2(10.0, 10.0))
            .close();
        let expected = Path::new()
            .move_to(dvec2(10.0, 10.0))
            .line_to(dvec2(10.0, 0.0))
            .line_to(dvec2(0.0, 0.0))
            .close();
        assert_eq!(path.reversed(), expected);
    }

    #[test]
    fn reversed_swaps_cubic_controls() {
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .curve_to(dvec2(0.0, 10.0), dvec2(10.0, 10.0), dvec2(10.0, 0.0));
        let expected = Path::new()
            .move_to(dvec2(10.0, 0.0))
            .curve_to(dvec2(10.0, 10.0), dvec2(0.0, 10.0), dvec2(0.0, 0.0));
        assert_eq!(path.reversed(), expected);
    }

    #[test]
    fn reversed_keeps_quad_control() {
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .quad_to(dvec2(5.0, 10.0), dvec2(10.0, 0.0));
        let expected = Path::new()
            .move_to(dvec2(10.0, 0.0))
            .quad_to(dvec2(5.0, 10.0), dvec2(0.0, 0.0));
        assert_eq!(path.reversed(), expected);
    }

    #[test]
    fn reversal_is_an_involution() {
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .line_to(dvec2(10.0, 0.0))
            .curve_to(dvec2(12.0, 3.0), dvec2(12.0, 7.0), dvec2(10.0, 10.0))
            .close()
            .move_to(dvec2(20.0, 20.0))
            .quad_to(dvec2(25.0, 30.0), dvec2(30.0, 20.0));
        assert_eq!(path.reversed().reversed(), path);
    }

    #[test]
    fn bounds_cover_control_points() {
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .quad_to(dvec2(5.0, 20.0), dvec2(10.0, 0.0));
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds.min, dvec2(0.0, 0.0));
        assert_eq!(bounds.max, dvec2(10.0, 20.0));
    }

    #[test]
    fn bounds_of_empty_path_is_none() {
        assert!(Path::new().bounds().is_none());
    }

    #[test]
    fn contains_square_interior() {
        let path = unit_square();
        assert!(path.contains(dvec2(5.0, 5.0), FillRule::NonZero));
        assert!(path.contains(dvec2(5.0, 5.0), FillRule::EvenOdd));
        assert!(!path.contains(dvec2(15.0, 5.0), FillRule::NonZero));
        assert!(!path.contains(dvec2(15.0, 5.0), FillRule::EvenOdd));
    }

    #[test]
    fn fill_rules_disagree_on_same_winding_overlap() {
        // two same-winding squares; the overlap winds twice
        let mut path = unit_square();
        let base = unit_square();
        let mut shifted = Path::new();
        for el in base.elements() {
            shifted.push(match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(p + dvec2(5.0, 0.0)),
                PathEl::LineTo(p) => PathEl::LineTo(p + dvec2(5.0, 0.0)),
                other => other,
            });
        }
        path.append(shifted);
        let overlap = dvec2(7.5, 5.0);
        assert!(path.contains(overlap, FillRule::NonZero));
        assert!(!path.contains(overlap, FillRule::EvenOdd));
    }

    #[test]
    fn contains_region_under_quad() {
        // quad arch over the baseline, implicitly closed
        let path = Path::new()
            .move_to(dvec2(0.0, 0.0))
            .quad_to(dvec2(5.0, 10.0), dvec2(10.0, 0.0));
        assert!(path.contains(dvec2(5.0, 2.0), FillRule::NonZero));
        assert!(!path.contains(dvec2(5.0, 6.0), FillRule::NonZero));
    }

    #[test]
    fn resized_stretch_maps_corners() {
        let path = unit_square().resized(
            dvec2(10.0, 10.0),
            Rect::new(0.0, 0.0, 40.0, 20.0),
            ContentMode::Stretch,
        );
        assert_eq!(path.elements()[0], PathEl::MoveTo(dvec2(0.0, 0.0)));
        assert_eq!(path.elements()[2], PathEl::LineTo(dvec2(40.0, 20.0)));
    }

    #[test]
    fn resized_aspect_fit_centers() {
        let path = unit_square().resized(
            dvec2(10.0, 10.0),
            Rect::new(0.0, 0.0, 40.0, 20.0),
            ContentMode::AspectFit,
        );
        // uniform scale 2, centered horizontally
        assert_eq!(path.elements()[0], PathEl::MoveTo(dvec2(10.0, 0.0)));
        assert_eq!(path.elements()[2], PathEl::LineTo(dvec2(30.0, 20.0)));
    }

    #[test]
    fn resized_aspect_fill_overflows_one_axis() {
        let path = unit_square().resized(
            dvec2(10.0, 10.0),
            Rect::new(0.0, 0.0, 40.0, 20.0),
            ContentMode::AspectFill,
        );
        // uniform scale 4; 40x40 result centered on a 40x20 destination
        assert_eq!(path.elements()[0], PathEl::MoveTo(dvec2(0.0, -10.0)));
        assert_eq!(path.elements()[2], PathEl::LineTo(dvec2(40.0, 30.0)));
    }

    #[test]
    fn resized_zero_area_canvas_is_empty() {
        let path = unit_square().resized(
            dvec2(0.0, 10.0),
            Rect::new(0.0, 0.0, 40.0, 20.0),
            ContentMode::Stretch,
        );
        assert!(path.is_empty());
    }
}
