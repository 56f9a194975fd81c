//! Outline construction for the built-in shapes.
//!
//! All outlines are emitted clockwise in screen coordinates (y-down); the
//! boolean combinators depend on that orientation.

use glam::{DVec2, dvec2};

use crate::path::Path;
use crate::types::Rect;

/// Cubic control-point factor for a quarter-circle arc: 4/3 * (sqrt(2) - 1).
pub(crate) const KAPPA: f64 = 0.552_284_749_830_793_6;

/// Rectangle outline: start at the top-left corner, go clockwise.
pub(crate) fn rect_path(rect: Rect) -> Path {
    Path::new()
        .move_to(rect.min)
        .line_to(dvec2(rect.max.x, rect.min.y))
        .line_to(rect.max)
        .line_to(dvec2(rect.min.x, rect.max.y))
        .close()
}

/// Ellipse outline as four cubic arcs: start at the east point, go clockwise.
pub(crate) fn ellipse_path(center: DVec2, radii: DVec2) -> Path {
    let k = radii * KAPPA;
    let east = center + dvec2(radii.x, 0.0);
    let south = center + dvec2(0.0, radii.y);
    let west = center - dvec2(radii.x, 0.0);
    let north = center - dvec2(0.0, radii.y);
    Path::new()
        .move_to(east)
        .curve_to(
            dvec2(east.x, center.y + k.y),
            dvec2(center.x + k.x, south.y),
            south,
        )
        .curve_to(
            dvec2(center.x - k.x, south.y),
            dvec2(west.x, center.y + k.y),
            west,
        )
        .curve_to(
            dvec2(west.x, center.y - k.y),
            dvec2(center.x - k.x, north.y),
            north,
        )
        .curve_to(
            dvec2(center.x + k.x, north.y),
            dvec2(east.x, center.y - k.y),
            east,
        )
        .close()
}

/// Rounded rectangle outline with cubic corner arcs, clockwise from the top
/// edge. The radius is clamped to half the shorter side; a non-positive
/// radius degrades to the plain rectangle.
///
/// Straight edges are only emitted when they have positive length, so a
/// fully-rounded rect (radius == half the shorter side) contains no
/// zero-length segments.
pub(crate) fn rounded_rect_path(rect: Rect, radius: f64) -> Path {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if r <= 0.0 {
        return rect_path(rect);
    }
    let kr = KAPPA * r;
    let (x1, y1) = (rect.min.x, rect.min.y);
    let (x2, y2) = (rect.max.x, rect.max.y);
    let (xi1, xi2) = (x1 + r, x2 - r);
    let (yi1, yi2) = (y1 + r, y2 - r);

    let mut path = Path::new().move_to(dvec2(xi1, y1));
    if xi2 > xi1 {
        path = path.line_to(dvec2(xi2, y1));
    }
    path = path.curve_to(dvec2(xi2 + kr, y1), dvec2(x2, yi1 - kr), dvec2(x2, yi1));
    if yi2 > yi1 {
        path = path.line_to(dvec2(x2, yi2));
    }
    path = path.curve_to(dvec2(x2, yi2 + kr), dvec2(xi2 + kr, y2), dvec2(xi2, y2));
    if xi2 > xi1 {
        path = path.line_to(dvec2(xi1, y2));
    }
    path = path.curve_to(dvec2(xi1 - kr, y2), dvec2(x1, yi2 + kr), dvec2(x1, yi2));
    if yi2 > yi1 {
        path = path.line_to(dvec2(x1, yi1));
    }
    path = path.curve_to(dvec2(x1, yi1 - kr), dvec2(xi1 - kr, y1), dvec2(xi1, y1));
    path.close()
}
