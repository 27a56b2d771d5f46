//! Two-dimensional helpers for closed polygons, used for airfoil outlines and for the parameter
//! space boundaries of guide surfaces.

use parry2d_f64::query::PointQuery;
use parry2d_f64::shape::Segment;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Vector2 = parry2d_f64::na::Vector2<f64>;
pub type UnitVec2 = parry2d_f64::na::Unit<Vector2>;

/// Iterates over the edges of a closed polygon given as its vertices, without a repeated closing
/// vertex. The last edge runs from the final vertex back to the first.
pub fn polygon_edges(poly: &[Point2]) -> impl Iterator<Item = (Point2, Point2)> + '_ {
    (0..poly.len()).map(move |i| (poly[i], poly[(i + 1) % poly.len()]))
}

/// Returns true if the point lies strictly inside the closed polygon.
pub fn point_in_polygon(point: &Point2, poly: &[Point2]) -> bool {
    poly.len() >= 3 && parry2d_f64::utils::point_in_poly2d(point, poly)
}

/// Finds the closest point to `point` on the boundary of a closed polygon, returning it together
/// with its distance. Returns `None` if the polygon has no vertices.
pub fn closest_on_boundary(point: &Point2, poly: &[Point2]) -> Option<(Point2, f64)> {
    if poly.len() == 1 {
        return Some((poly[0], (poly[0] - point).norm()));
    }

    polygon_edges(poly)
        .map(|(a, b)| {
            let proj = Segment::new(a, b).project_local_point(point, true);
            (proj.point, (proj.point - point).norm())
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn orient(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b - a).perp(&(c - a))
}

fn on_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Returns true if the closed segments `a0-a1` and `b0-b1` share at least one point, including
/// touching and collinear overlap.
pub fn segments_touch(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}
