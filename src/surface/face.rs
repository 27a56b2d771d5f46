use super::{FaceMapping, PlaneMapping, Surface};
use crate::common::linear_space;
use crate::common::points::{coincident, dist};
use crate::geom2::{closest_on_boundary, point_in_polygon, polygon_edges, Point2};
use crate::geom3::Aabb3;
use crate::{Point3, Result, SlicePlane, UnitVec3, Vector3, WingError};

/// Relative tolerance, scaled by the face size, under which a signed distance counts as zero.
const ROOT_TOL: f64 = 1e-10;

/// Relative tolerance, scaled by the face size, under which two intersection points are merged.
const MERGE_TOL: f64 = 1e-8;

const BISECTION_STEPS: usize = 64;

/// The closed outline of a `width` by `height` rectangle in parameter space, with a corner at the
/// origin.
pub fn rectangle_outline(width: f64, height: f64) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(width, 0.0),
        Point2::new(width, height),
        Point2::new(0.0, height),
    ]
}

/// A face made of an unbounded parametric surface trimmed by a closed polygon in parameter space.
#[derive(Debug, Clone)]
pub struct BoundedFace<M: FaceMapping> {
    mapping: M,
    boundary: Vec<Point2>,
    diagonal: f64,
}

impl<M: FaceMapping> BoundedFace<M> {
    /// Create a face from a mapping and the parameter space boundary polygon. The polygon may
    /// repeat its first point at the end, and needs at least 3 distinct vertices.
    pub fn new(mapping: M, boundary: Vec<Point2>) -> Result<Self> {
        let mut boundary = boundary;
        if boundary.len() > 1 && boundary.first() == boundary.last() {
            boundary.pop();
        }
        if boundary.len() < 3 {
            return Err(WingError::InvalidParameter(format!(
                "a face boundary needs at least 3 vertices, got {}",
                boundary.len()
            )));
        }

        let diagonal = boundary_diagonal(&mapping, &boundary);
        Ok(Self {
            mapping,
            boundary,
            diagonal,
        })
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    /// The parameter space boundary, without a repeated closing vertex.
    pub fn boundary(&self) -> &[Point2] {
        &self.boundary
    }

    fn at(&self, uv: &Point2) -> Point3 {
        self.mapping.point_at(uv.x, uv.y)
    }

    /// Finds the parameters along the boundary where the signed distance to the slice plane
    /// changes sign or vanishes. An edge lying in the plane contributes only its end points.
    fn boundary_crossings(&self, slice: &SlicePlane) -> Vec<Point3> {
        let zero_tol = ROOT_TOL * (1.0 + self.diagonal);
        let plane = slice.plane();
        let g = |uv: &Point2| plane.signed_distance_to_point(&self.at(uv));
        let n = self.mapping.edge_samples().max(1);
        let ts = linear_space(0.0, 1.0, n + 1);

        let mut hits = Vec::new();
        for (a, b) in polygon_edges(&self.boundary) {
            let along = |t: f64| a + (b - a) * t;
            let values = ts.iter().map(|t| g(&along(*t))).collect::<Vec<_>>();
            let zero = values.iter().map(|v| v.abs() <= zero_tol).collect::<Vec<_>>();

            for k in 0..n {
                if zero[k] {
                    let inside_run = k > 0 && zero[k - 1] && zero[k + 1];
                    if !inside_run {
                        hits.push(self.at(&along(ts[k])));
                    }
                    continue;
                }

                if !zero[k + 1] && values[k].signum() != values[k + 1].signum() {
                    let t = bisect(|t| g(&along(t)), ts[k], ts[k + 1], values[k]);
                    hits.push(self.at(&along(t)));
                }
            }
        }

        hits
    }
}

impl BoundedFace<PlaneMapping> {
    /// A flat `width` by `height` rectangle with one corner at `origin` and its sides along
    /// `u_dir` and `v_dir`.
    pub fn rectangle(
        origin: Point3,
        u_dir: Vector3,
        v_dir: Vector3,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(WingError::InvalidParameter(format!(
                "rectangle sides must be positive, got {width} x {height}"
            )));
        }
        let mapping = PlaneMapping::new(origin, u_dir, v_dir)?;
        Self::new(mapping, rectangle_outline(width, height))
    }

    /// A flat face bounded by an arbitrary simple polygon given in the plane's (u, v) coordinates.
    pub fn planar(mapping: PlaneMapping, outline: Vec<Point2>) -> Result<Self> {
        Self::new(mapping, outline)
    }
}

impl<M: FaceMapping> Surface for BoundedFace<M> {
    fn parameterize(&self, point: &Point3) -> (f64, f64) {
        let uv = self.mapping.parameterize(point);
        (uv.x, uv.y)
    }

    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.mapping.point_at(u, v)
    }

    fn normal_at(&self, u: f64, v: f64) -> UnitVec3 {
        self.mapping.normal_at(u, v)
    }

    fn contains(&self, point: &Point3, tol: f64) -> bool {
        let uv = self.mapping.parameterize(point);
        if dist(&self.at(&uv), point) > tol {
            return false;
        }

        point_in_polygon(&uv, &self.boundary)
            || closest_on_boundary(&uv, &self.boundary).is_some_and(|(_, d)| d <= tol)
    }

    fn intersect_with_plane(&self, plane: &SlicePlane) -> Result<(Point3, Point3)> {
        let merge_tol = MERGE_TOL * (1.0 + self.diagonal);
        let mut points: Vec<Point3> = Vec::new();
        for p in self.boundary_crossings(plane) {
            if !plane.within_extent(&p, merge_tol) {
                continue;
            }
            if !points.iter().any(|q| coincident(q, &p, merge_tol)) {
                points.push(p);
            }
        }

        match points.as_slice() {
            [a, b] => Ok((*a, *b)),
            _ => Err(WingError::SectionGeometry(format!(
                "the slice through {:?} produced {} boundary points instead of 2",
                plane.center,
                points.len()
            ))),
        }
    }

    fn nearest_boundary_point(&self, point: &Point3) -> Point3 {
        let uv = self.mapping.parameterize(point);
        match closest_on_boundary(&uv, &self.boundary) {
            Some((closest, _)) => self.at(&closest),
            None => *point,
        }
    }

    fn bounding_diagonal_length(&self) -> f64 {
        self.diagonal
    }
}

/// Root of `f` in `[t0, t1]`, given that `f(t0) = f0` and `f` changes sign over the interval.
fn bisect<F: Fn(f64) -> f64>(f: F, t0: f64, t1: f64, f0: f64) -> f64 {
    let (mut lo, mut hi) = (t0, t1);
    let lo_sign = f0.signum();
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        let fm = f(mid);
        if fm == 0.0 {
            return mid;
        }
        if fm.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

fn boundary_diagonal<M: FaceMapping>(mapping: &M, boundary: &[Point2]) -> f64 {
    let ts = linear_space(0.0, 1.0, mapping.edge_samples().max(8) + 1);
    let mut points = polygon_edges(boundary)
        .flat_map(|(a, b)| ts.iter().map(move |t| a + (b - a) * *t).collect::<Vec<_>>())
        .map(|uv| mapping.point_at(uv.x, uv.y));

    let Some(first) = points.next() else {
        return 0.0;
    };
    let (mins, maxs) = points.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)));
    let aabb = Aabb3::new(mins, maxs);
    aabb.extents().norm()
}
