//! The guide surface capability consumed by the chordline marcher, and concrete bounded faces
//! which implement it.
//!
//! The marcher only needs a handful of queries from a geometry kernel: surface parameters for a
//! point, evaluation of points and normals, a containment test, a planar slice, and the nearest
//! point on the boundary. Anything able to answer them, such as a binding to a CAD kernel's face
//! type, can be marched over.

mod face;
mod mapping;

use crate::{Point3, Result, SlicePlane, UnitVec3};

pub use face::{BoundedFace, rectangle_outline};
pub use mapping::{CylinderMapping, FaceMapping, PlaneMapping};

pub trait Surface {
    /// The surface parameters (u, v) of the point on the unbounded surface nearest to `point`.
    /// The parameters are not clamped to the face's domain.
    fn parameterize(&self, point: &Point3) -> (f64, f64);

    /// The point on the surface at parameters (u, v)
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// The unit surface normal at parameters (u, v)
    fn normal_at(&self, u: f64, v: f64) -> UnitVec3;

    /// Returns true if `point` lies on the bounded face, within `tol`.
    fn contains(&self, point: &Point3, tol: f64) -> bool;

    /// Intersect the face with a finite cutting plane, returning the two end points of the
    /// intersection. Fails with `WingError::SectionGeometry` if the intersection is anything but
    /// exactly two points.
    fn intersect_with_plane(&self, plane: &SlicePlane) -> Result<(Point3, Point3)>;

    /// The closest point to `point` on the face's boundary edges.
    fn nearest_boundary_point(&self, point: &Point3) -> Point3;

    /// The length of the diagonal of the face's bounding box.
    fn bounding_diagonal_length(&self) -> f64;

    /// Move a point onto the surface, returning the surface point and the normal there.
    fn project(&self, point: &Point3) -> (Point3, UnitVec3) {
        let (u, v) = self.parameterize(point);
        (self.point_at(u, v), self.normal_at(u, v))
    }
}
