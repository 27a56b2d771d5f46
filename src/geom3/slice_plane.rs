use super::Plane3;
use crate::{Point3, UnitVec3};

/// A finite square cutting plane. The square is centered on `center`, lies in the plane with
/// unit normal `normal`, and has its sides aligned with the in-plane axes `x_axis` and `z_axis`.
#[derive(Debug, Clone)]
pub struct SlicePlane {
    pub center: Point3,
    pub normal: UnitVec3,
    pub x_axis: UnitVec3,
    pub z_axis: UnitVec3,
    pub size: f64,
}

impl SlicePlane {
    pub fn new(
        center: Point3,
        normal: UnitVec3,
        x_axis: UnitVec3,
        z_axis: UnitVec3,
        size: f64,
    ) -> Self {
        Self {
            center,
            normal,
            x_axis,
            z_axis,
            size,
        }
    }

    /// The infinite plane this square lies in.
    pub fn plane(&self) -> Plane3 {
        Plane3::from((&self.normal, &self.center))
    }

    /// Returns true if the projection of `point` onto the plane falls within the square, grown
    /// by `tol` on every side.
    pub fn within_extent(&self, point: &Point3, tol: f64) -> bool {
        let half = self.size * 0.5 + tol;
        let rel = point - self.center;
        self.x_axis.dot(&rel).abs() <= half && self.z_axis.dot(&rel).abs() <= half
    }
}
