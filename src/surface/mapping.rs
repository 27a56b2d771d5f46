use crate::geom2::Point2;
use crate::geom3::{reject_normalized, try_normalize};
use crate::{Point3, Result, UnitVec3, Vector3, WingError};

/// An unbounded parametric surface, mapping (u, v) parameters to points in 3D space.
pub trait FaceMapping {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    fn normal_at(&self, u: f64, v: f64) -> UnitVec3;

    /// The parameters of the surface point closest to `point`.
    fn parameterize(&self, point: &Point3) -> Point2;

    /// The number of intervals each straight parameter-space boundary edge is split into when
    /// looking for plane crossings. Mappings which are affine along straight parameter lines only
    /// need one.
    fn edge_samples(&self) -> usize {
        1
    }
}

/// A flat surface spanned by two orthonormal axes through an origin.
#[derive(Debug, Clone)]
pub struct PlaneMapping {
    origin: Point3,
    u_axis: UnitVec3,
    v_axis: UnitVec3,
    normal: UnitVec3,
}

impl PlaneMapping {
    /// Create a plane mapping. The `v_dir` vector is made orthogonal to `u_dir`, and the surface
    /// normal is `u x v`.
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        let u_axis = try_normalize(&u_dir, "plane u axis")?;
        let v_axis = reject_normalized(&v_dir, &u_axis, "plane v axis")?;
        let normal = UnitVec3::new_normalize(u_axis.cross(v_axis.as_ref()));
        Ok(Self {
            origin,
            u_axis,
            v_axis,
            normal,
        })
    }
}

impl FaceMapping for PlaneMapping {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u_axis.as_ref() * u + self.v_axis.as_ref() * v
    }

    fn normal_at(&self, _u: f64, _v: f64) -> UnitVec3 {
        self.normal
    }

    fn parameterize(&self, point: &Point3) -> Point2 {
        let q = point - self.origin;
        Point2::new(self.u_axis.dot(&q), self.v_axis.dot(&q))
    }
}

/// A circular cylinder parameterized by the distance `u` along its axis and the arc length `v`
/// around it. At `v = 0` the surface passes through `origin` heading along `tangent`, and it
/// curves towards `axis x tangent`. Since the parameterization is by arc length, distances in
/// parameter space are distances on the surface.
#[derive(Debug, Clone)]
pub struct CylinderMapping {
    origin: Point3,
    axis: UnitVec3,
    tangent: UnitVec3,
    bend: UnitVec3,
    radius: f64,
}

impl CylinderMapping {
    pub fn new(origin: Point3, axis: Vector3, tangent: Vector3, radius: f64) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(WingError::InvalidParameter(format!(
                "cylinder radius must be positive, got {radius}"
            )));
        }
        let axis = try_normalize(&axis, "cylinder axis")?;
        let tangent = reject_normalized(&tangent, &axis, "cylinder tangent")?;
        let bend = UnitVec3::new_normalize(axis.cross(tangent.as_ref()));
        Ok(Self {
            origin,
            axis,
            tangent,
            bend,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl FaceMapping for CylinderMapping {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let theta = v / self.radius;
        self.origin
            + self.axis.as_ref() * u
            + self.tangent.as_ref() * (self.radius * theta.sin())
            + self.bend.as_ref() * (self.radius * (1.0 - theta.cos()))
    }

    fn normal_at(&self, _u: f64, v: f64) -> UnitVec3 {
        let theta = v / self.radius;
        UnitVec3::new_normalize(
            self.bend.as_ref() * theta.cos() - self.tangent.as_ref() * theta.sin(),
        )
    }

    fn parameterize(&self, point: &Point3) -> Point2 {
        let q = point - self.origin;
        let y = self.tangent.dot(&q);
        let z = self.bend.dot(&q);
        let theta = y.atan2(self.radius - z);
        Point2::new(self.axis.dot(&q), theta * self.radius)
    }

    fn edge_samples(&self) -> usize {
        32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn plane_round_trip_and_orthogonalization() {
        let m = PlaneMapping::new(
            Point3::new(1.0, 1.0, 1.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 3.0, 0.0),
        )
        .unwrap();
        let p = m.point_at(2.0, -1.5);
        assert_relative_eq!(p, Point3::new(3.0, -0.5, 1.0), epsilon = 1e-12);
        let above = p + Vector3::z() * 4.0;
        assert_relative_eq!(m.parameterize(&above), Point2::new(2.0, -1.5), epsilon = 1e-12);
        assert_relative_eq!(m.normal_at(0.0, 0.0).into_inner(), Vector3::z(), epsilon = 1e-12);
    }

    #[test_case(0.0, 0.0)]
    #[test_case(3.0, 1.0)]
    #[test_case(-2.0, 7.5)]
    #[test_case(1.0, -4.0)]
    fn cylinder_round_trip(u: f64, v: f64) {
        let m = CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 10.0).unwrap();
        let p = m.point_at(u, v);
        assert_relative_eq!(m.parameterize(&p), Point2::new(u, v), epsilon = 1e-10);

        // Points off the surface along the normal keep their parameters
        let off = p + m.normal_at(u, v).into_inner() * 0.5;
        assert_relative_eq!(m.parameterize(&off), Point2::new(u, v), epsilon = 1e-10);
    }

    #[test]
    fn cylinder_normal_is_perpendicular_to_tangents() {
        let m = CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 4.0).unwrap();
        let h = 1e-6;
        let p = m.point_at(1.0, 2.0);
        let du = m.point_at(1.0 + h, 2.0) - p;
        let dv = m.point_at(1.0, 2.0 + h) - p;
        let n = m.normal_at(1.0, 2.0);
        assert_relative_eq!(n.dot(&du.normalize()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(n.dot(&dv.normalize()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(dv.norm() / h, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn cylinder_rejects_bad_radius() {
        let r = CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 0.0);
        assert!(matches!(r, Err(WingError::InvalidParameter(_))));
    }
}
