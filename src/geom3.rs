mod plane3;
mod slice_plane;

use crate::common::surface_point::SurfacePoint;
use crate::{Result, WingError};

pub use plane3::Plane3;
pub use slice_plane::SlicePlane;

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
pub type Matrix3 = parry3d_f64::na::Matrix3<f64>;
pub type SurfacePoint3 = SurfacePoint<3>;
pub type Aabb3 = parry3d_f64::bounding_volume::Aabb;

/// Vectors shorter than this are treated as zero when normalizing.
pub const ZERO_LENGTH: f64 = 1e-12;

/// Normalize a vector, failing with a geometry error naming `what` if it has no usable length.
pub fn try_normalize(v: &Vector3, what: &str) -> Result<UnitVec3> {
    UnitVec3::try_new(*v, ZERO_LENGTH)
        .ok_or_else(|| WingError::Geometry(format!("{what} has zero length")))
}

/// Remove from `v` its component along the unit vector `n` and normalize what is left. Fails if
/// `v` is parallel to `n`.
pub fn reject_normalized(v: &Vector3, n: &UnitVec3, what: &str) -> Result<UnitVec3> {
    let rejected = v - n.as_ref() * n.dot(v);
    try_normalize(&rejected, what)
}
