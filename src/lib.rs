//! Derive placed 3D wing cross-sections from a 2D airfoil outline.
//!
//! The crate walks a guide surface to discover chordlines along a wing span, estimates a twist
//! normal for every station, and places a copy of the airfoil outline on each chordline so that
//! a downstream CAD kernel can loft the resulting point sets into a solid.

pub mod airfoil;
pub mod common;
mod errors;
pub mod geom2;
pub mod geom3;
pub mod march;
pub mod surface;
pub mod wing;

pub use errors::WingError;

pub type Result<T> = std::result::Result<T, WingError>;

pub use airfoil::{AirfoilProfile, EdgeConvention, NormalField, ProfileFormat, SectionFrame};
pub use common::surface_point::SurfacePoint;
pub use geom2::{Point2, Vector2};
pub use geom3::{Plane3, Point3, SlicePlane, SurfacePoint3, UnitVec3, Vector3};
pub use march::{
    AdaptiveSpacing, ChordlineMarcher, ChordlineSample, March, MarchParams, SpacingPlan,
    Termination,
};
pub use surface::{BoundedFace, CylinderMapping, FaceMapping, PlaneMapping, Surface};
pub use wing::{Orientation, SectionExport, Wing, WingExport};
