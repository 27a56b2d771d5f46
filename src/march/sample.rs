use crate::common::points::dist;
use crate::{Point3, SurfacePoint3, UnitVec3, Vector3};
use serde::{Deserialize, Serialize};

/// One chordline found by the marcher: the cutting plane at the station and the two end points
/// where that plane crosses the guide surface's boundary.
///
/// The plane's point is the chordline center and its normal is the cutting plane normal, which
/// is orthogonal to the chordline. The end points are ordered consistently across a march.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordlineSample {
    pub plane: SurfacePoint3,
    pub leading: Point3,
    pub trailing: Point3,
}

impl ChordlineSample {
    pub fn new(plane: SurfacePoint3, leading: Point3, trailing: Point3) -> Self {
        Self {
            plane,
            leading,
            trailing,
        }
    }

    pub fn center(&self) -> Point3 {
        self.plane.point
    }

    pub fn normal(&self) -> UnitVec3 {
        self.plane.normal
    }

    /// The vector from the leading end point to the trailing end point
    pub fn direction(&self) -> Vector3 {
        self.trailing - self.leading
    }

    pub fn length(&self) -> f64 {
        dist(&self.leading, &self.trailing)
    }
}

/// Why a march stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The march ran off the guide surface and the last sample was snapped to the tip
    Tip,

    /// The iteration limit was reached before the tip, so the samples stop short of it
    IterationCap,
}

/// The ordered result of a march, from root to tip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct March {
    pub samples: Vec<ChordlineSample>,
    pub termination: Termination,
}

impl March {
    pub fn new(samples: Vec<ChordlineSample>, termination: Termination) -> Self {
        Self {
            samples,
            termination,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn reached_tip(&self) -> bool {
        self.termination == Termination::Tip
    }

    pub fn leading_edges(&self) -> Vec<Point3> {
        self.samples.iter().map(|s| s.leading).collect()
    }

    pub fn trailing_edges(&self) -> Vec<Point3> {
        self.samples.iter().map(|s| s.trailing).collect()
    }

    pub fn centers(&self) -> Vec<Point3> {
        self.samples.iter().map(|s| s.center()).collect()
    }

    pub fn normals(&self) -> Vec<UnitVec3> {
        self.samples.iter().map(|s| s.normal()).collect()
    }
}
