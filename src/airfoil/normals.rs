//! Estimation of the section normals (twist vectors) along a span from the leading and trailing
//! edge positions of each station.

use crate::common::points::mid_point;
use crate::geom3::{reject_normalized, try_normalize};
use crate::{Point3, Result, UnitVec3, Vector3, WingError};

/// Generates a consistent normal for each spanwise station. The normal at a station follows the
/// direction in which the chord midpoints advance along the span, made orthogonal to the local
/// chord.
pub struct NormalField;

impl NormalField {
    /// Compute one unit normal per station.
    ///
    /// The spanwise direction is estimated by differencing the chord centers: a central
    /// difference for interior stations, a forward difference at the first station, and the
    /// difference between the third-to-last and last centers at the final station. With exactly
    /// two stations both use the vector between the two centers. Each estimate then has its
    /// component along the local chord removed and is normalized.
    ///
    /// # Arguments
    ///
    /// * `lead`: leading edge positions, one per station in span order
    /// * `trail`: trailing edge positions, matching `lead`
    ///
    /// returns: Result<Vec<UnitVec3>, WingError>
    pub fn compute(lead: &[Point3], trail: &[Point3]) -> Result<Vec<UnitVec3>> {
        if lead.len() != trail.len() {
            return Err(WingError::InvalidParameter(format!(
                "{} leading edge positions but {} trailing edge positions",
                lead.len(),
                trail.len()
            )));
        }
        let n = lead.len();
        if n < 2 {
            return Err(WingError::InvalidParameter(format!(
                "at least 2 stations are needed to estimate normals, got {n}"
            )));
        }

        let chords = lead
            .iter()
            .zip(trail)
            .enumerate()
            .map(|(i, (l, t))| try_normalize(&(t - l), &format!("chord at station {i}")))
            .collect::<Result<Vec<_>>>()?;
        let centers = lead
            .iter()
            .zip(trail)
            .map(|(l, t)| mid_point(l, t))
            .collect::<Vec<_>>();

        (0..n)
            .map(|i| {
                let span = span_estimate(&centers, i);
                reject_normalized(&span, &chords[i], &format!("span direction at station {i}"))
            })
            .collect()
    }
}

fn span_estimate(centers: &[Point3], i: usize) -> Vector3 {
    let n = centers.len();
    if n == 2 || i == 0 {
        centers[1] - centers[0]
    } else if i == n - 1 {
        centers[n - 1] - centers[n - 3]
    } else {
        centers[i + 1] - centers[i - 1]
    }
}
