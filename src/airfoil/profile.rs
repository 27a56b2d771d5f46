//! Closed airfoil outlines and the detection of their leading and trailing edges.

use crate::common::points::{coincident, dedup_consecutive, dist};
use crate::geom2::{segments_touch, Point2, UnitVec2};
use crate::{Result, WingError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Points closer than this are considered the same point when cleaning and closing an outline.
const POINT_TOL: f64 = 1e-9;

/// The convention used to decide which of the two detected cusps is the leading edge. The edge
/// detection itself only finds the two sharpest vertices of the outline, so the caller has to
/// pick an ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeConvention {
    /// The vertex with the highest sharpness score is the trailing edge, the runner-up is the
    /// leading edge. Sharp trailing edges with a rounded nose usually follow this ordering.
    ByScore,

    /// The candidate with the smaller chordwise coordinate is the leading edge, which matches the
    /// usual airfoil table convention of a nose at x = 0 and a tail at x = 1. Ties fall back to
    /// `ByScore`.
    #[default]
    MinChordwise,
}

/// An immutable closed 2D airfoil outline with its detected leading and trailing edge vertices.
/// The first and last points of the outline are always identical.
#[derive(Debug, Clone, Serialize)]
pub struct AirfoilProfile {
    points: Vec<Point2>,
    tangents: Vec<UnitVec2>,
    scores: Vec<f64>,
    leading_edge_idx: usize,
    trailing_edge_idx: usize,
}

impl AirfoilProfile {
    /// Load an outline using the default edge convention. See `load_with`.
    pub fn load(points: &[Point2]) -> Result<Self> {
        Self::load_with(points, EdgeConvention::default())
    }

    /// Load an outline from an ordered sequence of 2D points (chordwise, thickness), closing the
    /// loop if the first and last points differ, and detect the leading and trailing edges.
    ///
    /// Consecutive duplicate points are dropped. The outline must have at least 3 distinct
    /// points and must not cross itself.
    ///
    /// # Arguments
    ///
    /// * `points`: the ordered outline points, closed or not
    /// * `convention`: how to order the two detected edge candidates
    ///
    /// returns: Result<AirfoilProfile, WingError>
    pub fn load_with(points: &[Point2], convention: EdgeConvention) -> Result<Self> {
        if let Some(i) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(WingError::Profile(format!("point {i} is not finite")));
        }

        let (mut points, removed) = dedup_consecutive(points, POINT_TOL);
        if removed > 0 {
            log::warn!("Removed {removed} duplicate consecutive points from the profile");
        }

        let first = *points
            .first()
            .ok_or_else(|| WingError::Profile("the outline has no points".to_string()))?;

        if points.len() > 1 && coincident(&first, &points[points.len() - 1], POINT_TOL) {
            let last = points.len() - 1;
            points[last] = first;
        } else {
            log::info!("Adding closing endpoint to the profile");
            points.push(first);
        }

        let distinct = points.len() - 1;
        if distinct < 3 {
            return Err(WingError::Profile(format!(
                "the outline needs at least 3 distinct points, found {distinct}"
            )));
        }

        check_simple(&points)?;

        let tangents = points
            .iter()
            .tuple_windows()
            .map(|(a, b)| UnitVec2::new_normalize(b - a))
            .collect::<Vec<_>>();
        let scores = cusp_scores(&tangents);
        let (leading_edge_idx, trailing_edge_idx) = pick_edges(&points, &scores, convention);

        Ok(Self {
            points,
            tangents,
            scores,
            leading_edge_idx,
            trailing_edge_idx,
        })
    }

    /// The closed outline, where the last point repeats the first.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The number of points in the closed outline, including the repeated closing point.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The unit direction of each segment, `tangents()[i]` running from point `i` to `i + 1`.
    pub fn tangents(&self) -> &[UnitVec2] {
        &self.tangents
    }

    /// The sharpness score of every distinct vertex. Close to 1 at a cusp where the outline
    /// reverses direction and close to -1 where it continues smoothly.
    pub fn edge_scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn leading_edge_idx(&self) -> usize {
        self.leading_edge_idx
    }

    pub fn trailing_edge_idx(&self) -> usize {
        self.trailing_edge_idx
    }

    pub fn leading_edge(&self) -> Point2 {
        self.points[self.leading_edge_idx]
    }

    pub fn trailing_edge(&self) -> Point2 {
        self.points[self.trailing_edge_idx]
    }

    /// The distance between the detected leading and trailing edges.
    pub fn chord_length(&self) -> f64 {
        dist(&self.leading_edge(), &self.trailing_edge())
    }
}

/// Fails if any two non-adjacent segments of the closed outline touch.
fn check_simple(points: &[Point2]) -> Result<()> {
    let m = points.len() - 1;
    for i in 0..m {
        for j in (i + 2)..m {
            if i == 0 && j == m - 1 {
                continue;
            }
            if segments_touch(&points[i], &points[i + 1], &points[j], &points[j + 1]) {
                return Err(WingError::Profile(format!(
                    "the outline is not simple, segments {i} and {j} intersect"
                )));
            }
        }
    }
    Ok(())
}

/// Computes `t_i . -t_(i-1)` for every vertex, with vertex 0 compared against the last segment.
fn cusp_scores(tangents: &[UnitVec2]) -> Vec<f64> {
    let m = tangents.len();
    (0..m)
        .map(|i| {
            let prev = tangents[(i + m - 1) % m];
            -tangents[i].dot(prev.as_ref())
        })
        .collect()
}

fn pick_edges(points: &[Point2], scores: &[f64], convention: EdgeConvention) -> (usize, usize) {
    let ranked = (0..scores.len())
        .sorted_by(|a, b| scores[*b].total_cmp(&scores[*a]))
        .collect::<Vec<_>>();
    let (sharpest, runner_up) = (ranked[0], ranked[1]);

    match convention {
        EdgeConvention::ByScore => (runner_up, sharpest),
        EdgeConvention::MinChordwise => {
            if points[sharpest].x < points[runner_up].x {
                (sharpest, runner_up)
            } else {
                (runner_up, sharpest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use test_case::test_case;

    /// A symmetric lens made of two circular arcs which meet at sharp corners on the x axis. The
    /// corner at positive x is point 0 and the corner at negative x is point `n`.
    fn lens(n: usize) -> Vec<Point2> {
        let a0 = PI / 6.0;
        let c = a0.sin();
        let sweep = PI - 2.0 * a0;
        let mut points = Vec::new();
        for k in 0..=n {
            let phi = a0 + sweep * k as f64 / n as f64;
            points.push(Point2::new(phi.cos(), phi.sin() - c));
        }
        for k in 1..n {
            let phi = PI - a0 - sweep * k as f64 / n as f64;
            points.push(Point2::new(phi.cos(), -(phi.sin() - c)));
        }
        points
    }

    #[test_case(4)]
    #[test_case(20)]
    #[test_case(75)]
    fn lens_corners_are_the_edges(n: usize) {
        let profile = AirfoilProfile::load(&lens(n)).unwrap();
        assert_eq!(profile.leading_edge_idx(), n);
        assert_eq!(profile.trailing_edge_idx(), 0);
        assert!(profile.leading_edge().x < 0.0);
        assert_relative_eq!(profile.chord_length(), 2.0 * (PI / 6.0).cos(), epsilon = 1e-12);
    }

    #[test]
    fn load_closes_open_outline() {
        let points = lens(10);
        let profile = AirfoilProfile::load(&points).unwrap();
        assert_eq!(profile.len(), points.len() + 1);
        assert_eq!(profile.points()[0], profile.points()[profile.len() - 1]);
        assert_eq!(profile.tangents().len(), points.len());
        assert_eq!(profile.edge_scores().len(), points.len());
    }

    #[test]
    fn load_keeps_closed_outline() {
        let mut points = lens(10);
        points.push(points[0]);
        let profile = AirfoilProfile::load(&points).unwrap();
        assert_eq!(profile.len(), points.len());
        assert_eq!(profile.points()[0], profile.points()[profile.len() - 1]);
    }

    #[test]
    fn nearly_closed_outline_is_snapped() {
        let mut points = lens(10);
        points.push(Point2::new(points[0].x + 1e-12, points[0].y));
        let profile = AirfoilProfile::load(&points).unwrap();
        assert_eq!(profile.len(), points.len());
        assert_eq!(profile.points()[0], profile.points()[profile.len() - 1]);
    }

    #[test]
    fn duplicates_are_removed() {
        let mut points = lens(10);
        points.insert(3, points[3]);
        let profile = AirfoilProfile::load(&points).unwrap();
        assert_eq!(profile.len(), points.len());
        assert_eq!(profile.leading_edge_idx(), 10);
    }

    #[test]
    fn by_score_convention_is_explicit() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.2),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, -0.05),
        ];
        let by_x = AirfoilProfile::load_with(&points, EdgeConvention::MinChordwise).unwrap();
        let by_score = AirfoilProfile::load_with(&points, EdgeConvention::ByScore).unwrap();
        assert_eq!(by_x.leading_edge().x, 0.0);
        assert_eq!(by_x.trailing_edge().x, 1.0);

        let scores = by_score.edge_scores();
        assert!(scores[by_score.trailing_edge_idx()] >= scores[by_score.leading_edge_idx()]);
        let mut pair = [by_score.leading_edge_idx(), by_score.trailing_edge_idx()];
        pair.sort();
        assert_eq!(pair, [0, 2]);
    }

    #[test]
    fn edges_are_distinct_for_square() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let profile = AirfoilProfile::load(&points).unwrap();
        assert_ne!(profile.leading_edge_idx(), profile.trailing_edge_idx());
        assert!(profile.leading_edge_idx() < 4);
        assert!(profile.trailing_edge_idx() < 4);
    }

    #[test]
    fn too_few_points_fail() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 0.0)];
        assert!(matches!(
            AirfoilProfile::load(&points),
            Err(WingError::Profile(_))
        ));
        assert!(matches!(AirfoilProfile::load(&[]), Err(WingError::Profile(_))));
    }

    #[test]
    fn self_intersection_fails() {
        let bowtie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(matches!(
            AirfoilProfile::load(&bowtie),
            Err(WingError::Profile(_))
        ));
    }

    #[test]
    fn non_finite_fails() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert!(matches!(
            AirfoilProfile::load(&points),
            Err(WingError::Profile(_))
        ));
    }
}
