use super::{ChordlineMarcher, ChordlineSample, March, SpacingPlan, Termination};
use crate::{Result, Surface, SurfacePoint3};

/// Distances closer than this to a schedule threshold count as having reached it.
const THRESHOLD_TOL: f64 = 1e-9;

/// Projections of the plane normal onto the march axis are clamped to at least this value.
const MIN_PROJECTION: f64 = 1e-6;

impl<S: Surface + ?Sized> ChordlineMarcher<'_, S> {
    /// March from the root to the tip following a fixed spacing schedule.
    ///
    /// Distance is measured along the starting plane's normal. Each threshold in the plan is
    /// landed on exactly: when the next regular step would carry the march past a threshold, the
    /// step is shortened so that the station falls on it, and the following steps use the new
    /// spacing. The plan is extended past the end of the guide surface with its last spacing so
    /// the march always has a spacing to use.
    ///
    /// # Arguments
    ///
    /// * `start`: a plane lying across the root of the guide surface
    /// * `plan`: the (threshold, spacing) schedule
    ///
    /// returns: Result<March, WingError>
    pub fn march_scheduled(&self, start: &SurfacePoint3, plan: &SpacingPlan) -> Result<March> {
        let plan = plan.extended_to(self.surface().bounding_diagonal_length());
        let entries = plan.entries();
        let axis = start.normal;

        let mut spacing = entries[0].spacing;
        let mut next_idx = 1;
        let mut travelled = 0.0;

        let mut samples: Vec<ChordlineSample> = Vec::new();
        let mut current = self.initial_sample(start)?;

        for _ in 0..self.params().max_iterations {
            samples.push(current);

            // Steps are measured along the local plane normal, which tilts away from the march
            // axis on curved surfaces.
            let proj = axis.dot(current.normal().as_ref()).abs().max(MIN_PROJECTION);
            let mut step = spacing;
            while let Some(entry) = entries.get(next_idx) {
                let remaining = entry.threshold - travelled;
                if remaining <= THRESHOLD_TOL {
                    spacing = entry.spacing;
                    step = spacing;
                    next_idx += 1;
                    continue;
                }
                if proj * spacing >= remaining - THRESHOLD_TOL {
                    step = remaining / proj;
                    spacing = entry.spacing;
                    next_idx += 1;
                    log::debug!(
                        "Spacing changes to {spacing} at {} along the span",
                        entry.threshold
                    );
                }
                break;
            }

            let next = self.advance(&current.plane, step)?;
            if next.end_of_face {
                samples.push(next.sample);
                return Ok(March::new(samples, Termination::Tip));
            }
            travelled += axis.dot(&(next.sample.center() - current.center())).abs();
            current = next.sample;
        }

        log::warn!(
            "Scheduled march stopped after {} iterations without reaching the tip",
            self.params().max_iterations
        );
        Ok(March::new(samples, Termination::IterationCap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::rectangle_outline;
    use crate::{BoundedFace, CylinderMapping, MarchParams, PlaneMapping, Point3, Vector3};
    use approx::assert_relative_eq;

    fn flat() -> BoundedFace<PlaneMapping> {
        BoundedFace::rectangle(Point3::origin(), Vector3::x(), Vector3::y(), 100.0, 50.0).unwrap()
    }

    fn root() -> SurfacePoint3 {
        SurfacePoint3::new_normalize(Point3::new(0.0, 25.0, 0.0), -Vector3::x())
    }

    #[test]
    fn schedule_changes_spacing_at_threshold() {
        let face = flat();
        let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
        let plan = SpacingPlan::new(&[(0.0, 10.0), (50.0, 2.0)]).unwrap();
        let march = marcher.march_scheduled(&root(), &plan).unwrap();

        let mut expected = (0..=5).map(|i| 10.0 * i as f64).collect::<Vec<_>>();
        expected.extend((1..=24).map(|i| 50.0 + 2.0 * i as f64));
        expected.push(99.5);

        assert!(march.reached_tip());
        let xs = march.centers().iter().map(|c| c.x).collect::<Vec<_>>();
        assert_eq!(xs.len(), expected.len());
        for (x, e) in xs.iter().zip(&expected) {
            assert_relative_eq!(*x, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn threshold_between_stations_is_landed_on() {
        let face = flat();
        let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
        let plan = SpacingPlan::new(&[(0.0, 10.0), (35.0, 5.0)]).unwrap();
        let march = marcher.march_scheduled(&root(), &plan).unwrap();

        let xs = march.centers().iter().map(|c| c.x).collect::<Vec<_>>();
        for e in [0.0, 10.0, 20.0, 30.0, 35.0, 40.0, 45.0] {
            assert!(xs.iter().any(|x| (x - e).abs() < 1e-9), "missing station at {e}");
        }
        assert_relative_eq!(*xs.last().unwrap(), 99.5, epsilon = 1e-9);
    }

    #[test]
    fn constant_plan_hits_cap() {
        let face = flat();
        let params = MarchParams::new(0.5).with_max_iterations(4);
        let marcher = ChordlineMarcher::new(&face, params).unwrap();
        let plan = SpacingPlan::constant(5.0).unwrap();
        let march = marcher.march_scheduled(&root(), &plan).unwrap();

        assert_eq!(march.termination, Termination::IterationCap);
        assert_eq!(march.len(), 4);
        assert_relative_eq!(march.centers()[3].x, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn cylinder_keeps_orientation() {
        let mapping =
            CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 20.0).unwrap();
        let face = BoundedFace::new(mapping, rectangle_outline(30.0, 40.0)).unwrap();
        let start = SurfacePoint3::new_normalize(Point3::new(15.0, 0.0, 0.0), -Vector3::y());

        let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
        let plan = SpacingPlan::new(&[(0.0, 4.0), (12.0, 2.0)]).unwrap();
        let march = marcher.march_scheduled(&start, &plan).unwrap();

        assert_eq!(march.termination, Termination::Tip);
        assert!(march.len() > 5);

        let leads = march.leading_edges();
        let trails = march.trailing_edges();
        for (l, t) in leads.iter().zip(&trails) {
            assert_relative_eq!((t - l).norm(), 30.0, epsilon = 1e-6);
            assert!(l.x < t.x);
        }
        for (a, b) in march.samples.iter().zip(march.samples.iter().skip(1)) {
            assert!(a.direction().dot(&b.direction()) >= 0.0);
        }

        // Plane normals turn smoothly with the surface and never flip
        let normals = march.normals();
        for (a, b) in normals.iter().zip(normals.iter().skip(1)) {
            assert!(a.dot(b.as_ref()) > 0.9);
        }

        // Only the final sample is snapped to the tip, half a unit short of the far edge
        let vs = march
            .centers()
            .iter()
            .map(|c| face.parameterize(c).1)
            .collect::<Vec<_>>();
        assert!(vs.windows(2).all(|w| w[1] > w[0]));
        let last = *vs.last().unwrap();
        assert!(last > 39.0 && last < 40.0);
        assert!(vs[vs.len() - 2] < last);
    }
}
