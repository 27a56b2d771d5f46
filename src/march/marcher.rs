use super::{ChordlineSample, MarchParams};
use crate::common::points::mid_point;
use crate::geom3::{reject_normalized, try_normalize};
use crate::{Point3, Result, SlicePlane, Surface, SurfacePoint3, UnitVec3, WingError};

/// The result of a single marching step.
#[derive(Debug, Clone, Copy)]
pub struct Advance {
    pub sample: ChordlineSample,

    /// Set when the step ran off the guide surface and the sample was snapped to the tip
    pub end_of_face: bool,
}

/// Walks a cutting plane along a guide surface to produce chordlines. The marcher holds no state
/// between calls: every step is a function of the previous plane and the step size, so drivers
/// thread their own state through successive calls to `advance`.
pub struct ChordlineMarcher<'a, S: Surface + ?Sized> {
    surface: &'a S,
    params: MarchParams,
    slice_size: f64,
}

impl<'a, S: Surface + ?Sized> ChordlineMarcher<'a, S> {
    pub fn new(surface: &'a S, params: MarchParams) -> Result<Self> {
        params.validate()?;
        let slice_size = params
            .slice_size
            .unwrap_or_else(|| surface.bounding_diagonal_length());
        if !(slice_size > 0.0) {
            return Err(WingError::InvalidParameter(format!(
                "the guide surface has no extent to slice (size {slice_size})"
            )));
        }

        Ok(Self {
            surface,
            params,
            slice_size,
        })
    }

    pub fn surface(&self) -> &S {
        self.surface
    }

    pub fn params(&self) -> &MarchParams {
        &self.params
    }

    /// Slice the guide surface with the starting plane itself, without moving it and without
    /// checking for the tip. This gives the true chordline at the root.
    pub fn initial_sample(&self, start: &SurfacePoint3) -> Result<ChordlineSample> {
        Ok(self.step(start, 0.0, false)?.sample)
    }

    /// Take one marching step of length `step` from `plane`.
    ///
    /// The plane's center moves against the plane normal by `step` and is dropped onto the guide
    /// surface. The new cutting plane normal is the previous one with its component along the
    /// local surface normal removed, keeping the plane perpendicular to the surface as it curves.
    /// If the step crosses the tip of the surface the center is snapped to `min_tip_distance`
    /// inside the boundary and `end_of_face` is set.
    ///
    /// # Arguments
    ///
    /// * `plane`: the current cutting plane, with its point on the guide surface
    /// * `step`: the distance to move
    ///
    /// returns: Result<Advance, WingError>
    pub fn advance(&self, plane: &SurfacePoint3, step: f64) -> Result<Advance> {
        self.step(plane, step, true)
    }

    fn step(&self, plane: &SurfacePoint3, step: f64, check_tip: bool) -> Result<Advance> {
        let moved = plane.at_distance(-step);
        let (mut center, face_normal) = self.surface.project(&moved);

        let normal = reject_normalized(&plane.normal, &face_normal, "cutting plane normal")?;
        let x_axis = try_normalize(&face_normal.cross(normal.as_ref()), "slice x axis")?;
        let z_axis = try_normalize(&x_axis.cross(normal.as_ref()), "slice z axis")?;

        let mut end_of_face = false;
        if check_tip {
            if let Some(snapped) = self.tip_snap(&center, &plane.normal) {
                log::debug!("Tip reached, snapping chordline center to {snapped:?}");
                center = snapped;
                end_of_face = true;
            }
        }

        let slice = SlicePlane::new(center, normal, x_axis, z_axis, self.slice_size);
        let (mut leading, mut trailing) = self.surface.intersect_with_plane(&slice)?;
        if (trailing - leading).dot(x_axis.as_ref()) < 0.0 {
            std::mem::swap(&mut leading, &mut trailing);
        }

        let plane = SurfacePoint3::new(mid_point(&leading, &trailing), normal);
        Ok(Advance {
            sample: ChordlineSample::new(plane, leading, trailing),
            end_of_face,
        })
    }

    /// Checks whether the station at `center` is too close to, or beyond, the tip. The test looks
    /// `min_tip_distance` further along the marching direction; if that point is off the face, the
    /// returned center is the nearest boundary point to it, pulled back by `min_tip_distance`.
    fn tip_snap(&self, center: &Point3, prev_normal: &UnitVec3) -> Option<Point3> {
        let reach = self.params.min_tip_distance;
        let ahead = center - prev_normal.as_ref() * reach;
        let (ahead, _) = self.surface.project(&ahead);
        if self.surface.contains(&ahead, self.params.containment_tol) {
            return None;
        }

        let boundary = self.surface.nearest_boundary_point(&ahead);
        Some(boundary + prev_normal.as_ref() * reach)
    }
}
