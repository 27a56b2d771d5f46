//! Airfoil sections placed in 3D space.

use super::AirfoilProfile;
use crate::common::points::dist;
use crate::geom3::{try_normalize, Matrix3, ZERO_LENGTH};
use crate::{Point3, Result, Vector3, WingError};
use std::sync::Arc;

/// Chords shorter than this trigger a warning, since most solid construction will struggle with
/// sections this small.
pub const SMALL_CHORD_WARNING: f64 = 0.05;

/// The largest allowed `|n . c|` between a requested section normal and the chord direction.
const ORTHOGONAL_TOL: f64 = 1e-4;

/// A copy of an airfoil outline placed in 3D space.
///
/// The section keeps its own 3D points and an orthonormal local basis whose columns are the chord
/// direction, the section normal (the direction the outline's plane faces across the span), and
/// the thickness direction. The leading and trailing edge positions are always read from the
/// points at the profile's edge indices, so they can never drift from the geometry.
#[derive(Debug, Clone)]
pub struct SectionFrame {
    profile: Arc<AirfoilProfile>,
    xyz: Vec<Point3>,
    chord: f64,
    basis: Matrix3,
}

impl SectionFrame {
    /// Build a section from a profile. The outline is mapped into the XZ plane (y = 0) with the
    /// chordwise coordinate on x and the thickness coordinate on z, and the local basis is built
    /// from the chord direction and a fixed +Y normal.
    pub fn build(profile: Arc<AirfoilProfile>) -> Result<Self> {
        let xyz = profile
            .points()
            .iter()
            .map(|p| Point3::new(p.x, 0.0, p.y))
            .collect::<Vec<_>>();

        let lead = xyz[profile.leading_edge_idx()];
        let trail = xyz[profile.trailing_edge_idx()];
        let chord = dist(&lead, &trail);
        let chord_dir = try_normalize(&(trail - lead), "profile chord")?;
        let normal = Vector3::y();
        let thick = chord_dir.cross(&normal);

        Ok(Self {
            profile,
            xyz,
            chord,
            basis: Matrix3::from_columns(&[chord_dir.into_inner(), normal, thick]),
        })
    }

    pub fn profile(&self) -> &AirfoilProfile {
        &self.profile
    }

    /// The current 3D points of the section, in the same order as the profile outline.
    pub fn xyz(&self) -> &[Point3] {
        &self.xyz
    }

    pub fn chord(&self) -> f64 {
        self.chord
    }

    /// The local basis as a matrix whose columns are the chord, normal and thickness directions.
    pub fn basis(&self) -> &Matrix3 {
        &self.basis
    }

    pub fn chord_dir(&self) -> Vector3 {
        self.basis.column(0).into_owned()
    }

    pub fn normal(&self) -> Vector3 {
        self.basis.column(1).into_owned()
    }

    pub fn thickness_dir(&self) -> Vector3 {
        self.basis.column(2).into_owned()
    }

    pub fn lead_pos(&self) -> Point3 {
        self.xyz[self.profile.leading_edge_idx()]
    }

    pub fn trail_pos(&self) -> Point3 {
        self.xyz[self.profile.trailing_edge_idx()]
    }

    /// Place the section so that its leading edge lands on `new_lead`, its trailing edge on
    /// `new_trail`, and its outline plane faces along `new_normal`.
    ///
    /// The points are rotated from the current local basis into the new one and scaled by the
    /// ratio of the chord lengths, then translated so the leading edge matches exactly. Applying
    /// the same arguments twice gives the same result as applying them once.
    ///
    /// # Arguments
    ///
    /// * `new_lead`: the target leading edge position
    /// * `new_trail`: the target trailing edge position
    /// * `new_normal`: the section normal, which must be orthogonal to the new chord; it does not
    ///   need to be unit length
    ///
    /// returns: Result<(), WingError>
    pub fn transform(
        &mut self,
        new_lead: &Point3,
        new_trail: &Point3,
        new_normal: &Vector3,
    ) -> Result<()> {
        let new_chord_vect = new_trail - new_lead;
        let new_chord = new_chord_vect.norm();
        if new_chord < SMALL_CHORD_WARNING {
            log::warn!(
                "Section chord {new_chord:.4} is smaller than {SMALL_CHORD_WARNING}, solid \
                 construction may fail"
            );
        }

        if self.chord <= ZERO_LENGTH {
            return Err(WingError::Geometry(format!(
                "the current section chord {:.3e} is too small to map from",
                self.chord
            )));
        }

        let chord_dir = try_normalize(&new_chord_vect, "section chord")?;
        let normal = try_normalize(new_normal, "section normal")?;
        let dot = normal.dot(chord_dir.as_ref());
        if dot.abs() > ORTHOGONAL_TOL {
            return Err(WingError::Orientation { dot });
        }

        let thick = try_normalize(
            &chord_dir.cross(normal.as_ref()),
            "section thickness direction",
        )?;
        let new_basis = Matrix3::from_columns(&[
            chord_dir.into_inner(),
            normal.into_inner(),
            thick.into_inner(),
        ]);

        let map = new_basis * self.basis.transpose() * (new_chord / self.chord);
        for p in self.xyz.iter_mut() {
            *p = Point3::from(map * p.coords);
        }

        self.chord = new_chord;
        self.basis = new_basis;
        self.translate(new_lead);

        Ok(())
    }

    /// Uniformly scale the section about its leading edge. The factor must be positive and finite.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if !(factor > 0.0 && factor.is_finite()) {
            return Err(WingError::InvalidParameter(format!(
                "section scale factor must be positive, got {factor}"
            )));
        }

        let lead = self.lead_pos();
        for p in self.xyz.iter_mut() {
            *p = lead + (*p - lead) * factor;
        }
        self.chord *= factor;
        Ok(())
    }

    /// Rigidly move the section so that its leading edge lands on `new_lead`.
    pub fn translate(&mut self, new_lead: &Point3) {
        let shift = new_lead - self.lead_pos();
        for p in self.xyz.iter_mut() {
            *p += shift;
        }
    }
}
