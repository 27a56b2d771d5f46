use crate::{Result, WingError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// General settings shared by both marching drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchParams {
    /// How far inside the tip boundary the final chordline is placed. A slice exactly on the
    /// boundary degenerates, so the last station is pulled back by this distance.
    pub min_tip_distance: f64,

    /// The maximum number of marching iterations. A march which reaches this count stops without
    /// finding the tip and reports `Termination::IterationCap`.
    pub max_iterations: usize,

    /// The tolerance used when testing whether a point lies on the guide surface
    pub containment_tol: f64,

    /// The side length of the square cutting plane. Defaults to the guide surface's bounding box
    /// diagonal, which is always large enough to cross the whole surface.
    pub slice_size: Option<f64>,
}

impl Default for MarchParams {
    fn default() -> Self {
        Self {
            min_tip_distance: 0.5,
            max_iterations: 150,
            containment_tol: 1e-5,
            slice_size: None,
        }
    }
}

impl MarchParams {
    pub fn new(min_tip_distance: f64) -> Self {
        Self {
            min_tip_distance,
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_slice_size(mut self, slice_size: f64) -> Self {
        self.slice_size = Some(slice_size);
        self
    }

    /// Read parameters from a JSON object. Missing fields take their default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadwing::MarchParams;
    /// let params = MarchParams::from_json_str(r#"{"min_tip_distance": 0.2}"#).unwrap();
    /// assert_eq!(params.min_tip_distance, 0.2);
    /// assert_eq!(params.max_iterations, 150);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_tip_distance >= 0.0 && self.min_tip_distance.is_finite()) {
            return Err(WingError::InvalidParameter(format!(
                "min_tip_distance must be a non-negative number, got {}",
                self.min_tip_distance
            )));
        }
        if !(self.containment_tol > 0.0) {
            return Err(WingError::InvalidParameter(format!(
                "containment_tol must be positive, got {}",
                self.containment_tol
            )));
        }
        if let Some(size) = self.slice_size {
            if !(size > 0.0 && size.is_finite()) {
                return Err(WingError::InvalidParameter(format!(
                    "slice_size must be positive, got {size}"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for the curvature adaptive driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveSpacing {
    /// The spacing used where the chord length varies linearly along the span
    pub target_spacing: f64,

    /// How strongly the second derivative of the chord length shrinks the spacing. Zero gives a
    /// constant spacing.
    pub curvature_coeff: f64,
}

impl AdaptiveSpacing {
    pub fn new(target_spacing: f64, curvature_coeff: f64) -> Self {
        Self {
            target_spacing,
            curvature_coeff,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.target_spacing > 0.0 && self.target_spacing.is_finite()) {
            return Err(WingError::InvalidParameter(format!(
                "target_spacing must be positive, got {}",
                self.target_spacing
            )));
        }
        if !(self.curvature_coeff >= 0.0 && self.curvature_coeff.is_finite()) {
            return Err(WingError::InvalidParameter(format!(
                "curvature_coeff must be a non-negative number, got {}",
                self.curvature_coeff
            )));
        }
        Ok(())
    }

    /// The spacing to use given the local second derivative of the chord length along the span.
    pub fn next_spacing(&self, curvature: f64) -> f64 {
        self.target_spacing
            / (1.0 + curvature.abs() * self.curvature_coeff * self.target_spacing)
    }
}
