//! Reading airfoil outlines from plain-text coordinate tables, such as the Selig `.dat` format.

use super::{AirfoilProfile, EdgeConvention};
use crate::geom2::Point2;
use crate::{Result, WingError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for reading a coordinate table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFormat {
    /// The number of lines at the top of the file to skip before reading records
    pub skip_rows: usize,

    /// The convention used to order the detected edges
    pub convention: EdgeConvention,
}

impl Default for ProfileFormat {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            convention: EdgeConvention::default(),
        }
    }
}

impl ProfileFormat {
    pub fn new(skip_rows: usize, convention: EdgeConvention) -> Self {
        Self {
            skip_rows,
            convention,
        }
    }
}

/// Parse a text table of 2D coordinates, one point per line. The first `skip_rows` lines are
/// ignored, as are blank lines and lines starting with `#`. Columns may be separated by
/// whitespace or commas; the first column is the chordwise coordinate and the second the
/// thickness coordinate, any further columns are ignored.
///
/// # Examples
///
/// ```
/// use cadwing::airfoil::parse_table;
/// let points = parse_table("NACA 0012\n1.0 0.0\n0.5, 0.06\n0.0 0.0\n", 1).unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[1].y, 0.06);
/// ```
pub fn parse_table(text: &str, skip_rows: usize) -> Result<Vec<Point2>> {
    let mut points = Vec::new();
    for (i, line) in text.lines().enumerate().skip(skip_rows) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut columns = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty());

        let mut next_value = |name: &str| -> Result<f64> {
            let token = columns.next().ok_or_else(|| WingError::Parse {
                line: i + 1,
                message: format!("missing {name} column"),
            })?;
            token.parse::<f64>().map_err(|e| WingError::Parse {
                line: i + 1,
                message: format!("bad {name} value '{token}': {e}"),
            })
        };

        let x = next_value("chordwise")?;
        let y = next_value("thickness")?;
        points.push(Point2::new(x, y));
    }

    Ok(points)
}

impl AirfoilProfile {
    /// Parse a coordinate table and load it as a profile.
    pub fn from_table(text: &str, format: &ProfileFormat) -> Result<Self> {
        let points = parse_table(text, format.skip_rows)?;
        Self::load_with(&points, format.convention)
    }

    /// Read a coordinate table file and load it as a profile.
    pub fn from_file<P: AsRef<Path>>(path: P, format: &ProfileFormat) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loading profile from {}", path.as_ref().display());
        Self::from_table(&text, format)
    }
}
