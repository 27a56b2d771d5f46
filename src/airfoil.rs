//! This module contains the airfoil side of the section pipeline: loading a closed 2D outline and
//! detecting its leading and trailing edges, placing copies of that outline in 3D as section
//! frames, and estimating the twist normal at each spanwise station.

mod normals;
mod profile;
mod section;
mod table;

pub use normals::NormalField;
pub use profile::{AirfoilProfile, EdgeConvention};
pub use section::{SectionFrame, SMALL_CHORD_WARNING};
pub use table::{parse_table, ProfileFormat};
