//! Discovery of chordlines along a wing span by marching a cutting plane over a guide surface.
//!
//! A march starts from a plane (a point and a normal) lying across the root of the guide surface.
//! Each step moves the plane's center against its normal, drops it back onto the surface, tilts
//! the plane so that it stays perpendicular to the surface, and slices the surface to find the
//! next chordline. The march ends when a step runs off the end of the surface, at which point a
//! final chordline is snapped just inside the tip boundary.
//!
//! Two drivers pick the step sizes: `march_adaptive` shrinks the spacing where the chord length
//! changes quickly along the span, and `march_scheduled` follows a fixed table of spacings.

mod adaptive;
mod marcher;
mod params;
mod plan;
mod sample;
mod scheduled;

pub use adaptive::SpacingState;
pub use marcher::{Advance, ChordlineMarcher};
pub use params::{AdaptiveSpacing, MarchParams};
pub use plan::{SpacingEntry, SpacingPlan};
pub use sample::{ChordlineSample, March, Termination};
