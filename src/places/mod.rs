//! Places module
//!
//! Static points of interest and the nearest-place resolver used by the
//! location-aware scenes.

pub mod landmarks;
pub mod nearest;

pub use landmarks::{Landmark, PointOfInterest, POINTS_OF_INTEREST};
pub use nearest::{nearest, rank, Coordinate};
