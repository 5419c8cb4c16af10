//! Nearest-place resolution
//!
//! Distances are Euclidean in the (latitude, longitude) plane. The skill only
//! works inside the Novgorod kremlin, where a flat-earth approximation orders
//! places the same way a geodesic distance would.

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{SkillError, Result};
use super::landmarks::PointOfInterest;

/// A labeled geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Planar distance in degrees
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }
}

/// Find the point of interest closest to `coordinate`.
///
/// Exact ties go to the entry that comes first in `points`.
pub fn nearest(coordinate: Coordinate, points: &[PointOfInterest]) -> Result<&PointOfInterest> {
    let mut best: Option<(&PointOfInterest, f64)> = None;

    for point in points {
        let distance = coordinate.distance_to(&point.coordinate);
        match best {
            Some((_, best_distance)) if distance.total_cmp(&best_distance) != Ordering::Less => {}
            _ => best = Some((point, distance)),
        }
    }

    best.map(|(point, _)| point).ok_or(SkillError::EmptyPointsOfInterest)
}

/// All points ordered by distance from `coordinate`, closest first.
///
/// The sort is stable, so equally distant points keep their enumeration order
/// and `rank(..)[0]` is always the same entry `nearest` returns.
pub fn rank(coordinate: Coordinate, points: &[PointOfInterest]) -> Vec<&PointOfInterest> {
    let mut ranked: Vec<(&PointOfInterest, f64)> = points
        .iter()
        .map(|point| (point, coordinate.distance_to(&point.coordinate)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().map(|(point, _)| point).collect()
}
