//! Equal-house placement.

use crate::geometry::normalize_degrees;
use serde::{Deserialize, Serialize};

pub const HOUSE_SIZE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HousePlacement {
    /// House number, 1-12
    pub house: u8,
    /// Degrees past the house cusp, in [0, 30)
    pub degrees_into: f64,
}

/// Place a longitude in one of twelve 30 degree houses starting at the
/// ascendant.
///
/// The offset from the ascendant is taken modulo 360, so the house that
/// straddles 0 Aries classifies the same as any other.
pub fn find_house_equal(longitude: f64, ascendant: f64) -> HousePlacement {
    let offset = normalize_degrees(normalize_degrees(longitude) - normalize_degrees(ascendant));
    let index = ((offset / HOUSE_SIZE).floor() as usize).min(11);
    let degrees_into = (offset - index as f64 * HOUSE_SIZE).clamp(0.0, HOUSE_SIZE - f64::EPSILON * 64.0);
    HousePlacement {
        house: index as u8 + 1,
        degrees_into,
    }
}

/// Longitude of the cusp of `house` (1-12) for an ascendant.
pub fn house_cusp(house: u8, ascendant: f64) -> f64 {
    let index = (house.clamp(1, 12) - 1) as f64;
    normalize_degrees(ascendant + index * HOUSE_SIZE)
}
