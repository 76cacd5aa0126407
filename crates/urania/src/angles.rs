//! Chart angles and the tropical/sidereal offset.

use crate::ephemeris::{EphemerisProvider, GeoLocation, HouseSystem};
use crate::error::ChartError;
use crate::geometry::{normalize_degrees, to_sidereal};
use log::debug;
use serde::{Deserialize, Serialize};

/// Ayanamsa at the year 2000 in this linear model, degrees
pub const AYANAMSA_AT_2000: f64 = 31.38;
/// Years per degree of drift in this linear model
pub const AYANAMSA_YEARS_PER_DEGREE: f64 = 72.0;

/// Offset between the tropical and sidereal frames for a birth year.
///
/// This is a linear approximation, `31.38 + (year - 2000) / 72`, and is not
/// any published ayanamsa. Chart output depends on it staying exactly so.
pub fn ayanamsa_for_year(year: i32) -> f64 {
    AYANAMSA_AT_2000 + (year - 2000) as f64 / AYANAMSA_YEARS_PER_DEGREE
}

/// Ascendant and midheaven in both frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub tropical_ascendant: f64,
    pub tropical_midheaven: f64,
    pub sidereal_ascendant: f64,
    pub sidereal_midheaven: f64,
}

impl ChartAngles {
    pub fn from_tropical(ascendant: f64, midheaven: f64, ayanamsa: f64) -> Self {
        Self {
            tropical_ascendant: normalize_degrees(ascendant),
            tropical_midheaven: normalize_degrees(midheaven),
            sidereal_ascendant: to_sidereal(ascendant, ayanamsa),
            sidereal_midheaven: to_sidereal(midheaven, ayanamsa),
        }
    }
}

/// Resolve equal-house angles for an observer.
///
/// Failure is fatal for the chart: every house placement depends on the
/// ascendant.
pub fn resolve_angles(
    ephemeris: &dyn EphemerisProvider,
    julian_day: f64,
    location: GeoLocation,
    ayanamsa: f64,
) -> Result<ChartAngles, ChartError> {
    let houses = ephemeris
        .houses(julian_day, location.lat, location.lon, HouseSystem::Equal)
        .map_err(ChartError::AngleResolution)?;
    let angles = ChartAngles::from_tropical(houses.asc, houses.mc, ayanamsa);
    debug!(
        "Angles at JD {:.5}: ASC {:.4} MC {:.4} (sidereal ASC {:.4})",
        julian_day, angles.tropical_ascendant, angles.tropical_midheaven, angles.sidereal_ascendant
    );
    Ok(angles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ayanamsa_linear_model() {
        assert!((ayanamsa_for_year(2000) - 31.38).abs() < 1e-12);
        assert!((ayanamsa_for_year(2072) - 32.38).abs() < 1e-12);
        assert!((ayanamsa_for_year(1928) - 30.38).abs() < 1e-12);
    }

    #[test]
    fn test_sidereal_angles_wrap() {
        let angles = ChartAngles::from_tropical(10.0, 280.0, 31.38);
        assert!((angles.sidereal_ascendant - 338.62).abs() < 1e-9);
        assert!((angles.sidereal_midheaven - 248.62).abs() < 1e-9);
    }
}
