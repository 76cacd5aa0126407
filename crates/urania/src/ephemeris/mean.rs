//! Offline mean-element provider.
//!
//! Planets move on circular, coplanar heliocentric orbits at their mean
//! rates and are viewed from a circular Earth orbit, which reproduces the
//! rough geometry of a chart (including retrograde loops) without data
//! files. Angles come from mean sidereal time and the J2000 obliquity
//! (Meeus, "Astronomical Algorithms", ch. 12-13). Positions are good to a
//! few degrees; this is not a substitute for the Swiss Ephemeris.

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::time::J2000_JD;
use crate::ephemeris::types::{Body, BodyPosition, HouseAngles, HouseSystem};
use crate::ephemeris::EphemerisProvider;
use crate::geometry::{normalize_degrees, signed_arc};

/// Mean obliquity of the ecliptic at J2000.0, degrees
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;

/// (longitude at J2000, daily motion, semi-major axis in AU)
type MeanOrbit = (f64, f64, f64);

const EARTH: MeanOrbit = (100.464_35, 0.985_609_10, 1.0);

fn heliocentric_orbit(body: Body) -> Option<MeanOrbit> {
    match body {
        Body::Mercury => Some((252.250_84, 4.092_334_45, 0.387_10)),
        Body::Venus => Some((181.979_73, 1.602_130_34, 0.723_33)),
        Body::Mars => Some((355.453_32, 0.524_020_68, 1.523_71)),
        Body::Jupiter => Some((34.404_38, 0.083_085_29, 5.203_36)),
        Body::Saturn => Some((49.944_32, 0.033_444_14, 9.537_07)),
        Body::Uranus => Some((313.232_18, 0.011_728_34, 19.191_26)),
        Body::Neptune => Some((304.880_03, 0.005_981_03, 30.068_96)),
        Body::Pluto => Some((238.928_81, 0.003_975_70, 39.481_69)),
        Body::Chiron => Some((251.0, 0.019_480, 13.65)),
        Body::Ceres => Some((153.7, 0.214_08, 2.767)),
        Body::Pallas => Some((174.0, 0.213_57, 2.773)),
        Body::Juno => Some((300.0, 0.225_68, 2.669)),
        Body::Vesta => Some((205.0, 0.271_54, 2.362)),
        _ => None,
    }
}

/// (longitude at J2000, daily motion) of points tracked geocentrically
fn geocentric_mean(body: Body) -> Option<(f64, f64)> {
    match body {
        Body::Sun => Some((280.466_46, 0.985_647_36)),
        Body::Moon => Some((218.316_5, 13.176_396_48)),
        Body::NorthNode => Some((125.044_5, -0.052_953_8)),
        Body::Lilith => Some((83.353_2, 0.111_404_1)),
        _ => None,
    }
}

/// Deterministic mean-motion ephemeris; see the module docs for its limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanEphemeris;

impl MeanEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn longitude(&self, julian_day: f64, body: Body) -> f64 {
        let days = julian_day - J2000_JD;
        if let Some((l0, rate)) = geocentric_mean(body) {
            return normalize_degrees(l0 + rate * days);
        }
        // Every remaining body has a heliocentric orbit
        let (l0, rate, radius) = heliocentric_orbit(body).unwrap_or(EARTH);
        let planet = normalize_degrees(l0 + rate * days).to_radians();
        let earth = normalize_degrees(EARTH.0 + EARTH.1 * days).to_radians();
        let x = radius * planet.cos() - EARTH.2 * earth.cos();
        let y = radius * planet.sin() - EARTH.2 * earth.sin();
        normalize_degrees(y.atan2(x).to_degrees())
    }
}

impl EphemerisProvider for MeanEphemeris {
    fn position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        if !julian_day.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day,
                message: "non-finite Julian day".to_string(),
            });
        }
        let lon = self.longitude(julian_day, body);
        let speed_lon = signed_arc(
            self.longitude(julian_day - 0.5, body),
            self.longitude(julian_day + 0.5, body),
        );
        Ok(BodyPosition {
            lon,
            speed_lon,
            retrograde: speed_lon < 0.0,
        })
    }

    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        _system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        if !(-90.0..=90.0).contains(&latitude) || latitude.abs() >= 89.999 {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("latitude {:.4} has no defined ascendant", latitude),
            });
        }

        let lst = local_sidereal_time_deg(julian_day, longitude).to_radians();
        let eps = OBLIQUITY_J2000_DEG.to_radians();
        let phi = latitude.to_radians();

        let asc = f64::atan2(lst.cos(), -(lst.sin() * eps.cos() + phi.tan() * eps.sin()));
        let mc = f64::atan2(lst.sin(), lst.cos() * eps.cos());

        Ok(HouseAngles {
            asc: normalize_degrees(asc.to_degrees()),
            mc: normalize_degrees(mc.to_degrees()),
        })
    }
}

/// Greenwich mean sidereal time in degrees (Meeus eq. 12.4).
pub fn gmst_deg(julian_day: f64) -> f64 {
    let d = julian_day - J2000_JD;
    let t = d / 36_525.0;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time for an east-positive longitude, degrees.
pub fn local_sidereal_time_deg(julian_day: f64, longitude_east: f64) -> f64 {
    normalize_degrees(gmst_deg(julian_day) + longitude_east)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_at_j2000() {
        let sun = MeanEphemeris.position(J2000_JD, Body::Sun).unwrap();
        assert!((sun.lon - 280.466).abs() < 0.01);
        assert!(!sun.retrograde);
        assert!((sun.speed_lon - 0.9856).abs() < 0.001);
    }

    #[test]
    fn test_node_is_retrograde() {
        let node = MeanEphemeris.position(J2000_JD, Body::NorthNode).unwrap();
        assert!(node.retrograde);
    }

    #[test]
    fn test_all_bodies_resolve() {
        for body in Body::ALL {
            let pos = MeanEphemeris.position(2_447_000.5, body).unwrap();
            assert!((0.0..360.0).contains(&pos.lon), "{:?} -> {}", body, pos.lon);
        }
    }

    #[test]
    fn test_outer_planet_retrogrades_at_opposition() {
        // Scan a year: a superior planet must show at least one retrograde day
        let retro_days = (0..365)
            .filter(|d| {
                MeanEphemeris
                    .position(J2000_JD + *d as f64, Body::Jupiter)
                    .map(|p| p.retrograde)
                    .unwrap_or(false)
            })
            .count();
        assert!(retro_days > 60 && retro_days < 200, "got {}", retro_days);
    }

    #[test]
    fn test_gmst_at_j2000() {
        assert!((gmst_deg(J2000_JD) - 280.4606).abs() < 1e-3);
    }

    #[test]
    fn test_equatorial_angles_when_aries_culminates() {
        // Choose a longitude that puts LST at 0: MC at 0 Aries, ASC at 0 Cancer
        let lon = -gmst_deg(J2000_JD);
        let angles = MeanEphemeris
            .houses(J2000_JD, 0.0, lon, HouseSystem::Equal)
            .unwrap();
        let mc_err = angles.mc.min(360.0 - angles.mc);
        assert!(mc_err < 1e-6, "mc {}", angles.mc);
        assert!((angles.asc - 90.0).abs() < 1e-6, "asc {}", angles.asc);
    }

    #[test]
    fn test_polar_latitude_fails() {
        let result = MeanEphemeris.houses(J2000_JD, 90.0, 0.0, HouseSystem::Equal);
        assert!(matches!(result, Err(EphemerisError::HouseCalculationFailed { .. })));
    }
}
