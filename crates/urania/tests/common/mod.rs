#![allow(dead_code)]

use std::collections::HashMap;
use urania::ephemeris::{Body, BodyPosition, EphemerisError, EphemerisProvider, HouseAngles, HouseSystem};
use urania::geometry::normalize_degrees;

/// Deterministic ephemeris for tests: each body starts at a fixed longitude
/// at `epoch_jd` and moves linearly at its own speed.
#[derive(Debug, Clone)]
pub struct StubEphemeris {
    pub epoch_jd: f64,
    pub longitudes: HashMap<Body, f64>,
    pub speeds: HashMap<Body, f64>,
    pub failing: Vec<Body>,
    /// `None` makes the house function fail
    pub angles: Option<(f64, f64)>,
}

impl StubEphemeris {
    pub fn new(epoch_jd: f64) -> Self {
        Self {
            epoch_jd,
            longitudes: HashMap::new(),
            speeds: HashMap::new(),
            failing: Vec::new(),
            angles: Some((0.0, 270.0)),
        }
    }

    pub fn with_body(mut self, body: Body, longitude: f64) -> Self {
        self.longitudes.insert(body, longitude);
        self
    }

    pub fn with_speed(mut self, body: Body, degrees_per_day: f64) -> Self {
        self.speeds.insert(body, degrees_per_day);
        self
    }

    pub fn with_angles(mut self, asc: f64, mc: f64) -> Self {
        self.angles = Some((asc, mc));
        self
    }

    pub fn failing_houses(mut self) -> Self {
        self.angles = None;
        self
    }

    pub fn failing_body(mut self, body: Body) -> Self {
        self.failing.push(body);
        self
    }

    /// Every tracked body, 20 degrees apart from 5 Aries.
    pub fn spread(epoch_jd: f64) -> Self {
        Body::ALL
            .iter()
            .enumerate()
            .fold(Self::new(epoch_jd), |stub, (i, &body)| {
                stub.with_body(body, 5.0 + i as f64 * 20.0)
            })
    }
}

impl EphemerisProvider for StubEphemeris {
    fn position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        let start = match self.longitudes.get(&body) {
            Some(lon) if !self.failing.contains(&body) => *lon,
            _ => {
                return Err(EphemerisError::CalculationFailed {
                    body: body.name().to_string(),
                    julian_day,
                    message: "stub has no position".to_string(),
                })
            }
        };
        let speed = self.speeds.get(&body).copied().unwrap_or(0.0);
        Ok(BodyPosition {
            lon: normalize_degrees(start + speed * (julian_day - self.epoch_jd)),
            speed_lon: speed,
            retrograde: speed < 0.0,
        })
    }

    fn houses(
        &self,
        _julian_day: f64,
        _latitude: f64,
        _longitude: f64,
        _system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        self.angles
            .map(|(asc, mc)| HouseAngles { asc, mc })
            .ok_or_else(|| EphemerisError::HouseCalculationFailed {
                message: "stub has no houses".to_string(),
            })
    }
}
