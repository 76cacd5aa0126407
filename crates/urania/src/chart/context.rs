use crate::angles::{ayanamsa_for_year, resolve_angles, ChartAngles};
use crate::ephemeris::{julian_day, EphemerisProvider, GeoLocation};
use crate::error::ChartError;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Event instant and place a chart is cast for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    pub datetime: DateTime<Utc>,
    pub location: GeoLocation,
    /// When false, houses, angles and angle-based points are left out
    pub time_known: bool,
}

impl ChartInput {
    pub fn new(datetime: DateTime<Utc>, location: GeoLocation, time_known: bool) -> Self {
        Self {
            datetime,
            location,
            time_known,
        }
    }

    /// Build from UTC calendar fields. Fields are expected to be valid
    /// already; an impossible date is reported rather than corrected.
    #[allow(clippy::too_many_arguments)]
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        latitude: f64,
        longitude: f64,
        time_known: bool,
    ) -> Result<Self, ChartError> {
        let datetime = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .ok_or(ChartError::InvalidInstant {
                year,
                month,
                day,
                hour,
                minute,
            })?;
        Ok(Self::new(
            datetime,
            GeoLocation {
                lat: latitude,
                lon: longitude,
            },
            time_known,
        ))
    }
}

/// Per-chart constants shared by every later stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartContext {
    pub datetime: DateTime<Utc>,
    pub location: GeoLocation,
    pub time_known: bool,
    pub julian_day: f64,
    pub ayanamsa: f64,
    /// Absent when the birth time is unknown
    pub angles: Option<ChartAngles>,
    pub is_day_birth: bool,
}

impl ChartContext {
    pub fn tropical_ascendant(&self) -> Option<f64> {
        self.angles.map(|a| a.tropical_ascendant)
    }

    pub fn sidereal_ascendant(&self) -> Option<f64> {
        self.angles.map(|a| a.sidereal_ascendant)
    }
}

/// Resolve the context for a chart. Angle failure aborts the chart.
pub fn build_context(
    ephemeris: &dyn EphemerisProvider,
    input: &ChartInput,
) -> Result<ChartContext, ChartError> {
    let jd = julian_day(input.datetime);
    let ayanamsa = ayanamsa_for_year(input.datetime.year());
    let angles = if input.time_known {
        Some(resolve_angles(ephemeris, jd, input.location, ayanamsa)?)
    } else {
        None
    };

    Ok(ChartContext {
        datetime: input.datetime,
        location: input.location,
        time_known: input.time_known,
        julian_day: jd,
        ayanamsa,
        angles,
        is_day_birth: is_day_birth(input.datetime, input.location.lon),
    })
}

/// Day/night by clock: local mean hour in [6, 18) counts as day.
///
/// Local mean time is UTC shifted by longitude / 15 hours; true sunrise and
/// sunset are not consulted.
pub fn is_day_birth(datetime: DateTime<Utc>, longitude: f64) -> bool {
    let utc_hours = datetime.hour() as f64 + datetime.minute() as f64 / 60.0;
    let local_hour = (utc_hours + longitude / 15.0).rem_euclid(24.0);
    (6.0..18.0).contains(&local_hour)
}
