use crate::bodies::Point;
use crate::chart::{compute_chart, ChartInput, NatalChart};
use crate::ephemeris::{julian_day, Body, EphemerisProvider};
use crate::geometry::{angular_separation, to_sidereal};
use crate::settings::AnalysisSettings;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Hour of day (UTC) every candidate date is sampled at
pub const SOLAR_RETURN_HOUR: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarReturnResult {
    pub year: i32,
    /// Located day, at noon UTC
    pub date: DateTime<Utc>,
    pub julian_day: f64,
    /// Natal Sun, sidereal. `None` if the natal chart has no Sun.
    pub natal_sun: Option<f64>,
    /// Sun on the located day, sidereal with the natal ayanamsa. `None` if
    /// no day in the window could be computed.
    pub return_sun: Option<f64>,
    /// Angular distance between the two, degrees
    pub difference: Option<f64>,
    /// Chart for the located day at the natal location
    pub chart: Option<NatalChart>,
}

impl SolarReturnResult {
    /// A return that could not be located: the birthday anchor and nothing else.
    fn unlocated(year: i32, anchor: DateTime<Utc>, natal_sun: Option<f64>) -> Self {
        Self {
            year,
            date: anchor,
            julian_day: julian_day(anchor),
            natal_sun,
            return_sun: None,
            difference: None,
            chart: None,
        }
    }
}

/// Birthday in `year`, noon UTC.
///
/// A day missing from that month (29 February) is clamped to the month's
/// last day. A year outside the calendar range falls back to the birth
/// instant itself.
pub fn birthday_anchor(natal: &NatalChart, year: i32) -> DateTime<Utc> {
    let birth = natal.context.datetime;
    (1..=birth.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, birth.month(), day))
        .and_then(|date| date.and_hms_opt(SOLAR_RETURN_HOUR, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(birth)
}

/// Locate the day in `year` whose Sun is closest to the natal Sun.
///
/// Days within the settings window around the birthday are sampled once
/// each at noon UTC; the earliest of equally close days wins. Never fails:
/// without a natal Sun, or when no day can be computed, the birthday anchor
/// is returned with the Sun fields left empty.
pub fn compute_solar_return(
    ephemeris: &dyn EphemerisProvider,
    natal: &NatalChart,
    year: i32,
    settings: &AnalysisSettings,
) -> SolarReturnResult {
    let anchor = birthday_anchor(natal, year);
    let natal_sun = match natal.point(Point::Body(Body::Sun)) {
        Some(sun) => sun.sidereal,
        None => {
            warn!("Solar return {}: natal chart has no Sun", year);
            return SolarReturnResult::unlocated(year, anchor, None);
        }
    };
    let ayanamsa = natal.context.ayanamsa;

    let window = settings.solar_return_window_days.max(0);
    let mut best: Option<(DateTime<Utc>, f64, f64)> = None;
    for offset in -window..=window {
        let candidate = anchor + Duration::days(offset);
        let sun = match ephemeris.position(julian_day(candidate), Body::Sun) {
            Ok(pos) => to_sidereal(pos.lon, ayanamsa),
            Err(e) => {
                warn!("Solar return: skipping {}: {}", candidate.date_naive(), e);
                continue;
            }
        };
        let difference = angular_separation(sun, natal_sun);
        if best.map_or(true, |(_, _, d)| difference < d) {
            best = Some((candidate, sun, difference));
        }
    }

    let Some((date, return_sun, difference)) = best else {
        warn!("Solar return {}: no day in the window could be computed", year);
        return SolarReturnResult::unlocated(year, anchor, Some(natal_sun));
    };
    debug!("Solar return {} located at {}", year, date.date_naive());

    let chart = match compute_chart(ephemeris, &ChartInput::new(date, natal.context.location, true)) {
        Ok(chart) => Some(chart),
        Err(e) => {
            warn!("Solar return chart for {} failed: {}", date.date_naive(), e);
            None
        }
    };

    SolarReturnResult {
        year,
        date,
        julian_day: julian_day(date),
        natal_sun: Some(natal_sun),
        return_sun: Some(return_sun),
        difference: Some(difference),
        chart,
    }
}
