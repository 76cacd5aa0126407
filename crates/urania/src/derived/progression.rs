use crate::angles::{resolve_angles, ChartAngles};
use crate::aspects::{Aspect, AspectEngine, AspectPoint};
use crate::bodies::{classify_all, find_point, resolve_bodies, CelestialBody, Point};
use crate::chart::{NatalChart, NATAL_LAYER};
use crate::ephemeris::{Body, EphemerisProvider};
use crate::geometry::signed_arc;
use crate::zodiac::{ZodiacFrame, ZodiacSign};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const PROGRESSED_LAYER: &str = "progressed";
/// One day of motion per year of life
pub const DAYS_PER_YEAR: f64 = 365.25;

/// How far a planet has moved from its natal place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetMovement {
    pub point: Point,
    pub name: String,
    pub natal_longitude: f64,
    pub progressed_longitude: f64,
    /// Shortest signed arc natal to progressed, degrees
    pub delta: f64,
    pub natal_sign: ZodiacSign,
    pub progressed_sign: ZodiacSign,
    pub sign_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    pub target: DateTime<Utc>,
    /// Whole days lived at the target date
    pub elapsed_days: i64,
    /// Days added to the birth moment
    pub offset_days: f64,
    pub progressed_julian_day: f64,
    /// Progressed planets, sidereal frame with the natal ayanamsa
    pub positions: Vec<CelestialBody>,
    pub movements: Vec<PlanetMovement>,
    /// Progressed angles at the birth location, when the birth time is known
    pub angles: Option<ChartAngles>,
    pub aspects: Vec<Aspect>,
}

/// Secondary progression: one day after birth for each year lived.
///
/// Never fails; progressed angles are left out if they cannot be resolved.
pub fn compute_progressions(
    ephemeris: &dyn EphemerisProvider,
    natal: &NatalChart,
    target: DateTime<Utc>,
) -> ProgressionResult {
    let ctx = &natal.context;
    let frame = ZodiacFrame::Sidereal;
    let elapsed_days = (target - ctx.datetime).num_days();
    let offset_days = elapsed_days as f64 / DAYS_PER_YEAR;
    let progressed_jd = ctx.julian_day + offset_days;

    let resolved = resolve_bodies(ephemeris, progressed_jd, ctx.ayanamsa, &Body::CLASSICAL);

    let angles = if ctx.time_known {
        match resolve_angles(ephemeris, progressed_jd, ctx.location, ctx.ayanamsa) {
            Ok(angles) => Some(angles),
            Err(e) => {
                warn!("Progressed angles unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    let movements: Vec<PlanetMovement> = resolved
        .iter()
        .filter_map(|p| {
            let natal_point = find_point(&natal.points, p.point)?;
            let natal_longitude = natal_point.longitude(frame);
            let progressed_longitude = p.longitude(frame);
            let natal_sign = frame.sign_of(natal_longitude);
            let progressed_sign = frame.sign_of(progressed_longitude);
            Some(PlanetMovement {
                point: p.point,
                name: p.point.name().to_string(),
                natal_longitude,
                progressed_longitude,
                delta: signed_arc(natal_longitude, progressed_longitude),
                natal_sign,
                progressed_sign,
                sign_changed: natal_sign != progressed_sign,
            })
        })
        .collect();

    let progressed: Vec<AspectPoint> = resolved
        .iter()
        .map(|p| AspectPoint::from_resolved(p, frame))
        .collect();
    let aspects = AspectEngine::standard().across(
        PROGRESSED_LAYER,
        &progressed,
        NATAL_LAYER,
        &natal.major_points(frame),
    );

    debug!(
        "Progressed {} days ({:.3} offset): {} movements, {} aspects",
        elapsed_days,
        offset_days,
        movements.len(),
        aspects.len()
    );

    ProgressionResult {
        target,
        elapsed_days,
        offset_days,
        progressed_julian_day: progressed_jd,
        positions: classify_all(
            &resolved,
            frame,
            angles.map(|a| a.sidereal_ascendant),
        ),
        movements,
        angles,
        aspects,
    }
}
