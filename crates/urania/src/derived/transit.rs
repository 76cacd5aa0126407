use crate::aspects::{Aspect, AspectEngine, AspectPoint};
use crate::bodies::{classify_all, resolve_bodies, CelestialBody};
use crate::chart::{NatalChart, NATAL_LAYER};
use crate::ephemeris::{julian_day, Body, EphemerisProvider};
use crate::settings::AnalysisSettings;
use crate::zodiac::ZodiacFrame;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

pub const TRANSIT_LAYER: &str = "transit";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitResult {
    pub target: DateTime<Utc>,
    pub julian_day: f64,
    /// Transiting planets in the natal sidereal frame, housed by the natal
    /// ascendant when known
    pub positions: Vec<CelestialBody>,
    pub aspects: Vec<Aspect>,
    /// Aspects within the active orb, whatever their type
    pub active: Vec<Aspect>,
}

/// Planets at `target` (now when `None`) against the natal planets.
///
/// Transiting longitudes use the natal ayanamsa so both sets share one
/// sidereal frame.
pub fn compute_transits(
    ephemeris: &dyn EphemerisProvider,
    natal: &NatalChart,
    target: Option<DateTime<Utc>>,
    settings: &AnalysisSettings,
) -> TransitResult {
    let target = target.unwrap_or_else(Utc::now);
    let jd = julian_day(target);
    let frame = ZodiacFrame::Sidereal;

    let resolved = resolve_bodies(ephemeris, jd, natal.context.ayanamsa, &Body::CLASSICAL);
    let positions = classify_all(&resolved, frame, natal.context.sidereal_ascendant());
    let transiting: Vec<AspectPoint> = resolved
        .iter()
        .map(|p| AspectPoint::from_resolved(p, frame))
        .collect();

    let aspects = AspectEngine::standard().across(
        TRANSIT_LAYER,
        &transiting,
        NATAL_LAYER,
        &natal.major_points(frame),
    );
    let active = active_transits(&aspects, settings.transit_active_orb);
    debug!(
        "Transits at {}: {} aspects, {} active",
        target,
        aspects.len(),
        active.len()
    );

    TransitResult {
        target,
        julian_day: jd,
        positions,
        aspects,
        active,
    }
}

pub fn active_transits(aspects: &[Aspect], max_orb: f64) -> Vec<Aspect> {
    aspects
        .iter()
        .filter(|a| a.abs_orb() <= max_orb)
        .cloned()
        .collect()
}
