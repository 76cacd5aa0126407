use crate::bodies::points::{DerivedPoint, Point};
use crate::chart::context::ChartContext;
use crate::ephemeris::{Body, EphemerisProvider};
use crate::geometry::{normalize_degrees, to_sidereal};
use crate::zodiac::{find_house_equal, HousePlacement, ZodiacFrame, ZodiacSign};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A point's longitude in both frames, before classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPoint {
    pub point: Point,
    pub tropical: f64,
    pub sidereal: f64,
    pub retrograde: bool,
}

impl ResolvedPoint {
    /// Sidereal longitude follows from the tropical one and the ayanamsa.
    pub fn new(point: Point, tropical: f64, ayanamsa: f64, retrograde: bool) -> Self {
        let tropical = normalize_degrees(tropical);
        Self {
            point,
            tropical,
            sidereal: to_sidereal(tropical, ayanamsa),
            retrograde,
        }
    }

    /// Both frames supplied independently, e.g. for sums of angles.
    pub fn from_frames(point: Point, tropical: f64, sidereal: f64, retrograde: bool) -> Self {
        Self {
            point,
            tropical: normalize_degrees(tropical),
            sidereal: normalize_degrees(sidereal),
            retrograde,
        }
    }

    pub fn longitude(&self, frame: ZodiacFrame) -> f64 {
        match frame {
            ZodiacFrame::Tropical => self.tropical,
            ZodiacFrame::Sidereal => self.sidereal,
        }
    }
}

/// A point classified into one frame's sign and house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub point: Point,
    pub name: String,
    pub frame: ZodiacFrame,
    /// Longitude in this frame, [0, 360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// Share of the sign already traversed, percent
    pub sign_percentage: f64,
    pub retrograde: bool,
    /// Absent when the birth time is unknown
    pub house: Option<HousePlacement>,
    pub formatted: String,
    pub is_major: bool,
}

/// Query the ephemeris for each body. Bodies the ephemeris cannot place are
/// logged and left out; the rest still resolve.
pub fn resolve_bodies(
    ephemeris: &dyn EphemerisProvider,
    julian_day: f64,
    ayanamsa: f64,
    bodies: &[Body],
) -> Vec<ResolvedPoint> {
    bodies
        .iter()
        .filter_map(|&body| match ephemeris.position(julian_day, body) {
            Ok(pos) => Some(ResolvedPoint::new(
                Point::Body(body),
                pos.lon,
                ayanamsa,
                pos.retrograde,
            )),
            Err(e) => {
                warn!("Skipping {}: {}", body.name(), e);
                None
            }
        })
        .collect()
}

/// Resolve every tracked body and derived point for a chart.
pub fn resolve_points(ephemeris: &dyn EphemerisProvider, ctx: &ChartContext) -> Vec<ResolvedPoint> {
    let mut points = resolve_bodies(ephemeris, ctx.julian_day, ctx.ayanamsa, &Body::ALL);
    let derived = derive_points(&points, ctx);
    points.extend(derived);
    debug!(
        "Resolved {} points at JD {:.5} (time known: {})",
        points.len(),
        ctx.julian_day,
        ctx.time_known
    );
    points
}

/// Points that follow from the angles and already-resolved bodies.
///
/// Descendant, Imum Coeli and the South Node sit opposite their sources.
/// Part of Fortune is Ascendant + Moon - Sun by day and Ascendant + Sun -
/// Moon by night, taken in each frame.
pub fn derive_points(resolved: &[ResolvedPoint], ctx: &ChartContext) -> Vec<ResolvedPoint> {
    let mut derived = Vec::new();

    if let Some(angles) = ctx.angles {
        derived.push(ResolvedPoint::from_frames(
            DerivedPoint::Ascendant.into(),
            angles.tropical_ascendant,
            angles.sidereal_ascendant,
            false,
        ));
        derived.push(ResolvedPoint::from_frames(
            DerivedPoint::Midheaven.into(),
            angles.tropical_midheaven,
            angles.sidereal_midheaven,
            false,
        ));
        derived.push(ResolvedPoint::from_frames(
            DerivedPoint::Descendant.into(),
            angles.tropical_ascendant + 180.0,
            angles.sidereal_ascendant + 180.0,
            false,
        ));
        derived.push(ResolvedPoint::from_frames(
            DerivedPoint::ImumCoeli.into(),
            angles.tropical_midheaven + 180.0,
            angles.sidereal_midheaven + 180.0,
            false,
        ));
    }

    if let Some(node) = find_point(resolved, Body::NorthNode.into()) {
        derived.push(ResolvedPoint::from_frames(
            DerivedPoint::SouthNode.into(),
            node.tropical + 180.0,
            node.sidereal + 180.0,
            node.retrograde,
        ));
    }

    let sun = find_point(resolved, Body::Sun.into());
    let moon = find_point(resolved, Body::Moon.into());
    if let (Some(angles), Some(sun), Some(moon)) = (ctx.angles, sun, moon) {
        let (tropical, sidereal) = if ctx.is_day_birth {
            (
                angles.tropical_ascendant + moon.tropical - sun.tropical,
                angles.sidereal_ascendant + moon.sidereal - sun.sidereal,
            )
        } else {
            (
                angles.tropical_ascendant + sun.tropical - moon.tropical,
                angles.sidereal_ascendant + sun.sidereal - moon.sidereal,
            )
        };
        derived.push(ResolvedPoint::from_frames(
            DerivedPoint::PartOfFortune.into(),
            tropical,
            sidereal,
            false,
        ));
    }

    if !ctx.time_known {
        derived.retain(|p| match p.point {
            Point::Derived(d) => !d.needs_birth_time(),
            Point::Body(_) => true,
        });
    }

    derived
}

pub fn find_point(points: &[ResolvedPoint], point: Point) -> Option<&ResolvedPoint> {
    points.iter().find(|p| p.point == point)
}

/// Classify a resolved point in one frame. Houses are measured from
/// `ascendant`, which must be in the same frame.
pub fn classify(resolved: &ResolvedPoint, frame: ZodiacFrame, ascendant: Option<f64>) -> CelestialBody {
    let longitude = resolved.longitude(frame);
    CelestialBody {
        point: resolved.point,
        name: resolved.point.name().to_string(),
        frame,
        longitude,
        sign: frame.sign_of(longitude),
        sign_percentage: frame.sign_percentage(longitude),
        retrograde: resolved.retrograde,
        house: ascendant.map(|asc| find_house_equal(longitude, asc)),
        formatted: format_position(longitude, frame, resolved.retrograde),
        is_major: resolved.point.is_major(),
    }
}

pub fn classify_all(
    points: &[ResolvedPoint],
    frame: ZodiacFrame,
    ascendant: Option<f64>,
) -> Vec<CelestialBody> {
    points.iter().map(|p| classify(p, frame, ascendant)).collect()
}

/// Render a longitude as degrees and minutes inside its sign, e.g.
/// `"07°24' Leo"`, with a trailing `" R"` when retrograde.
pub fn format_position(longitude: f64, frame: ZodiacFrame, retrograde: bool) -> String {
    let sign = frame.sign_of(longitude);
    // Absorb float residue such as 0.7 deg -> 41.99999 minutes
    let minutes = (frame.degrees_in_sign(longitude) * 60.0 + 1e-9).floor();
    let last_minute = (frame.sign_width(longitude) * 60.0).ceil() - 1.0;
    let total_minutes = minutes.clamp(0.0, last_minute) as u32;
    let mut formatted = format!("{:02}°{:02}' {}", total_minutes / 60, total_minutes % 60, sign.name());
    if retrograde {
        formatted.push_str(" R");
    }
    formatted
}
