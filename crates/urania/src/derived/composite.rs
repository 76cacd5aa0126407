use crate::aspects::{Aspect, AspectEngine, AspectPoint};
use crate::bodies::{classify, CelestialBody, Point, ResolvedPoint};
use crate::chart::NatalChart;
use crate::geometry::calculate_midpoint;
use crate::zodiac::ZodiacFrame;
use serde::{Deserialize, Serialize};

pub const COMPOSITE_LAYER: &str = "composite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub frame: ZodiacFrame,
    /// Midpoint planets, then the midpoint ascendant when both charts have one
    pub bodies: Vec<CelestialBody>,
    pub ascendant: Option<f64>,
    pub aspects: Vec<Aspect>,
}

/// Build a midpoint chart from two charts and find aspects within it.
///
/// Only planets present in both charts are synthesised.
pub fn compute_composite(a: &NatalChart, b: &NatalChart, frame: ZodiacFrame) -> CompositeResult {
    let b_points = b.major_points(frame);
    let mut points: Vec<AspectPoint> = a
        .major_points(frame)
        .into_iter()
        .filter_map(|pa| {
            b_points
                .iter()
                .find(|pb| pb.point == pa.point)
                .map(|pb| AspectPoint::new(pa.point, calculate_midpoint(pa.longitude, pb.longitude)))
        })
        .collect();

    let ascendant = match (a.frame(frame).ascendant, b.frame(frame).ascendant) {
        (Some(asc_a), Some(asc_b)) => Some(calculate_midpoint(asc_a, asc_b)),
        _ => None,
    };
    if let Some(asc) = ascendant {
        points.push(AspectPoint::new(Point::ASCENDANT, asc));
    }

    let aspects = AspectEngine::standard().within(COMPOSITE_LAYER, &points);
    let bodies = points
        .iter()
        .map(|p| composite_body(p, frame, ascendant))
        .collect();

    CompositeResult {
        frame,
        bodies,
        ascendant,
        aspects,
    }
}

fn composite_body(p: &AspectPoint, frame: ZodiacFrame, ascendant: Option<f64>) -> CelestialBody {
    // Only the requested frame is meaningful for a midpoint
    let resolved = ResolvedPoint::from_frames(p.point, p.longitude, p.longitude, false);
    classify(&resolved, frame, ascendant)
}
