use crate::analysis::{analyze_dominance, detect_patterns, AspectPattern, DominanceProfile};
use crate::aspects::{Aspect, AspectEngine, AspectPoint};
use crate::bodies::{
    classify_all, find_point, resolve_points, CelestialBody, DerivedPoint, Point, ResolvedPoint,
};
use crate::chart::context::{build_context, ChartContext, ChartInput};
use crate::chinese::ChineseZodiac;
use crate::ephemeris::EphemerisProvider;
use crate::error::ChartError;
use crate::numerology::Numerology;
use crate::zodiac::{house_cusp, ZodiacFrame};
use chrono::Datelike;
use log::debug;
use serde::{Deserialize, Serialize};

/// Layer id of natal points in aspect references
pub const NATAL_LAYER: &str = "natal";

/// Positions, aspects, patterns and dominance in one zodiac frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameChart {
    pub frame: ZodiacFrame,
    /// Ascendant in this frame, when the birth time is known
    pub ascendant: Option<f64>,
    /// Equal-house cusps 1-12, empty without an ascendant
    pub cusps: Vec<f64>,
    pub bodies: Vec<CelestialBody>,
    pub aspects: Vec<Aspect>,
    pub patterns: Vec<AspectPattern>,
    pub dominance: DominanceProfile,
}

impl FrameChart {
    pub fn body(&self, point: Point) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.point == point)
    }

    pub fn major_bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter().filter(|b| b.is_major)
    }
}

/// A complete chart. Built once by [`compute_chart`] and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub context: ChartContext,
    /// Every resolved point with both longitudes
    pub points: Vec<ResolvedPoint>,
    pub tropical: FrameChart,
    pub sidereal: FrameChart,
    pub numerology: Numerology,
    pub chinese_zodiac: ChineseZodiac,
}

impl NatalChart {
    pub fn frame(&self, frame: ZodiacFrame) -> &FrameChart {
        match frame {
            ZodiacFrame::Tropical => &self.tropical,
            ZodiacFrame::Sidereal => &self.sidereal,
        }
    }

    pub fn point(&self, point: Point) -> Option<&ResolvedPoint> {
        find_point(&self.points, point)
    }

    /// Major planets in one frame, in body order.
    pub fn major_points(&self, frame: ZodiacFrame) -> Vec<AspectPoint> {
        self.points
            .iter()
            .filter(|p| p.point.is_major())
            .map(|p| AspectPoint::from_resolved(p, frame))
            .collect()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Points natal aspects are found between: the ten planets plus the
/// Ascendant and Midheaven when present.
pub fn natal_aspect_points(points: &[ResolvedPoint], frame: ZodiacFrame) -> Vec<AspectPoint> {
    points
        .iter()
        .filter(|p| {
            p.point.is_major()
                || p.point == Point::Derived(DerivedPoint::Ascendant)
                || p.point == Point::Derived(DerivedPoint::Midheaven)
        })
        .map(|p| AspectPoint::from_resolved(p, frame))
        .collect()
}

/// Classify, aspect, and analyse resolved points in one frame.
pub fn assemble_frame(points: &[ResolvedPoint], frame: ZodiacFrame, ascendant: Option<f64>) -> FrameChart {
    let bodies = classify_all(points, frame, ascendant);
    let aspects = AspectEngine::standard().within(NATAL_LAYER, &natal_aspect_points(points, frame));
    let dominance = analyze_dominance(frame, &bodies, &aspects);
    let patterns = detect_patterns(&bodies, &aspects, &dominance);
    let cusps = ascendant
        .map(|asc| (1..=12).map(|h| house_cusp(h, asc)).collect())
        .unwrap_or_default();

    debug!(
        "Assembled {:?} frame: {} bodies, {} aspects, {} patterns",
        frame,
        bodies.len(),
        aspects.len(),
        patterns.len()
    );

    FrameChart {
        frame,
        ascendant,
        cusps,
        bodies,
        aspects,
        patterns,
        dominance,
    }
}

/// Compute a chart: context, points, then each frame.
///
/// Fails only when the angles cannot be resolved for a chart with a known
/// birth time. Bodies the ephemeris cannot place are left out.
pub fn compute_chart(ephemeris: &dyn EphemerisProvider, input: &ChartInput) -> Result<NatalChart, ChartError> {
    let context = build_context(ephemeris, input)?;
    let points = resolve_points(ephemeris, &context);
    let tropical = assemble_frame(&points, ZodiacFrame::Tropical, context.tropical_ascendant());
    let sidereal = assemble_frame(&points, ZodiacFrame::Sidereal, context.sidereal_ascendant());
    let date = context.datetime.date_naive();

    Ok(NatalChart {
        numerology: Numerology::for_date(date),
        chinese_zodiac: ChineseZodiac::for_year(date.year()),
        context,
        points,
        tropical,
        sidereal,
    })
}
