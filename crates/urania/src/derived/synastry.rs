use crate::aspects::{Aspect, AspectEngine, OrbTable};
use crate::bodies::Point;
use crate::chart::NatalChart;
use crate::zodiac::{find_house_equal, HousePlacement, ZodiacFrame};
use serde::{Deserialize, Serialize};

pub const PRIMARY_LAYER: &str = "primary";
pub const PARTNER_LAYER: &str = "partner";

/// Fixed text bands of the compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityBand {
    Exceptional,
    Good,
    Moderate,
    Challenging,
    Difficult,
}

impl CompatibilityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            CompatibilityBand::Exceptional
        } else if score >= 65.0 {
            CompatibilityBand::Good
        } else if score >= 50.0 {
            CompatibilityBand::Moderate
        } else if score >= 35.0 {
            CompatibilityBand::Challenging
        } else {
            CompatibilityBand::Difficult
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompatibilityBand::Exceptional => "Exceptional",
            CompatibilityBand::Good => "Good",
            CompatibilityBand::Moderate => "Moderate",
            CompatibilityBand::Challenging => "Challenging",
            CompatibilityBand::Difficult => "Difficult",
        }
    }
}

/// One chart's planet placed in the other chart's houses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseOverlay {
    pub point: Point,
    pub name: String,
    pub longitude: f64,
    pub placement: HousePlacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryResult {
    pub frame: ZodiacFrame,
    pub aspects: Vec<Aspect>,
    /// Partner planets in the primary chart's houses; `None` when the
    /// primary birth time is unknown
    pub partner_in_primary_houses: Option<Vec<HouseOverlay>>,
    pub primary_in_partner_houses: Option<Vec<HouseOverlay>>,
    /// 0-100
    pub compatibility_score: f64,
    pub compatibility: CompatibilityBand,
}

/// Compare two charts: cross aspects between their major planets with base
/// orbs only, house overlays both ways, and a compatibility score.
pub fn compute_synastry(primary: &NatalChart, partner: &NatalChart, frame: ZodiacFrame) -> SynastryResult {
    let engine = AspectEngine::standard().without_luminary_overrides();
    let aspects = engine.across(
        PRIMARY_LAYER,
        &primary.major_points(frame),
        PARTNER_LAYER,
        &partner.major_points(frame),
    );
    let compatibility_score = compatibility_score(&aspects, engine.table());

    SynastryResult {
        frame,
        partner_in_primary_houses: house_overlay(partner, primary, frame),
        primary_in_partner_houses: house_overlay(primary, partner, frame),
        compatibility: CompatibilityBand::from_score(compatibility_score),
        compatibility_score,
        aspects,
    }
}

/// Place `guest`'s major planets in `host`'s equal houses.
pub fn house_overlay(guest: &NatalChart, host: &NatalChart, frame: ZodiacFrame) -> Option<Vec<HouseOverlay>> {
    let ascendant = host.frame(frame).ascendant?;
    Some(
        guest
            .major_points(frame)
            .into_iter()
            .map(|p| HouseOverlay {
                point: p.point,
                name: p.point.name().to_string(),
                longitude: p.longitude,
                placement: find_house_equal(p.longitude, ascendant),
            })
            .collect(),
    )
}

/// Mean aspect strength against the heaviest aspect weight, as a
/// percentage. Tension aspects count at half strength.
pub fn compatibility_score(aspects: &[Aspect], table: &OrbTable) -> f64 {
    let max_weight = table.max_weight();
    if aspects.is_empty() || max_weight <= 0.0 {
        return 0.0;
    }
    let total: f64 = aspects
        .iter()
        .map(|a| {
            if a.aspect_type.is_harmonious() {
                a.strength
            } else {
                a.strength * 0.5
            }
        })
        .sum();
    (total / aspects.len() as f64 / max_weight * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(CompatibilityBand::from_score(80.0), CompatibilityBand::Exceptional);
        assert_eq!(CompatibilityBand::from_score(79.9), CompatibilityBand::Good);
        assert_eq!(CompatibilityBand::from_score(65.0), CompatibilityBand::Good);
        assert_eq!(CompatibilityBand::from_score(50.0), CompatibilityBand::Moderate);
        assert_eq!(CompatibilityBand::from_score(35.0), CompatibilityBand::Challenging);
        assert_eq!(CompatibilityBand::from_score(0.0), CompatibilityBand::Difficult);
        assert_eq!(CompatibilityBand::Challenging.label(), "Challenging");
    }

    #[test]
    fn test_empty_score_is_zero() {
        assert_eq!(compatibility_score(&[], OrbTable::standard()), 0.0);
    }
}
