use crate::analysis::dominance::DominanceProfile;
use crate::aspects::{Aspect, AspectType};
use crate::bodies::{CelestialBody, Point};
use serde::{Deserialize, Serialize};

/// Bodies needed for a stellium
pub const STELLIUM_MIN_BODIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    SignStellium,
    HouseStellium,
    TSquare,
}

/// A configuration of three or more major planets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectPattern {
    pub kind: PatternKind,
    pub description: String,
    pub points: Vec<Point>,
    pub score: f64,
    /// Mean absolute orb of the aspects forming the pattern
    pub orb: Option<f64>,
    /// Shared modality of a T-square, or "Mixed"
    pub modality: Option<String>,
}

/// Detect T-squares and sign/house stelliums among the major planets.
pub fn detect_patterns(
    bodies: &[CelestialBody],
    aspects: &[Aspect],
    dominance: &DominanceProfile,
) -> Vec<AspectPattern> {
    let majors: Vec<&CelestialBody> = bodies.iter().filter(|b| b.is_major).collect();
    let mut patterns = find_t_squares(&majors, aspects);
    patterns.extend(find_sign_stelliums(&majors, dominance));
    patterns.extend(find_house_stelliums(&majors, dominance));
    patterns
}

fn find_aspect<'a>(aspects: &'a [Aspect], a: Point, b: Point, kind: AspectType) -> Option<&'a Aspect> {
    aspects
        .iter()
        .find(|x| x.aspect_type == kind && x.connects(a, b))
}

fn find_t_squares(majors: &[&CelestialBody], aspects: &[Aspect]) -> Vec<AspectPattern> {
    let mut patterns = Vec::new();
    for i in 0..majors.len() {
        for j in (i + 1)..majors.len() {
            let (p1, p2) = (majors[i], majors[j]);
            let Some(opposition) = find_aspect(aspects, p1.point, p2.point, AspectType::Opposition) else {
                continue;
            };
            for (k, apex) in majors.iter().enumerate() {
                if k == i || k == j {
                    continue;
                }
                let first = find_aspect(aspects, p1.point, apex.point, AspectType::Square);
                let second = find_aspect(aspects, p2.point, apex.point, AspectType::Square);
                if let (Some(first), Some(second)) = (first, second) {
                    let trio = [opposition, first, second];
                    let modality = t_square_modality(p1, p2, apex);
                    patterns.push(AspectPattern {
                        kind: PatternKind::TSquare,
                        description: format!(
                            "T-Square: {} opposite {}, both square {} ({})",
                            p1.name, p2.name, apex.name, modality
                        ),
                        points: vec![p1.point, p2.point, apex.point],
                        score: trio.iter().map(|a| a.strength).sum(),
                        orb: Some(trio.iter().map(|a| a.abs_orb()).sum::<f64>() / 3.0),
                        modality: Some(modality),
                    });
                }
            }
        }
    }
    patterns
}

fn t_square_modality(a: &CelestialBody, b: &CelestialBody, c: &CelestialBody) -> String {
    let m = a.sign.modality();
    if b.sign.modality() == m && c.sign.modality() == m {
        m.name().to_string()
    } else {
        "Mixed".to_string()
    }
}

fn stellium(
    kind: PatternKind,
    label: String,
    members: Vec<&CelestialBody>,
    dominance: &DominanceProfile,
) -> AspectPattern {
    let names: Vec<&str> = members.iter().map(|b| b.name.as_str()).collect();
    AspectPattern {
        kind,
        description: format!("Stellium in {}: {}", label, names.join(", ")),
        points: members.iter().map(|b| b.point).collect(),
        score: members.iter().map(|b| dominance.strength_of(b.point)).sum(),
        orb: None,
        modality: None,
    }
}

fn find_sign_stelliums(majors: &[&CelestialBody], dominance: &DominanceProfile) -> Vec<AspectPattern> {
    dominance
        .frame
        .signs()
        .into_iter()
        .filter_map(|sign| {
            let members: Vec<&CelestialBody> =
                majors.iter().copied().filter(|b| b.sign == sign).collect();
            (members.len() >= STELLIUM_MIN_BODIES)
                .then(|| stellium(PatternKind::SignStellium, sign.name().to_string(), members, dominance))
        })
        .collect()
}

fn find_house_stelliums(majors: &[&CelestialBody], dominance: &DominanceProfile) -> Vec<AspectPattern> {
    (1..=12u8)
        .filter_map(|house| {
            let members: Vec<&CelestialBody> = majors
                .iter()
                .copied()
                .filter(|b| b.house.map(|h| h.house) == Some(house))
                .collect();
            (members.len() >= STELLIUM_MIN_BODIES).then(|| {
                stellium(PatternKind::HouseStellium, format!("House {}", house), members, dominance)
            })
        })
        .collect()
}
