use crate::aspects::Aspect;
use crate::bodies::{CelestialBody, Point};
use crate::zodiac::{Element, Modality, ZodiacFrame, ZodiacSign};
use serde::{Deserialize, Serialize};

/// Occurrence count for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally<K> {
    pub key: K,
    pub count: usize,
}

/// Summed aspect strength for one point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStrength {
    pub point: Point,
    pub name: String,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominanceProfile {
    pub frame: ZodiacFrame,
    /// Every sign of the frame, zodiac order
    pub signs: Vec<Tally<ZodiacSign>>,
    pub elements: Vec<Tally<Element>>,
    pub modalities: Vec<Tally<Modality>>,
    /// Aspect strength per point, in body order
    pub strengths: Vec<PointStrength>,
    pub dominant_sign: Option<ZodiacSign>,
    pub dominant_element: Option<Element>,
    pub dominant_modality: Option<Modality>,
    pub dominant_planet: Option<Point>,
}

impl DominanceProfile {
    pub fn strength_of(&self, point: Point) -> f64 {
        self.strengths
            .iter()
            .find(|s| s.point == point)
            .map(|s| s.strength)
            .unwrap_or(0.0)
    }

    pub fn sign_count(&self, sign: ZodiacSign) -> usize {
        self.signs
            .iter()
            .find(|t| t.key == sign)
            .map(|t| t.count)
            .unwrap_or(0)
    }
}

/// Tally signs, elements and modalities over the ten planets and the
/// Ascendant, and sum aspect strengths per point.
///
/// Every argmax keeps the first key to reach the maximum, in enumeration
/// order; an all-zero tally has no dominant key.
pub fn analyze_dominance(
    frame: ZodiacFrame,
    bodies: &[CelestialBody],
    aspects: &[Aspect],
) -> DominanceProfile {
    let counted: Vec<&CelestialBody> = bodies
        .iter()
        .filter(|b| b.is_major || b.point == Point::ASCENDANT)
        .collect();

    let signs = tally(frame.signs(), counted.iter().map(|b| b.sign));
    let elements = tally(Element::ALL.to_vec(), counted.iter().map(|b| b.sign.element()));
    let modalities = tally(Modality::ALL.to_vec(), counted.iter().map(|b| b.sign.modality()));

    let mut strengths: Vec<PointStrength> = bodies
        .iter()
        .map(|b| PointStrength {
            point: b.point,
            name: b.name.clone(),
            strength: 0.0,
        })
        .collect();
    for aspect in aspects {
        for end in [aspect.from.point, aspect.to.point] {
            if let Some(entry) = strengths.iter_mut().find(|s| s.point == end) {
                entry.strength += aspect.strength;
            }
        }
    }

    let mut dominant_planet = None;
    let mut best = 0.0;
    for entry in strengths.iter().filter(|s| s.point.is_major()) {
        if entry.strength > best {
            best = entry.strength;
            dominant_planet = Some(entry.point);
        }
    }

    DominanceProfile {
        frame,
        dominant_sign: first_max(&signs),
        dominant_element: first_max(&elements),
        dominant_modality: first_max(&modalities),
        dominant_planet,
        signs,
        elements,
        modalities,
        strengths,
    }
}

fn tally<K: Copy + PartialEq>(keys: Vec<K>, values: impl Iterator<Item = K>) -> Vec<Tally<K>> {
    let mut tallies: Vec<Tally<K>> = keys.into_iter().map(|key| Tally { key, count: 0 }).collect();
    for value in values {
        if let Some(t) = tallies.iter_mut().find(|t| t.key == value) {
            t.count += 1;
        }
    }
    tallies
}

fn first_max<K: Copy>(tallies: &[Tally<K>]) -> Option<K> {
    let mut best: Option<&Tally<K>> = None;
    for t in tallies {
        if t.count > best.map_or(0, |b| b.count) {
            best = Some(t);
        }
    }
    best.map(|t| t.key)
}
