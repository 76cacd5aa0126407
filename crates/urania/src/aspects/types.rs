use crate::bodies::Point;
use serde::{Deserialize, Serialize};

/// The eleven recognised aspect angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quintile,
    BiQuintile,
}

impl AspectType {
    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Opposition => "Opposition",
            AspectType::Trine => "Trine",
            AspectType::Square => "Square",
            AspectType::Sextile => "Sextile",
            AspectType::Quincunx => "Quincunx",
            AspectType::SemiSextile => "Semi-sextile",
            AspectType::SemiSquare => "Semi-square",
            AspectType::Sesquiquadrate => "Sesquiquadrate",
            AspectType::Quintile => "Quintile",
            AspectType::BiQuintile => "Bi-quintile",
        }
    }

    /// Flowing aspects; the rest are treated as tension.
    pub fn is_harmonious(self) -> bool {
        matches!(
            self,
            AspectType::Conjunction
                | AspectType::Trine
                | AspectType::Sextile
                | AspectType::Quintile
                | AspectType::BiQuintile
                | AspectType::SemiSextile
        )
    }
}

/// Exact angle, allowed orb and weight of one aspect type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub aspect_type: AspectType,
    pub angle: f64,
    pub orb: f64,
    pub weight: f64,
}

/// Aspect orbs and weights, base table
pub const ASPECT_DEFINITIONS: [AspectDefinition; 11] = [
    AspectDefinition { aspect_type: AspectType::Conjunction, angle: 0.0, orb: 8.0, weight: 10.0 },
    AspectDefinition { aspect_type: AspectType::Opposition, angle: 180.0, orb: 8.0, weight: 9.0 },
    AspectDefinition { aspect_type: AspectType::Trine, angle: 120.0, orb: 8.0, weight: 8.0 },
    AspectDefinition { aspect_type: AspectType::Square, angle: 90.0, orb: 7.0, weight: 8.0 },
    AspectDefinition { aspect_type: AspectType::Sextile, angle: 60.0, orb: 6.0, weight: 6.0 },
    AspectDefinition { aspect_type: AspectType::Quincunx, angle: 150.0, orb: 3.0, weight: 4.0 },
    AspectDefinition { aspect_type: AspectType::SemiSextile, angle: 30.0, orb: 2.0, weight: 2.0 },
    AspectDefinition { aspect_type: AspectType::SemiSquare, angle: 45.0, orb: 2.0, weight: 3.0 },
    AspectDefinition { aspect_type: AspectType::Sesquiquadrate, angle: 135.0, orb: 2.0, weight: 3.0 },
    AspectDefinition { aspect_type: AspectType::Quintile, angle: 72.0, orb: 2.0, weight: 2.0 },
    AspectDefinition { aspect_type: AspectType::BiQuintile, angle: 144.0, orb: 2.0, weight: 2.0 },
];

/// Wider orbs used when the Sun or Moon takes part
pub const LUMINARY_ORBS: [(AspectType, f64); 5] = [
    (AspectType::Conjunction, 10.0),
    (AspectType::Opposition, 10.0),
    (AspectType::Trine, 10.0),
    (AspectType::Square, 9.0),
    (AspectType::Sextile, 7.0),
];

/// Aspect definitions plus luminary overrides, built once and shared
#[derive(Debug, Clone, PartialEq)]
pub struct OrbTable {
    pub definitions: Vec<AspectDefinition>,
    pub luminary_orbs: Vec<(AspectType, f64)>,
}

lazy_static::lazy_static! {
    static ref STANDARD_ORBS: OrbTable = OrbTable {
        definitions: ASPECT_DEFINITIONS.to_vec(),
        luminary_orbs: LUMINARY_ORBS.to_vec(),
    };
}

impl OrbTable {
    /// The standard table
    pub fn standard() -> &'static OrbTable {
        &STANDARD_ORBS
    }

    pub fn definition(&self, aspect_type: AspectType) -> Option<&AspectDefinition> {
        self.definitions.iter().find(|d| d.aspect_type == aspect_type)
    }

    pub fn luminary_orb(&self, aspect_type: AspectType) -> Option<f64> {
        self.luminary_orbs
            .iter()
            .find(|(t, _)| *t == aspect_type)
            .map(|(_, orb)| *orb)
    }

    /// Largest aspect weight; the ceiling of any aspect strength
    pub fn max_weight(&self) -> f64 {
        self.definitions.iter().map(|d| d.weight).fold(0.0, f64::max)
    }
}

/// Reference to one end of an aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectObjectRef {
    /// Which chart the point belongs to: "natal", "partner", "transit", ...
    pub layer_id: String,
    pub point: Point,
    pub name: String,
    pub longitude: f64,
}

/// A matched aspect between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub from: AspectObjectRef,
    pub to: AspectObjectRef,
    pub aspect_type: AspectType,
    pub exact_angle: f64,
    /// Shortest angular distance between the points
    pub separation: f64,
    /// Signed deviation: separation minus exact angle
    pub orb: f64,
    /// Weight / (1 + |orb|)
    pub strength: f64,
}

impl Aspect {
    pub fn abs_orb(&self) -> f64 {
        self.orb.abs()
    }

    pub fn involves(&self, point: Point) -> bool {
        self.from.point == point || self.to.point == point
    }

    /// True when the aspect joins `a` and `b`, in either order.
    pub fn connects(&self, a: Point, b: Point) -> bool {
        (self.from.point == a && self.to.point == b) || (self.from.point == b && self.to.point == a)
    }

    pub fn description(&self) -> String {
        format!(
            "{} {} {} (orb {:+.2}°)",
            self.from.name,
            self.aspect_type.name(),
            self.to.name,
            self.orb
        )
    }
}
