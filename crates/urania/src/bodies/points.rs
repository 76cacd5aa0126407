use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};

/// Points computed from chart angles or other points, never queried directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedPoint {
    Ascendant,
    Midheaven,
    Descendant,
    ImumCoeli,
    SouthNode,
    PartOfFortune,
}

impl DerivedPoint {
    pub fn name(self) -> &'static str {
        match self {
            DerivedPoint::Ascendant => "Ascendant",
            DerivedPoint::Midheaven => "Midheaven",
            DerivedPoint::Descendant => "Descendant",
            DerivedPoint::ImumCoeli => "Imum Coeli",
            DerivedPoint::SouthNode => "South Node",
            DerivedPoint::PartOfFortune => "Part of Fortune",
        }
    }

    /// Whether the point needs a known birth time.
    pub fn needs_birth_time(self) -> bool {
        !matches!(self, DerivedPoint::SouthNode)
    }
}

/// Anything that can be placed on the chart wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Point {
    Body(Body),
    Derived(DerivedPoint),
}

impl Point {
    pub const ASCENDANT: Point = Point::Derived(DerivedPoint::Ascendant);
    pub const MIDHEAVEN: Point = Point::Derived(DerivedPoint::Midheaven);

    pub fn name(self) -> &'static str {
        match self {
            Point::Body(body) => body.name(),
            Point::Derived(point) => point.name(),
        }
    }

    /// One of the ten classical planets
    pub fn is_major(self) -> bool {
        matches!(self, Point::Body(body) if body.is_major())
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Point::Body(body) if body.is_luminary())
    }

    pub fn body(self) -> Option<Body> {
        match self {
            Point::Body(body) => Some(body),
            Point::Derived(_) => None,
        }
    }
}

impl From<Body> for Point {
    fn from(body: Body) -> Self {
        Point::Body(body)
    }
}

impl From<DerivedPoint> for Point {
    fn from(point: DerivedPoint) -> Self {
        Point::Derived(point)
    }
}
