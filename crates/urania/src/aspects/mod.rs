pub mod calculator;
pub mod types;

pub use calculator::{AspectEngine, AspectPoint, PointPairing};
pub use types::{
    Aspect, AspectDefinition, AspectObjectRef, AspectType, OrbTable, ASPECT_DEFINITIONS,
    LUMINARY_ORBS,
};
