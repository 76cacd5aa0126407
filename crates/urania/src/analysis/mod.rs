pub mod dominance;
pub mod patterns;

pub use dominance::{analyze_dominance, DominanceProfile, PointStrength, Tally};
pub use patterns::{detect_patterns, AspectPattern, PatternKind, STELLIUM_MIN_BODIES};
