//! Analyses that combine a chart with a second chart or a second instant.

pub mod composite;
pub mod progression;
pub mod solar_return;
pub mod synastry;
pub mod transit;

pub use composite::{compute_composite, CompositeResult, COMPOSITE_LAYER};
pub use progression::{compute_progressions, PlanetMovement, ProgressionResult, DAYS_PER_YEAR, PROGRESSED_LAYER};
pub use solar_return::{birthday_anchor, compute_solar_return, SolarReturnResult, SOLAR_RETURN_HOUR};
pub use synastry::{
    compatibility_score, compute_synastry, house_overlay, CompatibilityBand, HouseOverlay,
    SynastryResult, PARTNER_LAYER, PRIMARY_LAYER,
};
pub use transit::{active_transits, compute_transits, TransitResult, TRANSIT_LAYER};
