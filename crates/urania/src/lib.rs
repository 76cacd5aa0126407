pub mod analysis;
pub mod angles;
pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod chinese;
pub mod derived;
pub mod ephemeris;
pub mod error;
pub mod geometry;
pub mod numerology;
pub mod settings;
pub mod zodiac;

pub use chart::{compute_chart, ChartInput, FrameChart, NatalChart};
pub use derived::{
    compute_composite, compute_progressions, compute_solar_return, compute_synastry,
    compute_transits,
};
pub use ephemeris::{EphemerisProvider, GeoLocation, MeanEphemeris, SwissEphemeris};
pub use error::ChartError;
pub use settings::AnalysisSettings;
pub use zodiac::ZodiacFrame;
