pub mod adapter;
pub mod error;
pub mod mean;
pub mod time;
pub mod types;

pub use adapter::SwissEphemeris;
pub use error::EphemerisError;
pub use mean::MeanEphemeris;
pub use time::{datetime_from_julian_day, julian_day};
pub use types::{Body, BodyPosition, GeoLocation, HouseAngles, HouseSystem};

/// Numerical source of body positions and chart angles.
///
/// Implementations must be deterministic and free of per-call side effects;
/// chart computation may call them from any thread.
pub trait EphemerisProvider {
    /// Tropical longitude and direction of `body` at `julian_day` (UT).
    fn position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError>;

    /// Tropical ascendant and midheaven for an observer.
    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError>;
}
