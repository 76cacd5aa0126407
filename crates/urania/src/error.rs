use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors that abort a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Failed to resolve ascendant/midheaven: {0}")]
    AngleResolution(#[source] EphemerisError),
    #[error("Invalid UTC instant {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}")]
    InvalidInstant {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    },
}
