use serde::{Deserialize, Serialize};

/// Transits within this many degrees of exact count as active
pub const DEFAULT_TRANSIT_ACTIVE_ORB: f64 = 2.0;
/// Solar return search half-width around the birthday, in days
pub const DEFAULT_SOLAR_RETURN_WINDOW_DAYS: i64 = 30;

/// Tunables for the derived analyses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub transit_active_orb: f64,
    pub solar_return_window_days: i64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            transit_active_orb: DEFAULT_TRANSIT_ACTIVE_ORB,
            solar_return_window_days: DEFAULT_SOLAR_RETURN_WINDOW_DAYS,
        }
    }
}
