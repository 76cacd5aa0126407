use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{Body, BodyPosition, HouseAngles, HouseSystem};
use crate::ephemeris::EphemerisProvider;
use crate::geometry::normalize_degrees;
use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;
use swisseph::swe::{calc_ut, houses_ex};
use swisseph::AscMc;

/// Data directory used when neither the caller nor the environment names one
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Environment variable consulted for the data directory
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

// FLG_SWIEPH = 2 (use Swiss Ephemeris files), FLG_SPEED = 256 (fill in daily motion)
const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;

static EPHEMERIS_PATH_INIT: Once = Once::new();

/// Swiss Ephemeris backed provider
#[derive(Debug, Clone)]
pub struct SwissEphemeris {
    ephemeris_path: PathBuf,
}

impl SwissEphemeris {
    /// Create a provider with an optional data directory.
    ///
    /// The Swiss library keeps its search path in process-wide state, so the
    /// first successful construction fixes it for the lifetime of the process.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var(EPHEMERIS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        install_ephemeris_path(&path);

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

/// Hand the data directory to the Swiss library exactly once.
///
/// The library reads `SE_EPHE_PATH` the first time it opens a data file.
fn install_ephemeris_path(path: &Path) {
    EPHEMERIS_PATH_INIT.call_once(|| {
        info!("Swiss Ephemeris data path: {}", path.display());
        env::set_var("SE_EPHE_PATH", path);
    });
}

impl EphemerisProvider for SwissEphemeris {
    fn position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        let flags = FLG_SWIEPH | FLG_SPEED;
        let result = calc_ut(julian_day, body.swiss_id() as u32, flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        let longitude = out[0];
        let speed_longitude = out[3];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day,
                message: "non-finite longitude".to_string(),
            });
        }

        debug!("{} at JD {:.5}: {:.4}", body.name(), julian_day, longitude);
        Ok(BodyPosition {
            lon: normalize_degrees(longitude),
            speed_lon: speed_longitude,
            retrograde: speed_longitude < 0.0,
        })
    }

    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        let (_cusps, a) = houses_ex(julian_day, FLG_SWIEPH, latitude, longitude, system.code() as i32);
        let ascmc = AscMc::from_array(a);

        if !ascmc.ascendant.is_finite() || !ascmc.mc.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "no ascendant for lat {:.4}, lon {:.4} at JD {:.5}",
                    latitude, longitude, julian_day
                ),
            });
        }

        Ok(HouseAngles {
            asc: normalize_degrees(ascmc.ascendant),
            mc: normalize_degrees(ascmc.mc),
        })
    }
}
