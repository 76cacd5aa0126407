use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use urania::settings::{DEFAULT_SOLAR_RETURN_WINDOW_DAYS, DEFAULT_TRANSIT_ACTIVE_ORB};
use urania::{AnalysisSettings, GeoLocation};

/// Relative paths tried when no config path is given
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UraniaConfig {
    /// Swiss Ephemeris data directory; `None` defers to the environment
    pub ephemeris_path: Option<PathBuf>,
    /// Location used when a command gives none
    pub default_location: Option<GeoLocation>,
    pub analysis: AnalysisSettings,
    /// File the values came from, if any
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationToml {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalysisToml {
    #[serde(default = "default_transit_active_orb")]
    transit_active_orb: f64,
    #[serde(default = "default_solar_return_window_days")]
    solar_return_window_days: i64,
}

fn default_transit_active_orb() -> f64 {
    DEFAULT_TRANSIT_ACTIVE_ORB
}

fn default_solar_return_window_days() -> i64 {
    DEFAULT_SOLAR_RETURN_WINDOW_DAYS
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    location: Option<LocationToml>,
    #[serde(default)]
    analysis: Option<AnalysisToml>,
}

/// Parse config text. Missing sections keep their defaults.
pub fn parse_config(text: &str) -> anyhow::Result<UraniaConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania config: {e}"))?;

    let analysis = match root.analysis {
        Some(a) => {
            if a.transit_active_orb.is_nan() || a.transit_active_orb < 0.0 {
                anyhow::bail!(
                    "analysis.transit_active_orb must be non-negative, got {}",
                    a.transit_active_orb
                );
            }
            if a.solar_return_window_days < 0 {
                anyhow::bail!(
                    "analysis.solar_return_window_days must be non-negative, got {}",
                    a.solar_return_window_days
                );
            }
            AnalysisSettings {
                transit_active_orb: a.transit_active_orb,
                solar_return_window_days: a.solar_return_window_days,
            }
        }
        None => AnalysisSettings::default(),
    };

    let default_location = match root.location {
        Some(loc) => {
            if !(-90.0..=90.0).contains(&loc.latitude) || !(-180.0..=180.0).contains(&loc.longitude) {
                anyhow::bail!(
                    "location out of range: latitude {} longitude {}",
                    loc.latitude,
                    loc.longitude
                );
            }
            Some(GeoLocation {
                lat: loc.latitude,
                lon: loc.longitude,
            })
        }
        None => None,
    };

    Ok(UraniaConfig {
        ephemeris_path: root.ephemeris.and_then(|e| e.path),
        default_location,
        analysis,
        source: None,
    })
}

pub fn load_config_file(path: &Path) -> anyhow::Result<UraniaConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    let mut config = parse_config(&text)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Load the explicit path when given, else the first of the usual relative
/// paths that exists, else defaults. An explicit path must exist.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<UraniaConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    for p in &CONFIG_SEARCH_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return load_config_file(path);
        }
    }
    Ok(UraniaConfig::default())
}
