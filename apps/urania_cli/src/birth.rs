use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::Args;
use urania::{ChartInput, GeoLocation};

/// Birth data for one chart
#[derive(Args, Debug, Clone)]
pub struct BirthArgs {
    /// UTC birth instant, "YYYY-MM-DD HH:MM" (or just "YYYY-MM-DD" with --time-unknown).
    #[arg(long)]
    pub datetime: String,

    /// Latitude in decimal degrees, north positive (default: config location).
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees, east positive (default: config location).
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Clock time is not known: no houses, angles or angle-based points.
    #[arg(long)]
    pub time_unknown: bool,
}

/// Second chart for synastry and composite
#[derive(Args, Debug, Clone)]
pub struct PartnerArgs {
    /// Partner's UTC birth instant, "YYYY-MM-DD HH:MM".
    #[arg(long)]
    pub partner_datetime: String,

    #[arg(long, allow_hyphen_values = true)]
    pub partner_lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub partner_lon: Option<f64>,

    #[arg(long)]
    pub partner_time_unknown: bool,
}

impl PartnerArgs {
    pub fn as_birth(&self) -> BirthArgs {
        BirthArgs {
            datetime: self.partner_datetime.clone(),
            lat: self.partner_lat,
            lon: self.partner_lon,
            time_unknown: self.partner_time_unknown,
        }
    }
}

pub fn parse_utc(text: &str) -> anyhow::Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("Unrecognised date/time {:?}", text))?;
    date.and_hms_opt(12, 0, 0)
        .map(|naive| naive.and_utc())
        .with_context(|| format!("Invalid date {:?}", text))
}

impl BirthArgs {
    pub fn to_input(&self, fallback: Option<GeoLocation>) -> anyhow::Result<ChartInput> {
        let datetime = parse_utc(&self.datetime)?;
        let location = match (self.lat, self.lon, fallback) {
            (Some(lat), Some(lon), _) => GeoLocation { lat, lon },
            (None, None, Some(loc)) => loc,
            _ => anyhow::bail!("Give both --lat and --lon, or set [location] in the config"),
        };
        Ok(ChartInput::new(datetime, location, !self.time_unknown))
    }
}
