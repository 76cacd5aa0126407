mod birth;

use anyhow::Context;
use birth::{parse_utc, BirthArgs, PartnerArgs};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use urania::ephemeris::EphemerisProvider;
use urania::{
    compute_chart, compute_composite, compute_progressions, compute_solar_return,
    compute_synastry, compute_transits, MeanEphemeris, SwissEphemeris, ZodiacFrame,
};
use urania_config::load_config;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FrameArg {
    Tropical,
    Sidereal,
}

impl From<FrameArg> for ZodiacFrame {
    fn from(frame: FrameArg) -> Self {
        match frame {
            FrameArg::Tropical => ZodiacFrame::Tropical,
            FrameArg::Sidereal => ZodiacFrame::Sidereal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Birth-chart geometry as JSON")]
struct Cli {
    /// Config file (default: configs/urania.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the built-in mean-motion ephemeris instead of Swiss Ephemeris files.
    #[arg(long, global = true)]
    offline: bool,

    /// Single-line JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Natal chart in both zodiac frames.
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Cross-chart aspects, house overlays and compatibility.
    Synastry {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        partner: PartnerArgs,
        #[arg(long, value_enum, default_value_t = FrameArg::Sidereal)]
        frame: FrameArg,
    },
    /// Midpoint chart of two births.
    Composite {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        partner: PartnerArgs,
        #[arg(long, value_enum, default_value_t = FrameArg::Sidereal)]
        frame: FrameArg,
    },
    /// Planets at a moment (default now) against the natal chart.
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// UTC instant to cast transits for.
        #[arg(long)]
        at: Option<String>,
    },
    /// Secondary progressions to a date.
    Progressions {
        #[command(flatten)]
        birth: BirthArgs,
        /// UTC target date (default now).
        #[arg(long)]
        to: Option<String>,
    },
    /// Day of the year the Sun returns to its natal place.
    SolarReturn {
        #[command(flatten)]
        birth: BirthArgs,
        /// Year to search (default: current year).
        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    if let Some(source) = &config.source {
        info!("Loaded config from {}", source.display());
    }

    let ephemeris: Box<dyn EphemerisProvider> = if cli.offline {
        Box::new(MeanEphemeris::new())
    } else {
        Box::new(
            SwissEphemeris::new(config.ephemeris_path.clone())
                .context("Swiss Ephemeris unavailable (try --offline)")?,
        )
    };
    let eph = ephemeris.as_ref();
    let home = config.default_location;
    let settings = config.analysis;

    let natal_for = |birth: &BirthArgs| -> anyhow::Result<urania::NatalChart> {
        let input = birth.to_input(home)?;
        compute_chart(eph, &input).with_context(|| format!("Chart for {} failed", birth.datetime))
    };

    let output = match cli.command {
        Command::Chart { birth } => serde_json::to_value(natal_for(&birth)?)?,
        Command::Synastry {
            birth,
            partner,
            frame,
        } => {
            let a = natal_for(&birth)?;
            let b = natal_for(&partner.as_birth())?;
            serde_json::to_value(compute_synastry(&a, &b, frame.into()))?
        }
        Command::Composite {
            birth,
            partner,
            frame,
        } => {
            let a = natal_for(&birth)?;
            let b = natal_for(&partner.as_birth())?;
            serde_json::to_value(compute_composite(&a, &b, frame.into()))?
        }
        Command::Transits { birth, at } => {
            let natal = natal_for(&birth)?;
            let target = at.as_deref().map(parse_utc).transpose()?;
            serde_json::to_value(compute_transits(eph, &natal, target, &settings))?
        }
        Command::Progressions { birth, to } => {
            let natal = natal_for(&birth)?;
            let target = match to.as_deref() {
                Some(text) => parse_utc(text)?,
                None => chrono::Utc::now(),
            };
            serde_json::to_value(compute_progressions(eph, &natal, target))?
        }
        Command::SolarReturn { birth, year } => {
            let natal = natal_for(&birth)?;
            let year = year.unwrap_or_else(|| chrono::Utc::now().year());
            serde_json::to_value(compute_solar_return(eph, &natal, year, &settings))?
        }
    };

    let text = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_synastry() {
        let cli = Cli::try_parse_from([
            "urania",
            "--offline",
            "synastry",
            "--datetime",
            "1990-06-15 14:30",
            "--lat",
            "40.7",
            "--lon",
            "-74.0",
            "--partner-datetime",
            "1992-03-01 08:15",
            "--partner-lat",
            "48.85",
            "--partner-lon",
            "2.35",
            "--frame",
            "tropical",
        ])
        .unwrap();
        assert!(cli.offline);
        match cli.command {
            Command::Synastry { birth, partner, frame } => {
                assert_eq!(birth.lon, Some(-74.0));
                assert_eq!(partner.partner_lat, Some(48.85));
                assert!(matches!(frame, FrameArg::Tropical));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
