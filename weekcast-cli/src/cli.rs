use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Text};
use tracing::debug;
use weekcast_core::{Config, ForecastStore, provider::provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weekcast", version, about = "Current conditions and a week of daily forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the daily summary.
    Show {
        #[command(flatten)]
        place: PlaceArgs,

        /// Use the night theme instead of the weather-driven one.
        #[arg(long)]
        night: bool,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Store default settings. Prompts when no flags are given.
    Configure {
        #[command(flatten)]
        place: PlaceArgs,

        /// Forecast API root, e.g. "https://api.open-meteo.com".
        #[arg(long)]
        base_url: Option<String>,

        /// HTTP timeout in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Print the path of the configuration file.
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct PlaceArgs {
    /// Latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Place name shown with the current conditions.
    #[arg(long)]
    pub location: Option<String>,
}

impl PlaceArgs {
    fn is_empty(&self) -> bool {
        self.lat.is_none() && self.lon.is_none() && self.location.is_none()
    }

    fn apply(self, cfg: &mut Config) {
        if let Some(lat) = self.lat {
            cfg.latitude = lat;
        }
        if let Some(lon) = self.lon {
            cfg.longitude = lon;
        }
        if let Some(location) = self.location {
            cfg.location = location;
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { place, night, json } => {
                let mut cfg = Config::load()?;
                place.apply(&mut cfg);
                show(&cfg, night, json).await
            }
            Command::Configure { place, base_url, timeout_secs } => {
                let mut cfg = Config::load()?;

                if place.is_empty() && base_url.is_none() && timeout_secs.is_none() {
                    prompt_place(&mut cfg)?;
                } else {
                    place.apply(&mut cfg);
                    if let Some(base_url) = base_url {
                        cfg.base_url = base_url;
                    }
                    if let Some(timeout_secs) = timeout_secs {
                        cfg.timeout_secs = timeout_secs;
                    }
                }

                cfg.validate()?;
                cfg.save()?;
                println!("Saved configuration to {}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(cfg: &Config, night: bool, json: bool) -> anyhow::Result<()> {
    let coordinate = cfg.coordinate()?;
    debug!(?coordinate, location = %cfg.location, "showing forecast");
    let provider = provider_from_config(cfg)?;
    let store = ForecastStore::new(provider, coordinate, cfg.location.clone());

    if let Err(err) = store.refresh().await {
        eprintln!("Could not refresh the forecast ({err}); showing last known data.");
    }

    let forecast = store.latest();
    if json {
        let out =
            serde_json::to_string_pretty(&*forecast).context("Failed to serialize forecast")?;
        println!("{out}");
    } else {
        print!("{}", render::forecast(&forecast, night));
    }

    Ok(())
}

fn prompt_place(cfg: &mut Config) -> anyhow::Result<()> {
    cfg.location = Text::new("Location name:")
        .with_default(&cfg.location)
        .prompt()
        .context("Failed to read location name")?;

    cfg.latitude = CustomType::<f64>::new("Latitude:")
        .with_default(cfg.latitude)
        .with_error_message("Please type a number, e.g. 59.33")
        .prompt()
        .context("Failed to read latitude")?;

    cfg.longitude = CustomType::<f64>::new("Longitude:")
        .with_default(cfg.longitude)
        .with_error_message("Please type a number, e.g. 18.06")
        .prompt()
        .context("Failed to read longitude")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_flags_parse() {
        let cli = Cli::try_parse_from([
            "weekcast", "show", "--lat", "-33.87", "--lon", "151.21", "--location", "Sydney",
            "--night",
        ])
        .expect("arguments should parse");

        match cli.command {
            Command::Show { place, night, json } => {
                assert_eq!(place.lat, Some(-33.87));
                assert_eq!(place.lon, Some(151.21));
                assert_eq!(place.location.as_deref(), Some("Sydney"));
                assert!(night);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn place_args_override_config() {
        let mut cfg = Config::default();
        PlaceArgs { lat: Some(1.5), lon: None, location: Some("Null Island-ish".into()) }
            .apply(&mut cfg);

        assert_eq!(cfg.latitude, 1.5);
        assert_eq!(cfg.longitude, Config::default().longitude);
        assert_eq!(cfg.location, "Null Island-ish");
    }

    #[test]
    fn configure_without_flags_is_interactive() {
        let cli = Cli::try_parse_from(["weekcast", "configure"]).expect("arguments should parse");
        match cli.command {
            Command::Configure { place, base_url, timeout_secs } => {
                assert!(place.is_empty());
                assert!(base_url.is_none());
                assert!(timeout_secs.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
