use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::{Coordinate, provider::openmeteo::DEFAULT_BASE_URL};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// location = "Stockholm"
/// latitude = 59.334591
/// longitude = 18.06324
/// base_url = "https://api.open-meteo.com"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Place name shown next to the current conditions.
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Forecast API root, without the `/v1/forecast` path.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let coordinate = Coordinate::default();
        Self {
            location: "Stockholm".to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Configured coordinate, validated.
    pub fn coordinate(&self) -> Result<Coordinate> {
        ensure!(
            (-90.0..=90.0).contains(&self.latitude),
            "Latitude {} is out of range (-90..=90).",
            self.latitude
        );
        ensure!(
            (-180.0..=180.0).contains(&self.longitude),
            "Longitude {} is out of range (-180..=180).",
            self.longitude
        );

        Ok(Coordinate { latitude: self.latitude, longitude: self.longitude })
    }

    /// Check every field a fetch depends on.
    pub fn validate(&self) -> Result<()> {
        self.coordinate()?;
        ensure!(self.timeout_secs > 0, "Timeout must be at least 1 second.");
        Ok(())
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.latitude = coordinate.latitude;
        self.longitude = coordinate.longitude;
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weekcast", "weekcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_stockholm_and_open_meteo() {
        let cfg = Config::default();

        assert_eq!(cfg.location, "Stockholm");
        assert_eq!(cfg.coordinate().expect("default coordinate is valid"), Coordinate::default());
        assert_eq!(cfg.base_url, "https://api.open-meteo.com");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let cfg = Config { latitude: 91.0, ..Config::default() };
        let err = cfg.coordinate().unwrap_err();
        assert!(err.to_string().contains("Latitude 91 is out of range"));

        let cfg = Config { longitude: -180.5, ..Config::default() };
        assert!(cfg.coordinate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = Config { timeout_secs: 0, ..Config::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("Timeout must be at least 1 second"));

        assert!(Config { timeout_secs: 1, ..Config::default() }.validate().is_ok());
        assert!(Config { latitude: -90.5, ..Config::default() }.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("location = \"Oslo\"\nlatitude = 59.91\nlongitude = 10.75\n")
            .expect("partial config should parse");

        assert_eq!(cfg.location, "Oslo");
        assert_eq!(cfg.coordinate().expect("valid"), Coordinate { latitude: 59.91, longitude: 10.75 });
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("weekcast-config-{}", std::process::id()))
            .join("config.toml");

        let mut cfg = Config { location: "Reykjavik".to_string(), ..Config::default() };
        cfg.set_coordinate(Coordinate { latitude: 64.1466, longitude: -21.9426 });
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, cfg);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("weekcast-does-not-exist").join("config.toml");
        let cfg = Config::load_from(&path).expect("missing file is not an error");
        assert_eq!(cfg, Config::default());
    }
}
