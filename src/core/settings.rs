use crate::core::models::Observer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "overhead-gps";
const DEFAULT_TLE_URL: &str = "https://celestrak.org/NORAD/elements/gps-ops.txt";
const DEFAULT_TLE_FILE: &str = "gps-ops.txt";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tle: TleSettings,
    pub observer: ObserverSettings,
    pub tracking: TrackingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TleSettings {
    pub url: String,
    pub cache_path: Option<PathBuf>,
    pub max_age_days: u64,
    pub timeout_secs: u64,
}

impl Default for TleSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_TLE_URL.to_string(),
            cache_path: None,
            max_age_days: 7,
            timeout_secs: 30,
        }
    }
}

impl TleSettings {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_days.saturating_mul(24 * 60 * 60))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured cache path, falling back to the user cache dir and then the working directory.
    pub fn resolved_cache_path(&self) -> PathBuf {
        if let Some(path) = &self.cache_path {
            return path.clone();
        }

        dirs::cache_dir()
            .map(|p| p.join(APP_DIR).join(DEFAULT_TLE_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TLE_FILE))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_m: f64,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            latitude: 38.478752,
            longitude: -107.877739,
            altitude_m: 0.0,
        }
    }
}

impl ObserverSettings {
    pub fn observer(&self) -> Observer {
        Observer {
            altitude_m: self.altitude_m,
            ..Observer::new(self.latitude, self.longitude)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    pub interval_ms: u64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl TrackingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Loads from `path` if given, otherwise from the default config location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path().context("Could not determine config directory")?,
        };

        if !path.exists() {
            tracing::info!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(?path, "Loaded config");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.observer.latitude) {
            anyhow::bail!(
                "observer.latitude must be between -90 and 90, got {}",
                self.observer.latitude
            );
        }
        if !(-180.0..=180.0).contains(&self.observer.longitude) {
            anyhow::bail!(
                "observer.longitude must be between -180 and 180, got {}",
                self.observer.longitude
            );
        }
        if self.tle.max_age_days == 0 {
            anyhow::bail!("tle.max_age_days must be at least 1");
        }
        if self.tle.timeout_secs == 0 {
            anyhow::bail!("tle.timeout_secs must be at least 1");
        }
        if self.tracking.interval_ms == 0 {
            anyhow::bail!("tracking.interval_ms must be greater than 0");
        }
        Ok(())
    }
}
