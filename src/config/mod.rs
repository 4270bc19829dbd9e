use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use log::{debug, LevelFilter};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

use crate::models::SensorDescriptor;

pub const DEFAULT_CONFIG_FILE: &str = "sensor-query.toml";

pub const SENSOR_NAMESPACE: &str = "/xyz/openbmc_project/sensors/";

fn default_log_level() -> String {
    "info".to_string()
}

// libdbus' own default reply timeout.
fn default_timeout() -> Duration {
    Duration::from_millis(25_000)
}

fn default_namespace() -> String {
    SENSOR_NAMESPACE.to_string()
}

/// Sensors queried when no configuration overrides them.
pub fn default_sensors() -> Vec<SensorDescriptor> {
    vec![SensorDescriptor::new(
        "xyz.openbmc_project.HwmonTempSensor",
        "/xyz/openbmc_project/sensors/temperature/Temp",
    )]
}

/// Accepts a bare number of milliseconds, or a number suffixed with `ms`
/// or `s`.
fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let value = value.trim();

    let (number, scale) = if let Some(ms) = value.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(s) = value.strip_suffix('s') {
        (s, 1000)
    } else {
        (value, 1)
    };

    let number: u64 = number.trim().parse().map_err(serde::de::Error::custom)?;
    Ok(Duration::from_millis(number.saturating_mul(scale)))
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusConfig {
    #[serde(default = "default_timeout", deserialize_with = "deserialize_timeout")]
    pub timeout: Duration,
    /// Path prefix under which the sensor type filter applies.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            namespace: default_namespace(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default = "default_sensors")]
    pub sensors: Vec<SensorDescriptor>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            bus: BusConfig::default(),
            sensors: default_sensors(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Load `path` if given. Otherwise use `sensor-query.toml` when present
    /// and the built-in defaults when not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::new(),
            None => {
                debug!("No {} found, using built-in configuration", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }
}
