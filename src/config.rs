//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/toll-service/config.toml`).
//! Every field has a default, so a partial file is fine and a missing one
//! can be replaced by `AppConfig::default()`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::services::DEFAULT_DAILY_CAP;
use crate::domain::CalendarRules;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default config location: `<config dir>/toll-service/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toll-service")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub toll: TollConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn`, `error` or any `EnvFilter` directive
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TollConfig {
    pub fee_schedule_path: PathBuf,
    pub vehicle_types_path: PathBuf,
    pub daily_cap: u32,
    pub currency: String,
    /// IANA name of the reference time zone; daylight saving follows its rules
    pub time_zone: String,
}

impl Default for TollConfig {
    fn default() -> Self {
        Self {
            fee_schedule_path: PathBuf::from("config/toll_fees.json"),
            vehicle_types_path: PathBuf::from("config/vehicle_types.json"),
            daily_cap: DEFAULT_DAILY_CAP,
            currency: "SEK".to_string(),
            time_zone: "Europe/Stockholm".to_string(),
        }
    }
}

impl TollConfig {
    pub fn reference_zone(&self) -> Result<Tz, ConfigError> {
        self.time_zone.parse::<Tz>().map_err(|_| {
            ConfigError::Invalid(format!(
                "toll.time_zone: unknown time zone {:?}",
                self.time_zone
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Holiday jurisdiction code
    pub jurisdiction: String,
    /// Months (1-12) that are toll-free in their entirety
    pub exempt_months: Vec<u32>,
    /// Additional toll-free dates on top of the jurisdiction's holidays
    pub extra_holidays: Vec<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        let rules = CalendarRules::default();
        Self {
            jurisdiction: rules.jurisdiction,
            exempt_months: rules.exempt_months,
            extra_holidays: Vec::new(),
        }
    }
}

impl CalendarConfig {
    pub fn rules(&self) -> CalendarRules {
        CalendarRules {
            jurisdiction: self.jurisdiction.clone(),
            exempt_months: self.exempt_months.clone(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.toll.daily_cap == 0 {
            return Err(ConfigError::Invalid("toll.daily_cap must be positive".into()));
        }
        if let Some(month) = self
            .calendar
            .exempt_months
            .iter()
            .find(|m| !(1..=12).contains(*m))
        {
            return Err(ConfigError::Invalid(format!(
                "calendar.exempt_months contains {}, expected 1-12",
                month
            )));
        }
        self.toll.reference_zone()?;
        Ok(())
    }
}
