//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `RESULTSLIP__SECTION__KEY` environment variables.

use crate::errors::{Result, SlipError};
use crate::logging_facility::Profile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "resultslip.toml";

/// Prefix for environment overrides, e.g. `RESULTSLIP__DATABASE__PATH`
pub const ENV_PREFIX: &str = "RESULTSLIP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub slip: SlipConfig,
    pub logging: LoggingConfig,
}

/// Connection settings handed to the persistence gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
    /// How long a statement waits on a locked database
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resultslip.db"),
            busy_timeout_ms: 5_000,
        }
    }
}

/// Result slip layout and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipConfig {
    /// Directory generated slips are written to
    pub output_dir: PathBuf,
    /// Institution logo; a configured but missing file is reported, not fatal
    pub logo_path: Option<PathBuf>,
    /// First line of the title block
    pub institution: String,
    /// Second line of the title block
    pub title: String,
}

impl Default for SlipConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("slips"),
            logo_path: None,
            institution: "KCA UNIVERSITY".to_string(),
            title: "Student Result Slip".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
    /// `EnvFilter` directive overriding the profile default
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Development,
            filter: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (optional file) and the environment
    ///
    /// A missing file is not an error unless `required` is set; the defaults
    /// and environment overrides still apply.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(SlipError::from)?;

        let app: AppConfig = settings.try_deserialize().map_err(SlipError::from)?;
        app.validate()?;
        Ok(app)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let app: AppConfig = toml::from_str(text).map_err(|e| SlipError::Config {
            message: e.to_string(),
        })?;
        app.validate()?;
        Ok(app)
    }

    /// Render this configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            SlipError::Config {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Reject settings that cannot work at all
    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(SlipError::Config {
                message: "database.path must not be empty".to_string(),
            }
            .into());
        }
        if self.slip.output_dir.as_os_str().is_empty() {
            return Err(SlipError::Config {
                message: "slip.output_dir must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
