//! Pipeline configuration, loaded from TOML.
//!
//! Every section is optional; missing sections and keys take their defaults.
//! The store settings are passed explicitly to the store at call time.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stockpipe_core::engine::MAX_RESAMPLE_MINUTES;
use stockpipe_core::{CleaningConfig, IndicatorParams};
use thiserror::Error;

/// Stored password placeholder used by `redacted()`.
const REDACTED: &str = "********";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Where the raw CSV lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("TATAMTRDVR.NS.csv"),
        }
    }
}

/// Relational store location and credentials.
///
/// For the SQLite backend `host` is the directory holding the database file
/// and the file is `<database>.sqlite3`. `user` and `password` are kept for
/// parity with server-backed stores.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "data".into(),
            user: "root".into(),
            password: "root".into(),
            database: "invsto".into(),
            table: "stock_data".into(),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("database", &self.database)
            .field("table", &self.table)
            .finish()
    }
}

impl StoreConfig {
    /// Path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.host).join(format!("{}.sqlite3", self.database))
    }

    /// `user@host/database`, safe to log.
    pub fn describe(&self) -> String {
        format!("{}@{}/{}", self.user, self.host, self.database)
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input: InputConfig,
    pub cleaning: CleaningConfig,
    pub indicators: IndicatorParams,
    pub store: StoreConfig,
}

impl PipelineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty TOML with the store password hidden.
    pub fn to_toml_redacted(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }

    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        out.store.password = REDACTED.into();
        out
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.path.as_os_str().is_empty() {
            return Err(invalid("input.path", "must not be empty"));
        }

        let z = self.cleaning.z_threshold;
        if !(z.is_finite() && z > 0.0) {
            return Err(invalid("cleaning.z_threshold", format!("must be positive, got {z}")));
        }

        let ind = &self.indicators;
        for (field, window) in [
            ("indicators.ma_window", ind.ma_window),
            ("indicators.bb_window", ind.bb_window),
            ("indicators.rsi_window", ind.rsi_window),
        ] {
            if window == 0 {
                return Err(invalid(field, "window must be at least 1"));
            }
        }
        if !(ind.bb_multiplier.is_finite() && ind.bb_multiplier > 0.0) {
            return Err(invalid(
                "indicators.bb_multiplier",
                format!("must be positive, got {}", ind.bb_multiplier),
            ));
        }
        if !(1..=MAX_RESAMPLE_MINUTES).contains(&ind.resample_minutes) {
            return Err(invalid(
                "indicators.resample_minutes",
                format!(
                    "must be between 1 and {MAX_RESAMPLE_MINUTES}, got {}",
                    ind.resample_minutes
                ),
            ));
        }

        if self.store.database.trim().is_empty() {
            return Err(invalid("store.database", "must not be empty"));
        }
        if !is_identifier(&self.store.table) {
            return Err(invalid(
                "store.table",
                format!("{:?} is not a plain SQL identifier", self.store.table),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// ASCII letters, digits and underscores, not starting with a digit.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
