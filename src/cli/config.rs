//! TOML configuration file support.
//!
//! Instead of passing data paths on every call, users can keep them in a
//! config file. `lri-screen.toml` in the working directory is picked up
//! automatically; `--config` selects another file.
//!
//! ```toml
//! # lri-screen.toml
//! [data]
//! substances = "reference/substancias.csv"
//! alkanes = "reference/alcanos.csv"
//! delimiter = ";"
//!
//! [log]
//! path = "logs/query_log.csv"
//! enabled = true
//!
//! [screen]
//! method = "DB-5ms(SID)"
//! tolerance = 2
//! ```
//!
//! Command-line flags override config values, which override the built-in
//! defaults.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use lri_screen::method::Method;
use lri_screen::query::Tolerance;

use super::DataArgs;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "lri-screen.toml";

const DEFAULT_SUBSTANCES: &str = "substances.csv";
const DEFAULT_ALKANES: &str = "alkanes.csv";
const DEFAULT_LOG: &str = "query_log.csv";

/// Root configuration structure for lri-screen.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Reference table locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Query log settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Screening defaults.
    #[serde(default)]
    pub screen: ScreenConfig,
}

/// Reference table locations.
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    /// Substance table export.
    pub substances: Option<PathBuf>,

    /// n-alkane table export.
    pub alkanes: Option<PathBuf>,

    /// Field delimiter of both exports.
    pub delimiter: Option<char>,
}

/// Query log settings.
#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// Log file path.
    pub path: Option<PathBuf>,

    /// Set to false to disable the query log.
    pub enabled: Option<bool>,
}

/// Screening defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenConfig {
    /// Default method (label or column suffix).
    pub method: Option<String>,

    /// Default tolerance in percent (1-10).
    pub tolerance: Option<u8>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the explicit config file, else the default one if present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    log::info!("Using config file {}", default.display());
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Substance table export.
    pub substances: PathBuf,
    /// n-alkane table export.
    pub alkanes: PathBuf,
    /// Field delimiter.
    pub delimiter: u8,
    /// Query log file, or `None` when logging is disabled.
    pub log_path: Option<PathBuf>,
    /// Method used when a command does not name one.
    pub method: Method,
    /// Tolerance used when a command does not give one.
    pub tolerance: Tolerance,
}

impl Settings {
    /// Merge command-line flags over the config file.
    pub fn resolve(config: Config, args: &DataArgs) -> Result<Self> {
        let delimiter = match args.delimiter.or(config.data.delimiter) {
            Some(c) if c.is_ascii() => c as u8,
            Some(c) => bail!("Delimiter must be a single ASCII character, got '{}'", c),
            None => b',',
        };

        let logging = !args.no_log && config.log.enabled.unwrap_or(true);
        let log_path = logging.then(|| {
            args.log
                .clone()
                .or(config.log.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG))
        });

        let method = match config.screen.method {
            Some(name) => name
                .parse::<Method>()
                .context("Invalid [screen] method in config")?,
            None => Method::Db1ms,
        };
        let tolerance = match config.screen.tolerance {
            Some(percent) => Tolerance::new(percent).context("Invalid [screen] tolerance in config")?,
            None => Tolerance::default(),
        };

        Ok(Self {
            substances: args
                .substances
                .clone()
                .or(config.data.substances)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SUBSTANCES)),
            alkanes: args
                .alkanes
                .clone()
                .or(config.data.alkanes)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ALKANES)),
            delimiter,
            log_path,
            method,
            tolerance,
        })
    }
}
