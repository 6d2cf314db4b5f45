//! scribe - configuration
//!
//! TOML-based configuration loading with sensible defaults. A minimal
//! config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use scribe_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[file]\ndirectory = \"logs\"").unwrap();
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [file]
//! directory = "logs"
//! base_file_name = "app"
//! max_file_size = 10485760
//! folder_mode = "date"
//! date_folder_format = "%Y-%m-%d"
//! queue_capacity = 10000
//!
//! [format]
//! style = "minimal"
//! timestamp_format = "%Y-%m-%d %H:%M:%S%.3f"
//!
//! [logger]
//! min_level = "info"
//! console = false
//! ```

mod error;
mod file;
mod format;
mod logger;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use file::{FileConfig, FolderMode};
pub use format::FormatConfig;
pub use logger::LoggerConfig;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File sink settings (directory, rotation, queue sizing)
    pub file: FileConfig,

    /// Record formatting settings
    pub format: FormatConfig,

    /// Logger facade settings (level filtering, console mirror)
    pub logger: LoggerConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid
    /// TOML, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Rejects values no sink can be built from: empty directory or file
    /// name, zero sizes, a missing date format in date mode.
    pub fn validate(&self) -> Result<()> {
        self.file.validate()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
