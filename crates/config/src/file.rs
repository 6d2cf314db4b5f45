//! File sink configuration
//!
//! Controls where log files land, when they rotate, and how the write
//! pipeline is sized. All fields have defaults; a missing `[file]` section
//! just works.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Directory layout for output files
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FolderMode {
    /// All files directly in the base directory (default)
    #[default]
    Flat,
    /// Files under a per-date subdirectory
    Date,
}

/// File sink configuration
///
/// # Example
///
/// ```toml
/// [file]
/// directory = "logs"
/// base_file_name = "app"
/// max_file_size = 10485760
/// folder_mode = "date"
/// date_folder_format = "%Y-%m-%d"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory where log files are stored
    /// Default: "logs"
    pub directory: String,

    /// File name stem; files are named `{stem}_{index:05}.log`
    /// Default: "app"
    pub base_file_name: String,

    /// Size threshold in bytes before rolling to a new file
    /// Default: 10485760 (10 MiB)
    pub max_file_size: u64,

    /// Directory layout (flat, date)
    /// Default: flat
    pub folder_mode: FolderMode,

    /// chrono format for the date subdirectory name
    /// Default: "%Y-%m-%d"
    pub date_folder_format: String,

    /// Bound on the pending-line queue (the backpressure point)
    /// Default: 10000
    pub queue_capacity: usize,

    /// Maximum lines the writer takes per batch
    /// Default: 100
    pub max_batch: usize,

    /// Milliseconds the writer waits for the first line of a batch
    /// Default: 100
    pub poll_interval_ms: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: "logs".into(),
            base_file_name: "app".into(),
            max_file_size: 10 * 1024 * 1024,
            folder_mode: FolderMode::Flat,
            date_folder_format: "%Y-%m-%d".into(),
            queue_capacity: 10_000,
            max_batch: 100,
            poll_interval_ms: 100,
        }
    }
}

impl FileConfig {
    /// Reject values no sink can be built from
    pub(crate) fn validate(&self) -> Result<()> {
        if self.directory.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "file.directory",
                "must not be empty",
            ));
        }
        if self.base_file_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "file.base_file_name",
                "must not be empty",
            ));
        }
        if self.max_file_size == 0 {
            return Err(ConfigError::invalid_value(
                "file.max_file_size",
                "must be positive",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "file.queue_capacity",
                "must be positive",
            ));
        }
        if self.max_batch == 0 {
            return Err(ConfigError::invalid_value(
                "file.max_batch",
                "must be positive",
            ));
        }
        if self.folder_mode == FolderMode::Date && self.date_folder_format.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "file.date_folder_format",
                "must not be empty in date mode",
            ));
        }
        Ok(())
    }
}
