//! Logger facade configuration

use scribe_format::LogLevel;
use serde::Deserialize;

/// Logger configuration
///
/// # Example
///
/// ```toml
/// [logger]
/// min_level = "info"
/// console = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level to record; lower-severity records are discarded
    /// Default: trace (record everything)
    pub min_level: LogLevel,

    /// Mirror rendered lines to stdout, tinted by level
    /// Default: false
    pub console: bool,
}
