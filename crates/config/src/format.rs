//! Record formatting configuration

use scribe_format::{DEFAULT_TIMESTAMP_FORMAT, LineStyle};
use serde::Deserialize;

/// Formatting configuration
///
/// # Example
///
/// ```toml
/// [format]
/// style = "banner"
/// timestamp_format = "%Y-%m-%d %H:%M:%S%.3f"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Rendering style (minimal, banner, ansi)
    /// Default: minimal
    pub style: LineStyle,

    /// chrono format for record timestamps
    /// Default: "%Y-%m-%d %H:%M:%S%.3f"
    pub timestamp_format: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            style: LineStyle::Minimal,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.into(),
        }
    }
}
