//! Line rendering
//!
//! A rendered record is an opaque string to the sink; everything about its
//! shape lives here. Three strategies hang behind one entry point and are
//! dispatched once per call:
//!
//! - `Minimal` - one `[timestamp] [Level]` line
//! - `Banner` - a multi-line block between rule lines, with error details
//!   for error-carrying levels
//! - `Ansi` - the minimal line wrapped in a per-level color escape

use std::error::Error as StdError;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::Deserialize;
use thiserror::Error;

use crate::level::LogLevel;

/// Default timestamp format for rendered records
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Length of the heavy rule framing a banner block
const HEAVY_RULE_LEN: usize = 145;

/// Length of the light rule inside a banner block
const LIGHT_RULE_LEN: usize = 95;

const ANSI_RESET: &str = "\u{1b}[0m";

/// Rendering strategy for one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Single plain line
    #[default]
    Minimal,
    /// Multi-line bannered block
    Banner,
    /// Single line with ANSI level coloring
    Ansi,
}

/// Formatting errors
#[derive(Debug, Error)]
pub enum FormatError {
    /// The timestamp format contains a specifier chrono cannot render
    #[error("invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),
}

/// Renders log records to persistable strings
#[derive(Debug, Clone)]
pub struct Formatter {
    timestamp_format: String,
}

impl Formatter {
    /// Create a formatter with a custom timestamp format
    ///
    /// The format is vetted here because chrono only reports bad
    /// specifiers at render time.
    pub fn new(timestamp_format: impl Into<String>) -> Result<Self, FormatError> {
        let timestamp_format = timestamp_format.into();
        let valid = !StrftimeItems::new(&timestamp_format).any(|item| matches!(item, Item::Error));
        if timestamp_format.trim().is_empty() || !valid {
            return Err(FormatError::InvalidTimestampFormat(timestamp_format));
        }
        Ok(Self { timestamp_format })
    }

    /// Render one record
    ///
    /// The result carries no trailing newline; the sink appends the
    /// record terminator when it persists the line.
    pub fn render(
        &self,
        style: LineStyle,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn StdError + 'static)>,
        method: Option<&str>,
        now: DateTime<Local>,
    ) -> String {
        let timestamp = now.format(&self.timestamp_format).to_string();
        match style {
            LineStyle::Minimal => minimal_line(&timestamp, level, method, message),
            LineStyle::Ansi => format!(
                "{}{}{}",
                level.ansi_color(),
                minimal_line(&timestamp, level, method, message),
                ANSI_RESET
            ),
            LineStyle::Banner => banner_block(&timestamp, level, method, message, error),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.into(),
        }
    }
}

fn minimal_line(timestamp: &str, level: LogLevel, method: Option<&str>, message: &str) -> String {
    format!(
        "[{timestamp}] [{level}] - Method: {} - Message: {message}",
        method.unwrap_or("N/A")
    )
}

fn banner_block(
    timestamp: &str,
    level: LogLevel,
    method: Option<&str>,
    message: &str,
    error: Option<&(dyn StdError + 'static)>,
) -> String {
    let heavy = "=".repeat(HEAVY_RULE_LEN);
    let light = "-".repeat(LIGHT_RULE_LEN);

    let mut out = String::with_capacity(HEAVY_RULE_LEN * 4 + message.len());
    let _ = write!(
        out,
        "{heavy}\n\
         {} LOG ENTRY\n\
         Timestamp: {timestamp}\n\
         Log Level: {level}\n\
         Method: {}\n\
         {light}\n\
         Log Message:\n\
         {message}\n\
         {light}\n",
        level.name().to_uppercase(),
        method.unwrap_or("N/A"),
    );

    if level.is_error_like() {
        let _ = write!(out, "Error Details:\n{}\n", format_error_details(error));
    } else {
        let _ = write!(out, "End of {level} Log Entry\n");
    }
    out.push_str(&heavy);
    out
}

/// Error value plus its full `source()` chain, one cause per line
pub fn format_error_details(error: Option<&(dyn StdError + 'static)>) -> String {
    let Some(error) = error else {
        return "no error details available".into();
    };

    let mut out = format!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(out, "\nCaused by: {cause}");
        source = cause.source();
    }
    out
}
