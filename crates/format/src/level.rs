//! Log severity levels

use std::fmt;

use serde::Deserialize;

/// Severity of a log record
///
/// Variants are ordered, so `level >= min_level` is the filtering test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very detailed logs, often used for debugging
    #[default]
    Trace,
    /// Detailed information used during development
    Debug,
    /// General application events
    Info,
    /// Unexpected events that are not yet errors
    Warn,
    /// Application errors that need attention
    Error,
    /// Serious failures or crashes
    Fatal,
    /// The most severe failures
    Critical,
}

impl LogLevel {
    /// Lowercase name, as written in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Critical => "critical",
        }
    }

    /// Capitalized name, as written into rendered lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warn => "Warn",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
            Self::Critical => "Critical",
        }
    }

    /// Whether records at this level carry error details
    pub fn is_error_like(&self) -> bool {
        matches!(self, Self::Error | Self::Fatal | Self::Critical)
    }

    /// ANSI color escape for this level
    pub fn ansi_color(&self) -> &'static str {
        match self {
            Self::Trace => "\u{1b}[90m",
            Self::Debug => "\u{1b}[36m",
            Self::Info => "\u{1b}[32m",
            Self::Warn => "\u{1b}[33m",
            Self::Error => "\u{1b}[31m",
            Self::Fatal | Self::Critical => "\u{1b}[35m",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
