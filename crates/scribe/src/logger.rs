//! The logger facade
//!
//! Ties the three halves together: records are filtered by level, rendered
//! by `scribe-format`, optionally mirrored to the console, and handed to
//! the `scribe-sink` pipeline as opaque lines.

use std::error::Error as StdError;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;

use scribe_config::{Config, FileConfig, FolderMode};
use scribe_format::{Formatter, LineStyle, LogLevel};
use scribe_sink::{FileSink, FileSinkOptions};

use crate::console;
use crate::error::Result;

/// The object applications log through
///
/// Construction validates configuration, opens the first output file, and
/// starts the background writer; all of that fails fast. Logging methods
/// never block beyond the queue's backpressure contract. `close` drains
/// everything accepted so far and is idempotent.
pub struct Logger {
    sink: FileSink,
    formatter: Formatter,
    style: LineStyle,
    min_level: LogLevel,
    console: bool,
}

impl Logger {
    /// Build a logger from a loaded configuration
    pub fn new(config: &Config) -> Result<Self> {
        let formatter = Formatter::new(config.format.timestamp_format.as_str())?;
        let sink = FileSink::new(sink_options(&config.file))?;

        Ok(Self {
            sink,
            formatter,
            style: config.format.style,
            min_level: config.logger.min_level,
            console: config.logger.console,
        })
    }

    /// Build a logger with default settings in `directory`
    pub fn with_defaults(
        directory: impl Into<String>,
        base_file_name: impl Into<String>,
    ) -> Result<Self> {
        let mut config = Config::default();
        config.file.directory = directory.into();
        config.file.base_file_name = base_file_name.into();
        Self::new(&config)
    }

    /// Whether records at `level` are recorded at all
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Record a message at an explicit level, with optional error and
    /// originating method
    ///
    /// This is the general entry point the level-specific methods wrap.
    pub fn log_at(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn StdError + 'static)>,
        method: Option<&str>,
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let line = self
            .formatter
            .render(self.style, level, message, error, method, Local::now());
        if self.console {
            console::print(&line, level, self.style);
        }
        self.sink.enqueue(line)?;
        Ok(())
    }

    /// Record an informational message
    pub fn log(&self, message: &str) -> Result<()> {
        self.log_at(LogLevel::Info, message, None, None)
    }

    pub fn trace(&self, message: &str) -> Result<()> {
        self.log_at(LogLevel::Trace, message, None, None)
    }

    pub fn debug(&self, message: &str) -> Result<()> {
        self.log_at(LogLevel::Debug, message, None, None)
    }

    pub fn info(&self, message: &str) -> Result<()> {
        self.log_at(LogLevel::Info, message, None, None)
    }

    pub fn warn(&self, message: &str) -> Result<()> {
        self.log_at(LogLevel::Warn, message, None, None)
    }

    /// Record an error with its error value
    pub fn error(&self, message: &str, error: &(dyn StdError + 'static)) -> Result<()> {
        self.log_at(LogLevel::Error, message, Some(error), None)
    }

    pub fn fatal(&self, message: &str, error: &(dyn StdError + 'static)) -> Result<()> {
        self.log_at(LogLevel::Fatal, message, Some(error), None)
    }

    pub fn critical(&self, message: &str, error: &(dyn StdError + 'static)) -> Result<()> {
        self.log_at(LogLevel::Critical, message, Some(error), None)
    }

    /// Record a message under a bracketed tag
    pub fn log_with_tag(&self, tag: &str, message: &str, level: LogLevel) -> Result<()> {
        self.log_at(level, &format!("[{tag}] {message}"), None, None)
    }

    /// Record how long a task took
    pub fn log_performance(&self, task: &str, elapsed: Duration, level: LogLevel) -> Result<()> {
        let message = format!("Task '{task}' completed in {} ms.", elapsed.as_millis());
        self.log_at(level, &message, None, None)
    }

    /// Render and write a record durably before returning
    ///
    /// Bypasses the queue for callers that need the line flushed to the
    /// OS when the call returns, e.g. just before process exit.
    pub fn write_sync(&self, level: LogLevel, message: &str) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let line = self
            .formatter
            .render(self.style, level, message, None, None, Local::now());
        if self.console {
            console::print(&line, level, self.style);
        }
        self.sink.write_sync(&line)?;
        Ok(())
    }

    /// Flush the active file outside the normal batch cadence
    pub fn flush(&self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Drain everything accepted so far and close the output file
    ///
    /// Idempotent; the second call is a no-op.
    pub fn close(&self) -> Result<()> {
        self.sink.close()?;
        Ok(())
    }
}

/// Map the file section of the configuration onto sink options
fn sink_options(file: &FileConfig) -> FileSinkOptions {
    FileSinkOptions {
        directory: PathBuf::from(&file.directory),
        base_file_name: file.base_file_name.clone(),
        max_file_size: file.max_file_size,
        folder_mode: match file.folder_mode {
            FolderMode::Flat => scribe_sink::FolderMode::Flat,
            FolderMode::Date => scribe_sink::FolderMode::DatePartitioned,
        },
        date_folder_format: file.date_folder_format.clone(),
        queue_capacity: file.queue_capacity,
        max_batch: file.max_batch,
        poll_interval: Duration::from_millis(file.poll_interval_ms),
    }
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod logger_test;
