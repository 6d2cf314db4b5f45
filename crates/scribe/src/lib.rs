//! scribe
//!
//! A local log-shipping sink: hand it discrete text records and it
//! buffers them, batches writes, rotates output files by size and/or
//! date, and drains everything on shutdown.
//!
//! The heavy lifting lives in the member crates; this crate is the public
//! surface:
//!
//! - [`scribe_sink`] - bounded queue, background writer, rotation,
//!   shutdown protocol
//! - [`scribe_format`] - levels and line rendering
//! - [`scribe_config`] - TOML configuration
//!
//! # Example
//!
//! ```no_run
//! use scribe::{Config, Logger};
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     r#"
//!     [file]
//!     directory = "logs"
//!     base_file_name = "app"
//!     "#,
//! )?;
//!
//! let logger = Logger::new(&config)?;
//! logger.info("service started")?;
//! logger.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod console;
mod error;
mod logger;

pub use error::{Error, Result};
pub use logger::Logger;

// The configuration and vocabulary types callers need day to day.
pub use scribe_config::{Config, ConfigError, FileConfig, FolderMode, FormatConfig, LoggerConfig};
pub use scribe_format::{DEFAULT_TIMESTAMP_FORMAT, FormatError, Formatter, LineStyle, LogLevel};
pub use scribe_sink::{FileSink, FileSinkOptions, SinkError, SinkState};
