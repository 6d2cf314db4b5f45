//! Facade error type

use thiserror::Error;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any error the logger facade can surface
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed
    #[error(transparent)]
    Config(#[from] scribe_config::ConfigError),

    /// The timestamp format is unusable
    #[error(transparent)]
    Format(#[from] scribe_format::FormatError),

    /// The file sink rejected the operation
    #[error(transparent)]
    Sink(#[from] scribe_sink::SinkError),
}
