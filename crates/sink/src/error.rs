//! Sink error types
//!
//! Producer-facing errors (`Config`, `Closed`) are synchronous and explicit.
//! Writer-loop errors are reported through the rate-limited side channel and
//! never thrown into an unrelated caller's stack; `write_sync` is the one
//! path that propagates I/O failures directly, since its callers chose
//! synchronous semantics to observe them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors surfaced by the file sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// Invalid construction options; no sink is created
    #[error("invalid sink configuration: {0}")]
    Config(String),

    /// Operation attempted after `close()`
    #[error("sink is closed")]
    Closed,

    /// Open/write/flush failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rotation target directory could not be created
    #[error("directory unavailable: {}", path.display())]
    Directory {
        /// The directory that could not be created
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
