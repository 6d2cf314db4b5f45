//! scribe - sink core
//!
//! The asynchronous write pipeline behind scribe: a bounded queue in front
//! of a background writer thread that batches rendered lines into
//! size/date-rotated append-only files, with an orderly flush-and-drain
//! shutdown.
//!
//! # Architecture
//!
//! ```text
//! [caller threads] --enqueue--> [bounded queue] --> [writer loop]
//!                                                       |
//!                                 (write lock) check size -> maybe rotate
//!                                                       |
//!                                              [active file] --> disk
//! ```
//!
//! `write_sync` bypasses the queue and takes the same write lock, so file
//! rotation and writes are always mutually exclusive no matter which path
//! a line arrives on.
//!
//! # Example
//!
//! ```no_run
//! use scribe_sink::{FileSink, FileSinkOptions};
//!
//! let sink = FileSink::new(
//!     FileSinkOptions::default()
//!         .with_directory("logs")
//!         .with_base_file_name("app"),
//! )?;
//!
//! sink.enqueue("2025-01-01 00:00:00.000 [Info] service started")?;
//! sink.close()?;
//! # Ok::<(), scribe_sink::SinkError>(())
//! ```

pub mod error;
mod file;
mod queue;
mod report;
mod rotation;
mod sink;
mod writer;

pub use error::{Result, SinkError};
pub use file::FileHandle;
pub use report::{DEFAULT_REPORT_INTERVAL, ErrorReporter};
pub use rotation::{FolderMode, LOG_FILE_EXTENSION, RotationPolicy, is_valid_date_format};
pub use sink::{
    DEFAULT_MAX_BATCH, DEFAULT_MAX_FILE_SIZE, DEFAULT_POLL_INTERVAL, DEFAULT_QUEUE_CAPACITY,
    FileSink, FileSinkOptions, SinkState,
};
pub use writer::{DEFAULT_RETRY_DELAY, DEFAULT_WRITE_RETRIES};
