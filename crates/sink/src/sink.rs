//! File sink facade and shutdown protocol
//!
//! `FileSink` is the object applications hand rendered lines to. Callers
//! on any thread `enqueue` (queued, written by the background loop) or
//! `write_sync` (durable before return). One `parking_lot` mutex guards
//! the unit "check size → maybe rotate → write → flush" for both paths, so
//! rotation and writes are linearized and two threads can never write to
//! or rotate the same file concurrently.
//!
//! Lifecycle is an explicit state machine, Running → Draining → Closed.
//! `close()` drops the producer side of the queue, waits for the writer
//! thread to drain everything already accepted, then closes the active
//! file. It is idempotent; the second call is a no-op.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{DateTime, Local};
use parking_lot::Mutex;

use crate::error::{Result, SinkError};
use crate::file::FileHandle;
use crate::queue::{self, LogQueue};
use crate::rotation::{self, FolderMode, RotationPolicy};
use crate::writer::WriterLoop;

/// Default size threshold before rotation (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default bound on the pending-line queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Default upper bound on lines written per batch
pub const DEFAULT_MAX_BATCH: usize = 100;

/// Default wait for the first line of a batch
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Construction options for a [`FileSink`]
#[derive(Debug, Clone)]
pub struct FileSinkOptions {
    /// Base directory for output files
    pub directory: PathBuf,

    /// File name stem; files are named `{stem}_{index:05}.log`
    pub base_file_name: String,

    /// Size threshold in bytes before the active file is rotated
    pub max_file_size: u64,

    /// Flat directory or per-date subdirectories
    pub folder_mode: FolderMode,

    /// chrono format for the date subdirectory name
    pub date_folder_format: String,

    /// Capacity of the pending-line queue (the backpressure bound)
    pub queue_capacity: usize,

    /// Maximum lines the writer takes per batch
    pub max_batch: usize,

    /// How long the writer waits for the first line of a batch
    pub poll_interval: Duration,
}

impl Default for FileSinkOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            base_file_name: "app".into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            folder_mode: FolderMode::Flat,
            date_folder_format: "%Y-%m-%d".into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_batch: DEFAULT_MAX_BATCH,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl FileSinkOptions {
    /// Options with a custom output directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Options with a custom file name stem
    #[must_use]
    pub fn with_base_file_name(mut self, name: impl Into<String>) -> Self {
        self.base_file_name = name.into();
        self
    }

    /// Options with a custom rotation size threshold
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Options with per-date subdirectories
    #[must_use]
    pub fn with_date_partitioning(mut self) -> Self {
        self.folder_mode = FolderMode::DatePartitioned;
        self
    }

    /// Options with a custom date subdirectory format
    #[must_use]
    pub fn with_date_folder_format(mut self, format: impl Into<String>) -> Self {
        self.date_folder_format = format.into();
        self
    }

    /// Options with a custom queue capacity
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Fail fast on options no sink can be built from
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(SinkError::config("directory must not be empty"));
        }
        if self.base_file_name.trim().is_empty() {
            return Err(SinkError::config("base file name must not be empty"));
        }
        if self.max_file_size == 0 {
            return Err(SinkError::config("max file size must be positive"));
        }
        if self.queue_capacity == 0 {
            return Err(SinkError::config("queue capacity must be positive"));
        }
        if self.max_batch == 0 {
            return Err(SinkError::config("max batch must be positive"));
        }
        if self.folder_mode == FolderMode::DatePartitioned {
            if self.date_folder_format.trim().is_empty() {
                return Err(SinkError::config("date folder format must not be empty"));
            }
            if !rotation::is_valid_date_format(&self.date_folder_format) {
                return Err(SinkError::config(format!(
                    "invalid date folder format '{}'",
                    self.date_folder_format
                )));
            }
        }
        Ok(())
    }
}

/// Lifecycle state of a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SinkState {
    /// Accepting lines; writer loop running
    Running = 0,
    /// `close()` in progress; queue draining
    Draining = 1,
    /// Drained and closed
    Closed = 2,
}

impl SinkState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Running,
            1 => Self::Draining,
            _ => Self::Closed,
        }
    }
}

/// The active file plus its rotation policy
///
/// Every mutation happens behind the sink's write lock. The handle is
/// `None` only before the first open and after a failed write discards it,
/// in which case the next write reopens through the normal rotation path —
/// that is what lets a transient disk error self-heal.
pub(crate) struct ActiveFile {
    policy: RotationPolicy,
    handle: Option<FileHandle>,
}

impl ActiveFile {
    pub fn new(policy: RotationPolicy) -> Self {
        Self {
            policy,
            handle: None,
        }
    }

    /// Open the first file eagerly so construction surfaces I/O problems
    pub fn open_initial(&mut self, now: DateTime<Local>) -> Result<()> {
        self.ensure_ready(now).map(|_| ())
    }

    /// Size-check, rotate if due, reopen if missing; returns the handle
    ///
    /// The old handle is flushed and closed before its replacement opens,
    /// so two files are never open at once for the same sink.
    fn ensure_ready(&mut self, now: DateTime<Local>) -> Result<&mut FileHandle> {
        let rotate = match self.handle.as_ref() {
            Some(handle) => self.policy.should_rotate(handle.size()?),
            None => false,
        };
        if rotate {
            if let Some(old) = self.handle.take() {
                let path = old.path().to_path_buf();
                old.close()?;
                tracing::debug!(path = %path.display(), "rotated log file");
            }
        }

        match self.handle {
            Some(ref mut handle) => Ok(handle),
            None => {
                let path = self.policy.next_file_path(now)?;
                Ok(self.handle.insert(FileHandle::open(path)?))
            }
        }
    }

    /// Write one line and flush it, as a single locked unit
    pub fn write_one(&mut self, line: &str) -> Result<()> {
        let result = (|| -> Result<()> {
            let handle = self.ensure_ready(Local::now())?;
            handle.write_line(line)?;
            handle.flush()?;
            Ok(())
        })();
        if result.is_err() {
            self.invalidate();
        }
        result
    }

    /// Write a batch of lines with a single flush at the end
    ///
    /// The rotation check runs per line so the size threshold is honored
    /// inside a batch; rotation itself flushes the outgoing file.
    pub fn write_batch(&mut self, lines: &[String]) -> Result<()> {
        let result = (|| -> Result<()> {
            let now = Local::now();
            for line in lines {
                let handle = self.ensure_ready(now)?;
                handle.write_line(line)?;
            }
            if let Some(handle) = self.handle.as_mut() {
                handle.flush()?;
            }
            Ok(())
        })();
        if result.is_err() {
            self.invalidate();
        }
        result
    }

    /// Flush the active handle outside the batch cadence
    pub fn flush(&mut self) -> Result<()> {
        if let Some(handle) = self.handle.as_mut() {
            handle.flush()?;
        }
        Ok(())
    }

    /// Flush and close the active handle
    pub fn close_handle(&mut self) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            handle.close()?;
        }
        Ok(())
    }

    /// Index of the file currently being written
    pub fn current_index(&self) -> u64 {
        self.policy.current_index()
    }

    /// Discard a handle that failed, so the next write reopens fresh
    fn invalidate(&mut self) {
        if let Some(broken) = self.handle.take() {
            let _ = broken.close();
        }
    }
}

/// Shared state between the facade and the writer loop
pub(crate) struct Shared {
    /// The single write lock of the sink
    pub(crate) active: Mutex<ActiveFile>,
}

/// Asynchronous rotating file sink
///
/// See the module docs for the concurrency and shutdown contract.
pub struct FileSink {
    producer: Mutex<Option<LogQueue>>,
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
    state: AtomicU8,
}

impl FileSink {
    /// Validate options, open the first file, and start the writer loop
    pub fn new(options: FileSinkOptions) -> Result<Self> {
        options.validate()?;

        let now = Local::now();
        let mut policy = RotationPolicy::new(
            &options.directory,
            &options.base_file_name,
            options.max_file_size,
            options.folder_mode,
            &options.date_folder_format,
        );
        policy.resume_index(now);

        let mut active = ActiveFile::new(policy);
        active.open_initial(now)?;

        let shared = Arc::new(Shared {
            active: Mutex::new(active),
        });

        let (producer, consumer) = queue::bounded(options.queue_capacity);
        let writer = WriterLoop::new(
            consumer,
            Arc::clone(&shared),
            options.max_batch,
            options.poll_interval,
        );
        let worker = std::thread::Builder::new()
            .name("scribe-writer".into())
            .spawn(move || writer.run())?;

        Ok(Self {
            producer: Mutex::new(Some(producer)),
            shared,
            worker: Mutex::new(Some(worker)),
            state: AtomicU8::new(SinkState::Running as u8),
        })
    }

    /// Queue one line for the background writer
    ///
    /// Returns as soon as the line is accepted. Blocks only when the queue
    /// is at capacity, until the writer frees space. Fails with
    /// [`SinkError::Closed`] after `close()`.
    pub fn enqueue(&self, line: impl Into<String>) -> Result<()> {
        let producer = self
            .producer
            .lock()
            .as_ref()
            .cloned()
            .ok_or(SinkError::Closed)?;
        producer.enqueue(line.into())
    }

    /// Write one line durably before returning
    ///
    /// Bypasses the queue: takes the write lock, runs the same
    /// rotation check the writer loop uses, writes, and flushes. I/O
    /// failures propagate to the caller.
    pub fn write_sync(&self, line: &str) -> Result<()> {
        if self.state() != SinkState::Running {
            return Err(SinkError::Closed);
        }
        if line.trim().is_empty() {
            return Ok(());
        }
        self.shared.active.lock().write_one(line)
    }

    /// Flush the active file outside the normal batch cadence
    pub fn flush(&self) -> Result<()> {
        if self.state() == SinkState::Closed {
            return Ok(());
        }
        self.shared.active.lock().flush()
    }

    /// Stop the writer loop, drain the queue, and close the active file
    ///
    /// Cooperative: every line accepted before this call is written before
    /// the sink closes. Idempotent; a second call returns immediately.
    pub fn close(&self) -> Result<()> {
        if self
            .state
            .compare_exchange(
                SinkState::Running as u8,
                SinkState::Draining as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Ok(());
        }

        // Reject new enqueues, then drop the producer handle; the writer
        // exits once the disconnected channel is drained.
        if let Some(producer) = self.producer.lock().take() {
            producer.close();
        }

        if let Some(worker) = self.worker.lock().take() {
            if worker.join().is_err() {
                tracing::error!("writer thread panicked during drain");
            }
        }

        let result = self.shared.active.lock().close_handle();
        self.state.store(SinkState::Closed as u8, Ordering::Release);
        result
    }

    /// Current lifecycle state
    pub fn state(&self) -> SinkState {
        SinkState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Index of the file currently being written
    pub fn current_file_index(&self) -> u64 {
        self.shared.active.lock().current_index()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::error!(error = %error, "error closing sink on drop");
        }
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod sink_test;
