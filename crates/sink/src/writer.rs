//! The background consumer
//!
//! One writer loop runs per sink, on its own thread. Each turn it pulls a
//! batch from the queue, takes the write lock, lets the rotation policy
//! decide whether the active file must be swapped, writes the batch, and
//! flushes once. When the producer side of the queue disappears the loop
//! drains whatever remains and exits; that is the shutdown path `close()`
//! waits on.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::queue::{BatchConsumer, QueueStatus};
use crate::report::ErrorReporter;
use crate::sink::Shared;

/// Attempts per batch before it is reported and dropped
pub const DEFAULT_WRITE_RETRIES: usize = 3;

/// Delay between write attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Batch-writing loop state
pub(crate) struct WriterLoop {
    consumer: BatchConsumer,
    shared: Arc<Shared>,
    max_batch: usize,
    poll_interval: Duration,
    reporter: ErrorReporter,
}

impl WriterLoop {
    pub fn new(
        consumer: BatchConsumer,
        shared: Arc<Shared>,
        max_batch: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            consumer,
            shared,
            max_batch,
            poll_interval,
            reporter: ErrorReporter::default(),
        }
    }

    /// Run until the queue is closed and drained
    pub fn run(self) {
        tracing::debug!("writer loop started");

        let mut batch = Vec::with_capacity(self.max_batch);
        loop {
            batch.clear();
            let status = self
                .consumer
                .dequeue(&mut batch, self.max_batch, self.poll_interval);

            if !batch.is_empty() {
                self.write_batch(&batch);
            }

            // Disconnected with an empty batch means every producer is
            // gone and nothing is left to drain.
            if status == QueueStatus::Disconnected && batch.is_empty() {
                break;
            }
        }

        tracing::debug!(
            total_errors = self.reporter.total_error_count(),
            "writer loop drained and stopped"
        );
    }

    /// Write one batch under the write lock, retrying on failure
    ///
    /// A failed attempt discards the active handle, so the retry reopens a
    /// fresh file through the normal rotation path and a transient disk
    /// error self-heals. A batch that exhausts its retries is reported
    /// through the rate-limited side channel and dropped; the loop never
    /// terminates on I/O errors.
    fn write_batch(&self, batch: &[String]) {
        for attempt in 1..=DEFAULT_WRITE_RETRIES {
            let result = self.shared.active.lock().write_batch(batch);
            match result {
                Ok(()) => return,
                Err(error) if attempt < DEFAULT_WRITE_RETRIES => {
                    tracing::warn!(
                        attempt,
                        max_attempts = DEFAULT_WRITE_RETRIES,
                        error = %error,
                        "batch write failed, retrying"
                    );
                    thread::sleep(DEFAULT_RETRY_DELAY);
                }
                Err(error) => {
                    self.reporter
                        .error("dropping batch after failed writes", &error);
                }
            }
        }
    }
}
