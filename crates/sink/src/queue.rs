//! Bounded FIFO queue between producers and the writer loop
//!
//! The queue is the sink's single point of backpressure: when it fills,
//! `enqueue` suspends the calling thread until the writer drains space.
//! That is how a slow disk propagates delay back to log producers instead
//! of growing memory without bound. Order is strict FIFO; nothing is
//! reordered or dropped silently.
//!
//! Shutdown rides on channel disconnection: the sink drops its producer
//! handle, the consumer keeps receiving until the channel reports itself
//! disconnected, and by then every accepted line has been delivered.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::error::{Result, SinkError};

/// Create a bounded queue pair with the given capacity
pub(crate) fn bounded(capacity: usize) -> (LogQueue, BatchConsumer) {
    let (tx, rx) = channel::bounded(capacity);

    (
        LogQueue {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        },
        BatchConsumer { rx },
    )
}

/// Outcome of one `dequeue` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueueStatus {
    /// Producers may still deliver lines
    Open,
    /// Every producer handle is gone and the queue is drained
    Disconnected,
}

/// Producer half, shared by every caller thread
#[derive(Clone)]
pub(crate) struct LogQueue {
    tx: Sender<String>,
    closed: Arc<AtomicBool>,
}

impl LogQueue {
    /// Enqueue one rendered line
    ///
    /// Blocks while the queue is at capacity. Whitespace-only lines are
    /// ignored without touching the queue. Fails with `Closed` once the
    /// sink has shut down.
    pub fn enqueue(&self, line: String) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        if self.closed.load(Ordering::Acquire) {
            return Err(SinkError::Closed);
        }

        // The send can still fail if the consumer vanished while this
        // thread was blocked at capacity; the line was never accepted.
        self.tx.send(line).map_err(|_| SinkError::Closed)
    }

    /// Mark the queue closed so later `enqueue` calls fail fast
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Consumer half, owned by the writer loop
pub(crate) struct BatchConsumer {
    rx: Receiver<String>,
}

impl BatchConsumer {
    /// Collect up to `max_batch` lines into `batch`
    ///
    /// Waits up to `timeout` for the first line, then takes whatever else
    /// is immediately available, preserving FIFO order. Returns
    /// `Disconnected` once all producers are gone and the queue is empty;
    /// a timeout with no lines returns `Open` with an empty batch.
    pub fn dequeue(
        &self,
        batch: &mut Vec<String>,
        max_batch: usize,
        timeout: Duration,
    ) -> QueueStatus {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => batch.push(line),
            Err(RecvTimeoutError::Timeout) => return QueueStatus::Open,
            Err(RecvTimeoutError::Disconnected) => return QueueStatus::Disconnected,
        }

        while batch.len() < max_batch {
            match self.rx.try_recv() {
                Ok(line) => batch.push(line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return QueueStatus::Disconnected,
            }
        }

        QueueStatus::Open
    }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;
