//! Rate-limited error reporting for the writer loop
//!
//! The background consumer reports I/O failures through `tracing` instead
//! of a caller's stack. Under sustained failure (disk full, directory
//! gone) that would flood the host's own logs, so reports are limited to
//! one per interval with a count of what was suppressed in between.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default minimum interval between reports
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Rate-limited reporter shared by one writer loop
pub struct ErrorReporter {
    min_interval: Duration,
    last_report: Mutex<Option<Instant>>,
    suppressed: AtomicU64,
    total_errors: AtomicU64,
}

impl ErrorReporter {
    /// Create a reporter with the given minimum interval between reports
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_report: Mutex::new(None),
            suppressed: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
        }
    }

    /// Record an error, emitting a `tracing` event if the interval allows
    ///
    /// Returns true if the error was reported, false if only counted.
    pub fn error(&self, message: &str, error: &dyn std::fmt::Display) -> bool {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
        self.total_errors.fetch_add(1, Ordering::Relaxed);

        let should_report = {
            let mut last = self.last_report.lock();
            let now = Instant::now();
            match *last {
                Some(at) if now.duration_since(at) < self.min_interval => false,
                _ => {
                    *last = Some(now);
                    true
                }
            }
        };

        if !should_report {
            return false;
        }

        let count = self.suppressed.swap(0, Ordering::Relaxed);
        let total = self.total_errors.load(Ordering::Relaxed);
        if count > 1 {
            tracing::error!(
                message = %message,
                error = %error,
                suppressed = count - 1,
                total_errors = total,
                "sink write error (rate-limited)"
            );
        } else {
            tracing::error!(
                message = %message,
                error = %error,
                total_errors = total,
                "sink write error"
            );
        }
        true
    }

    /// Total errors recorded since construction
    pub fn total_error_count(&self) -> u64 {
        self.total_errors.load(Ordering::Relaxed)
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}
