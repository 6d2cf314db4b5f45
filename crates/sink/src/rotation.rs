//! Size and date based file rotation
//!
//! Decides when the active output file must be replaced and computes the
//! replacement's path. File names carry a zero-padded index
//! (`app_00001.log`) that increments monotonically for the life of the
//! sink; in date-partitioned mode files live under a subdirectory named by
//! the configured chrono format, created on demand.
//!
//! The size threshold is a soft limit: it is checked before each write, so
//! a single write can overshoot the cap by at most its own length.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::error::{Result, SinkError};

/// Extension for all output files
pub const LOG_FILE_EXTENSION: &str = ".log";

/// Directory layout for output files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderMode {
    /// All files directly in the base directory
    #[default]
    Flat,
    /// Files under a `base/<date>` subdirectory
    DatePartitioned,
}

/// Rotation policy for one sink
///
/// Owns the file index. Mutated only while the sink's write lock is held,
/// so rotation decisions and writes are linearized.
#[derive(Debug)]
pub struct RotationPolicy {
    directory: PathBuf,
    base_file_name: String,
    max_bytes: u64,
    folder_mode: FolderMode,
    date_format: String,
    index: u64,
}

impl RotationPolicy {
    /// Create a policy with the index at zero
    pub fn new(
        directory: impl Into<PathBuf>,
        base_file_name: impl Into<String>,
        max_bytes: u64,
        folder_mode: FolderMode,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            base_file_name: base_file_name.into(),
            max_bytes,
            folder_mode,
            date_format: date_format.into(),
            index: 0,
        }
    }

    /// Seed the index from files a previous run left behind
    ///
    /// Scans the directory the next file would land in and continues after
    /// the highest `{base}_NNNNN.log` index found, so a restart appends a
    /// new file instead of overwriting `_00001`.
    pub fn resume_index(&mut self, now: DateTime<Local>) {
        let dir = self.target_dir(now);
        self.index = highest_existing_index(&dir, &self.base_file_name);
        if self.index > 0 {
            tracing::debug!(
                directory = %dir.display(),
                index = self.index,
                "resuming file index from existing files"
            );
        }
    }

    /// Whether the active file must be replaced before the next write
    pub fn should_rotate(&self, active_file_size: u64) -> bool {
        active_file_size >= self.max_bytes
    }

    /// Compute the path for the next file, incrementing the file index
    ///
    /// Creates the containing directory on demand. The index is never
    /// reused or decremented, so no two rotations of this sink produce the
    /// same file name.
    pub fn next_file_path(&mut self, now: DateTime<Local>) -> Result<PathBuf> {
        let dir = self.target_dir(now);
        fs::create_dir_all(&dir).map_err(|source| SinkError::Directory {
            path: dir.clone(),
            source,
        })?;

        self.index += 1;
        let file_name = format!(
            "{}_{:05}{}",
            self.base_file_name, self.index, LOG_FILE_EXTENSION
        );
        Ok(dir.join(file_name))
    }

    /// Index of the most recently computed file path
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Size threshold in bytes
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn target_dir(&self, now: DateTime<Local>) -> PathBuf {
        match self.folder_mode {
            FolderMode::Flat => self.directory.clone(),
            FolderMode::DatePartitioned => self
                .directory
                .join(now.format(&self.date_format).to_string()),
        }
    }
}

/// Check that a strftime format string contains no invalid specifiers
///
/// chrono reports bad specifiers only at render time, so formats are
/// vetted here once at construction instead.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Highest `{base}_NNNNN.log` index present in `dir`, or 0
fn highest_existing_index(dir: &Path, base_file_name: &str) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let prefix = format!("{base_file_name}_");
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            let digits = name
                .strip_prefix(&prefix)?
                .strip_suffix(LOG_FILE_EXTENSION)?;
            digits.parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "rotation_test.rs"]
mod rotation_test;
