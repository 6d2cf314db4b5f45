//! The active output file
//!
//! Wraps one append-mode file in a buffered writer. A line is either fully
//! accepted or the call fails; nothing here splits a line across calls.
//! Exactly one handle is active per sink at a time, and the old handle is
//! flushed and closed before a replacement opens.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write buffer size
const WRITE_BUFFER_SIZE: usize = 8 * 1024;

/// One open append-mode log file
#[derive(Debug)]
pub struct FileHandle {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileHandle {
    /// Open `path` for appending, creating it if missing
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(WRITE_BUFFER_SIZE, file),
            path,
        })
    }

    /// Append one line plus its terminating newline
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    /// Flush buffered bytes through to the OS
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Current size of the file in bytes, including still-buffered bytes
    ///
    /// The on-disk length comes from the file's own metadata, so the size
    /// stays authoritative across reopens and failed writes; the buffered
    /// remainder is added on top because `BufWriter` holds accepted bytes
    /// the metadata cannot see yet.
    pub fn size(&self) -> io::Result<u64> {
        let on_disk = self.writer.get_ref().metadata()?.len();
        Ok(on_disk + self.writer.buffer().len() as u64)
    }

    /// Path this handle writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and release the descriptor
    pub fn close(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
