//! Tests for the file sink facade
//!
//! Shutdown is a full drain, so these tests close the sink and then read
//! the produced files without sleeping.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use chrono::Local;
use tempfile::TempDir;

use crate::error::SinkError;
use crate::sink::{FileSink, FileSinkOptions, SinkState};

fn options(dir: &TempDir) -> FileSinkOptions {
    FileSinkOptions::default()
        .with_directory(dir.path())
        .with_base_file_name("Log")
}

/// Log files under `dir`, sorted by name (the zero-padded index makes
/// lexicographic order the write order).
fn log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn read_lines(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .flat_map(|path| {
            fs::read_to_string(path)
                .unwrap()
                .lines()
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_construction_opens_first_file() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir)).unwrap();

    assert!(dir.path().join("Log_00001.log").exists());
    assert_eq!(sink.state(), SinkState::Running);
    sink.close().unwrap();
}

#[test]
fn test_invalid_options_rejected() {
    let empty_dir = FileSinkOptions::default().with_directory("");
    assert!(matches!(
        FileSink::new(empty_dir),
        Err(SinkError::Config(_))
    ));

    let empty_name = FileSinkOptions::default().with_base_file_name("  ");
    assert!(matches!(
        FileSink::new(empty_name),
        Err(SinkError::Config(_))
    ));

    let zero_size = FileSinkOptions::default().with_max_file_size(0);
    assert!(matches!(
        FileSink::new(zero_size),
        Err(SinkError::Config(_))
    ));

    let zero_queue = FileSinkOptions::default().with_queue_capacity(0);
    assert!(matches!(
        FileSink::new(zero_queue),
        Err(SinkError::Config(_))
    ));

    let bad_date = FileSinkOptions::default()
        .with_date_partitioning()
        .with_date_folder_format("%Q-nope");
    assert!(matches!(FileSink::new(bad_date), Err(SinkError::Config(_))));
}

#[test]
fn test_every_line_once_in_order_across_files() {
    let dir = TempDir::new().unwrap();
    // Small threshold so the run spans several rotations.
    let sink = FileSink::new(options(&dir).with_max_file_size(512)).unwrap();

    let lines: Vec<String> = (0..200).map(|i| format!("record {i:04}")).collect();
    for line in &lines {
        sink.enqueue(line.clone()).unwrap();
    }
    sink.close().unwrap();

    let files = log_files(dir.path());
    assert!(files.len() > 1, "expected rotation to produce several files");
    assert_eq!(read_lines(&files), lines);
}

#[test]
fn test_rotation_concrete_scenario() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir).with_max_file_size(1024)).unwrap();

    // 50 lines of 30 bytes each (29 chars + newline), 1500 bytes total.
    for i in 0..50 {
        sink.enqueue(format!("{i:029}")).unwrap();
    }
    sink.close().unwrap();

    let files = log_files(dir.path());
    assert_eq!(files.len(), 2, "1500 bytes at a 1024 cap is two files");
    assert_eq!(files[0], dir.path().join("Log_00001.log"));
    assert_eq!(files[1], dir.path().join("Log_00002.log"));

    // The size check runs before each write, so the first file crosses the
    // threshold by at most one line: 35 lines (1050 bytes), then 15.
    let first = fs::read_to_string(&files[0]).unwrap();
    let second = fs::read_to_string(&files[1]).unwrap();
    assert_eq!(first.lines().count(), 35);
    assert_eq!(first.len(), 1050);
    assert_eq!(second.lines().count(), 15);
    assert_eq!(read_lines(&files).len(), 50);
}

#[test]
fn test_rotated_file_index_strictly_increases() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir).with_max_file_size(64)).unwrap();

    assert_eq!(sink.current_file_index(), 1);
    for _ in 0..8 {
        sink.write_sync("a line long enough to cross a 64 byte threshold soon")
            .unwrap();
    }
    assert!(sink.current_file_index() > 1);
    sink.close().unwrap();
}

#[test]
fn test_write_sync_durable_on_return() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir)).unwrap();

    sink.write_sync("x").unwrap();

    // No flush, no close: the write must already be visible on disk.
    let path = dir.path().join("Log_00001.log");
    assert_eq!(fs::metadata(&path).unwrap().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    sink.close().unwrap();
}

#[test]
fn test_write_sync_rotates_like_the_loop() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir).with_max_file_size(10)).unwrap();

    sink.write_sync("0123456789").unwrap(); // 11 bytes, at the cap
    sink.write_sync("next").unwrap(); // must land in a new file
    sink.close().unwrap();

    let files = log_files(dir.path());
    assert_eq!(files.len(), 2);
    assert_eq!(fs::read_to_string(&files[1]).unwrap(), "next\n");
}

#[test]
fn test_close_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir)).unwrap();

    sink.enqueue("one line").unwrap();
    sink.close().unwrap();
    sink.close().unwrap();
    assert_eq!(sink.state(), SinkState::Closed);

    let files = log_files(dir.path());
    assert_eq!(read_lines(&files), vec!["one line"]);
}

#[test]
fn test_operations_after_close_fail() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(options(&dir)).unwrap();
    sink.close().unwrap();

    assert!(matches!(sink.enqueue("late"), Err(SinkError::Closed)));
    assert!(matches!(sink.write_sync("late"), Err(SinkError::Closed)));
    // Flush after close has nothing to do but is not an error.
    sink.flush().unwrap();
}

#[test]
fn test_date_partitioned_creates_dated_directory() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(
        options(&dir)
            .with_date_partitioning()
            .with_date_folder_format("%Y-%m-%d"),
    )
    .unwrap();

    // The dated directory exists before anything is logged.
    let dated = dir
        .path()
        .join(Local::now().format("%Y-%m-%d").to_string());
    assert!(dated.is_dir());
    assert!(dated.join("Log_00001.log").exists());

    sink.enqueue("partitioned").unwrap();
    sink.close().unwrap();

    let content = fs::read_to_string(dated.join("Log_00001.log")).unwrap();
    assert_eq!(content, "partitioned\n");
}

#[test]
fn test_index_resumes_across_sink_instances() {
    let dir = TempDir::new().unwrap();

    let first = FileSink::new(options(&dir)).unwrap();
    first.write_sync("from the first run").unwrap();
    first.close().unwrap();

    // A new sink over the same directory continues after the highest
    // existing index instead of overwriting Log_00001.log.
    let second = FileSink::new(options(&dir)).unwrap();
    second.write_sync("from the second run").unwrap();
    second.close().unwrap();

    let files = log_files(dir.path());
    assert_eq!(files.len(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("Log_00001.log")).unwrap(),
        "from the first run\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("Log_00002.log")).unwrap(),
        "from the second run\n"
    );
}

#[test]
fn test_concurrent_producers_lose_nothing() {
    let dir = TempDir::new().unwrap();
    let sink = Arc::new(FileSink::new(options(&dir).with_max_file_size(2048)).unwrap());

    let threads = 4;
    let per_thread = 100;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..per_thread {
                    sink.enqueue(format!("producer {t} line {i:03}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    sink.close().unwrap();

    let lines = read_lines(&log_files(dir.path()));
    assert_eq!(lines.len(), threads * per_thread);

    // Per-producer order survives the interleaving.
    for t in 0..threads {
        let prefix = format!("producer {t} ");
        let mine: Vec<&String> = lines.iter().filter(|l| l.starts_with(&prefix)).collect();
        assert_eq!(mine.len(), per_thread);
        for (i, line) in mine.iter().enumerate() {
            assert_eq!(**line, format!("producer {t} line {i:03}"));
        }
    }
}
