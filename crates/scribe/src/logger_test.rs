//! End-to-end tests for the logger facade

use std::fs;
use std::path::Path;
use std::time::Duration;

use scribe_config::Config;
use scribe_format::{LineStyle, LogLevel};
use tempfile::TempDir;

use crate::logger::Logger;

fn config_for(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.file.directory = dir.path().to_string_lossy().into_owned();
    config.file.base_file_name = "test".into();
    config
}

fn first_file_contents(dir: &Path) -> String {
    fs::read_to_string(dir.join("test_00001.log")).unwrap()
}

#[test]
fn test_log_reaches_the_file() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new(&config_for(&dir)).unwrap();

    logger.log("service started").unwrap();
    logger.warn("low on disk").unwrap();
    logger.close().unwrap();

    let content = first_file_contents(dir.path());
    assert!(content.contains("[Info]"));
    assert!(content.contains("Message: service started"));
    assert!(content.contains("[Warn]"));
    assert!(content.contains("Message: low on disk"));
}

#[test]
fn test_min_level_filters_records() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.logger.min_level = LogLevel::Warn;
    let logger = Logger::new(&config).unwrap();

    assert!(!logger.enabled(LogLevel::Info));
    logger.debug("noise").unwrap();
    logger.info("more noise").unwrap();
    logger.warn("kept").unwrap();
    logger.close().unwrap();

    let content = first_file_contents(dir.path());
    assert!(!content.contains("noise"));
    assert!(content.contains("kept"));
}

#[test]
fn test_error_banner_carries_cause() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.format.style = LineStyle::Banner;
    let logger = Logger::new(&config).unwrap();

    let cause = std::io::Error::other("connection refused");
    logger.error("upstream gone", &cause).unwrap();
    logger.close().unwrap();

    let content = first_file_contents(dir.path());
    assert!(content.contains("ERROR LOG ENTRY"));
    assert!(content.contains("upstream gone"));
    assert!(content.contains("Error: connection refused"));
}

#[test]
fn test_write_sync_is_immediately_durable() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new(&config_for(&dir)).unwrap();

    logger.write_sync(LogLevel::Info, "durable").unwrap();

    // Visible before any flush or close.
    let content = first_file_contents(dir.path());
    assert!(content.contains("Message: durable"));
    logger.close().unwrap();
}

#[test]
fn test_tag_and_performance_messages() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new(&config_for(&dir)).unwrap();

    logger
        .log_with_tag("billing", "invoice posted", LogLevel::Info)
        .unwrap();
    logger
        .log_performance("reindex", Duration::from_millis(1234), LogLevel::Info)
        .unwrap();
    logger.close().unwrap();

    let content = first_file_contents(dir.path());
    assert!(content.contains("[billing] invoice posted"));
    assert!(content.contains("Task 'reindex' completed in 1234 ms."));
}

#[test]
fn test_close_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new(&config_for(&dir)).unwrap();

    logger.log("one").unwrap();
    logger.close().unwrap();
    logger.close().unwrap();
    assert!(logger.log("late").is_err());
}

#[test]
fn test_invalid_timestamp_format_fails_construction() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.format.timestamp_format = "%Q-broken".into();
    assert!(Logger::new(&config).is_err());
}

#[test]
fn test_with_defaults_constructor() {
    let dir = TempDir::new().unwrap();
    let logger =
        Logger::with_defaults(dir.path().to_string_lossy().into_owned(), "test").unwrap();

    logger.log("hello").unwrap();
    logger.close().unwrap();
    assert!(first_file_contents(dir.path()).contains("hello"));
}
