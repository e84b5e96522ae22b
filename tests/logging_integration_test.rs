//! Integration test for file logging
//!
//! The global subscriber can only be installed once per process, so this
//! binary holds a single test.

use tempfile::TempDir;
use tombola::config::LoggingConfig;
use tombola::logging::init_logging;

#[test]
fn test_file_logging_writes_json_lines() {
    std::env::remove_var("RUST_LOG");
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("nested").join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_dir.to_string_lossy().to_string(),
        local_rotation: "hourly".to_string(),
    };

    assert!(init_logging("shouting", &config).is_err());

    let guard = init_logging("info", &config).unwrap();
    tracing::info!(target: "tombola::issuance", parent_id = "r-1", "Issuance finished");
    drop(guard);

    let files: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("tombola.log"));

    let contents = std::fs::read_to_string(&files[0]).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Issuance finished"))
        .unwrap();
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["fields"]["parent_id"], "r-1");
}
