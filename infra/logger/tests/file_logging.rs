use shelf_logger::{FileFormat, FileOutput, LevelFilter, Telemetry};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let telemetry = Telemetry::builder()
        .name("shelf-file-logging")
        .console(false)
        .file(FileOutput::new(&log_dir).format(FileFormat::Json))
        .level(LevelFilter::INFO)
        .init()?;
    assert!(telemetry.has_file_output());

    tracing::info!(target: "shelf_store", collection = "users", "Wrote record");
    tracing::debug!("filtered out below the configured level");

    std::thread::sleep(Duration::from_millis(30));
    drop(telemetry);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let content = fs::read_to_string(&log_file)?;
    assert!(content.contains("\"collection\":\"users\""), "expected structured fields: {content}");
    assert!(!content.contains("filtered out"), "debug event leaked through the filter: {content}");

    Ok(())
}
