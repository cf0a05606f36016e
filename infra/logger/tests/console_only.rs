use shelf_logger::{LevelFilter, LoggerError, Telemetry, parse_level};
use tracing::Level;

#[test]
fn console_only_honours_store_directives() {
    assert!(matches!(parse_level("chatty"), Err(LoggerError::InvalidConfiguration { .. })));
    let level = parse_level(" warn ").expect("padded level names should parse");
    assert_eq!(level, LevelFilter::WARN);

    let telemetry = Telemetry::builder()
        .name("shelf-console-only")
        .level(level)
        .env_filter("shelf_store=debug,warn")
        .init()
        .expect("telemetry should initialize");

    assert!(!telemetry.has_file_output(), "console-only telemetry should not start a file worker");
    assert!(tracing::enabled!(target: "shelf_store", Level::DEBUG));
    assert!(!tracing::enabled!(target: "shelf_store", Level::TRACE));
    assert!(!tracing::enabled!(target: "shelf_shell", Level::INFO));
    assert!(tracing::enabled!(target: "shelf_shell", Level::WARN));
}
