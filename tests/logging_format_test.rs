//! Integration tests for logging initialization.
//!
//! The global subscriber can only be installed once per process, so one test
//! owns the whole init-and-check sequence.

use cmdroute::core::logging::{self, LogFormat, LogLevel};
use cmdroute::test_utils::TestDir;

#[test]
fn json_events_reach_the_log_file() {
    let dir = TestDir::new();
    let path = dir.file_path("cmdroute.log");

    // Verbose raises the warn level to debug.
    logging::init(LogLevel::Warn, LogFormat::Json, Some(path.clone()), true);
    tracing::debug!(target: "cmdroute::dispatch", command = "get", "routing get");
    tracing::trace!(target: "cmdroute::dispatch", "below the level");
    tracing::error!(target: "quotes", code = "CMDR-R003", "command not found");
    tracing::error!(target: "other_crate", "not enabled by default");

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 2, "{content}");

    assert_eq!(events[0]["level"], "DEBUG");
    assert_eq!(events[0]["fields"]["message"], "routing get");
    assert_eq!(events[0]["fields"]["command"], "get");
    assert_eq!(events[1]["target"], "quotes");
    assert_eq!(events[1]["fields"]["code"], "CMDR-R003");
}

#[test]
fn test_format_and_level_names() {
    assert_eq!(LogFormat::from_arg("JSON"), Some(LogFormat::Json));
    assert_eq!(LogFormat::from_arg("xml"), None);
    assert_eq!(LogLevel::from_arg("warning"), Some(LogLevel::Warn));
    assert_eq!(LogLevel::default(), LogLevel::Warn);
}
