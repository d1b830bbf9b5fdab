use chrono::NaiveDateTime;
use gbchat_encoding::decode;
use gbchat_logging::{LogLevel, LoggerError, TranscriptLogger};
use std::fs;
use tempfile::TempDir;

fn read_transcript(path: &std::path::Path) -> Vec<String> {
    let bytes = fs::read(path).unwrap();
    decode(&bytes).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn test_creates_missing_directories_and_appends_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper/chat.log");
    let logger = TranscriptLogger::new(Some(path.clone()));

    logger.log("Program started");
    logger.error("API request failed, status: 500, response: oops");

    let lines = read_transcript(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("] [INFO] Program started"), "{}", lines[0]);
    assert!(lines[1].ends_with("] [ERROR] API request failed, status: 500, response: oops"));
}

#[test]
fn test_timestamp_column_is_parseable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chat.log");
    TranscriptLogger::new(Some(path.clone())).log("hello");

    let line = &read_transcript(&path)[0];
    assert!(line.starts_with('['));
    NaiveDateTime::parse_from_str(&line[1..20], "%Y-%m-%d %H:%M:%S").unwrap();
    assert_eq!(&line[20..22], "] ");
}

#[test]
fn test_lines_are_gb2312_with_lossy_substitution() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chat.log");
    TranscriptLogger::new(Some(path.clone())).log("AI response: 你好 😀 €");

    let raw = fs::read(&path).unwrap();
    // 你 in EUC-CN
    assert!(raw.windows(2).any(|w| w == [0xC4, 0xE3]));
    let line = &read_transcript(&path)[0];
    assert!(line.ends_with("[INFO] AI response: 你好 ? ?"), "{}", line);
}

#[test]
fn test_existing_content_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chat.log");
    fs::write(&path, b"earlier line\n").unwrap();

    TranscriptLogger::new(Some(path.clone())).log("later line");

    let lines = read_transcript(&path);
    assert_eq!(lines[0], "earlier line");
    assert!(lines[1].ends_with("later line"));
}

#[test]
fn test_unwritable_target_never_escapes_log() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"file in the way").unwrap();
    let logger = TranscriptLogger::new(Some(blocker.join("sub/chat.log")));

    // Must return normally.
    logger.log("this cannot be written");
    logger.log_level("neither can this", LogLevel::Debug);

    let err = logger.try_log("explicit", LogLevel::Info).unwrap_err();
    assert!(matches!(err, LoggerError::CreateDir { .. }), "{:?}", err);
}

#[test]
fn test_directory_as_target_reports_open_error() {
    let dir = TempDir::new().unwrap();
    let logger = TranscriptLogger::new(Some(dir.path().to_path_buf()));

    let err = logger.try_log("x", LogLevel::Info).unwrap_err();
    assert!(matches!(err, LoggerError::Open { .. }), "{:?}", err);
}
