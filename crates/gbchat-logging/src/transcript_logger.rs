use chrono::{DateTime, Local};
use colored::Colorize;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use gbchat_encoding::encode_lossy;

/// Severity written into the `[LEVEL]` column of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Format one transcript line, terminator included.
pub fn format_line(timestamp: DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        level,
        message
    )
}

/// Best-effort, append-only session transcript.
///
/// Lines are GB2312 encoded with `?` standing in for characters outside the
/// repertoire. The file is opened for every line and closed again before
/// the call returns, so nothing is held open between turns. Failures go to
/// stderr and are otherwise swallowed.
#[derive(Debug, Clone, Default)]
pub struct TranscriptLogger {
    target: Option<PathBuf>,
}

impl TranscriptLogger {
    pub fn new(target: Option<PathBuf>) -> Self {
        Self { target }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// Append an INFO line.
    pub fn log(&self, message: &str) {
        self.log_level(message, LogLevel::Info);
    }

    /// Append an ERROR line.
    pub fn error(&self, message: &str) {
        self.log_level(message, LogLevel::Error);
    }

    /// Append a line at `level`. Never fails.
    pub fn log_level(&self, message: &str, level: LogLevel) {
        if let Err(e) = self.try_log(message, level) {
            eprintln!("{} Failed to write log: {}", "[LOG ERROR]".red(), e);
        }
    }

    /// Append a line at `level`, reporting what went wrong.
    ///
    /// A logger without a target accepts every line and writes nothing.
    pub fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LoggerError> {
        let Some(path) = self.target.as_deref() else {
            return Ok(());
        };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let line = format_line(Local::now(), level, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggerError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        file.write_all(&encode_lossy(&line))
            .map_err(|source| LoggerError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
