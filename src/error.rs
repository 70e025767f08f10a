//! Defines custom error types for the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned by the minutes/seconds converter.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimestampError {
    #[error("minutes and seconds must not be negative: {minutes}m {seconds}s")]
    Negative { minutes: i64, seconds: i64 },

    #[error("seconds must be below 60: {0}s")]
    SecondsOutOfRange(i64),

    #[error("timestamp is too large: {minutes}m {seconds}s")]
    TooLarge { minutes: i64, seconds: i64 },
}

#[derive(Error, Debug)]
/// Error type returned when a batch cannot be generated or executed.
pub enum ClipError {
    #[error("The CSV file does not exist: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("Line {line}: Malformed CSV record: {message}")]
    MalformedTable { line: u64, message: String },

    #[error("Line {line}: Missing columns: {}", .columns.join(", "))]
    MissingColumns { line: u64, columns: Vec<String> },

    #[error("Line {line}: Column '{column}' is not an integer: '{value}'")]
    NonIntegerTimestamp {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Line {line}: Invalid timestamp")]
    InvalidTimestamp {
        line: u64,
        #[source]
        source: TimestampError,
    },

    #[error("Line {line}: Duration must be positive. Start: {start}s, End: {end}s")]
    NonPositiveDuration { line: u64, start: u64, end: u64 },

    #[error("Line {line}: Source file does not exist: {}", .path.display())]
    SourceNotFound { line: u64, path: PathBuf },

    #[error("Line {line}: Destination directory does not exist: {}", .dir.display())]
    DestinationDirNotFound { line: u64, dir: PathBuf },

    #[error("Failed to write commands to {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write to standard output")]
    Stdout(#[source] io::Error),

    #[error("Failed to launch '{program}'")]
    ToolLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Command failed with exit code {}: {command}\n{stderr}", describe_exit(.code))]
    ExternalToolFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Execution cancelled by user.")]
    UserDeclinedExecution,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl ClipError {
    /// The process exit code this error should terminate the program with.
    pub fn exit_code(&self) -> u8 {
        match self {
            ClipError::UserDeclinedExecution => 130,
            _ => 1,
        }
    }
}
