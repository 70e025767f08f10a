//! Validation of raw table rows into clip requests.

use crate::error::{ClipError, TimestampError};
use crate::table::Row;
use crate::timestamp::to_total_seconds;
use std::path::{Path, PathBuf};

/// Columns every row must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["debutM", "debutS", "finM", "finS", "fsource", "fdest"];

/// A validated clip: a positive time range cut from `source_path` into
/// `dest_path`.
///
/// [`validate_row`] guarantees the end lies after the start. Requests built by
/// hand without that guarantee get a zero duration instead of a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRequest {
    pub start_minutes: u64,
    pub start_seconds: u64,
    pub end_minutes: u64,
    pub end_seconds: u64,
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
}

impl ClipRequest {
    /// Offset of the clip start in total seconds.
    pub fn start_total(&self) -> u64 {
        self.start_minutes
            .saturating_mul(60)
            .saturating_add(self.start_seconds)
    }

    pub fn end_total(&self) -> u64 {
        self.end_minutes.saturating_mul(60).saturating_add(self.end_seconds)
    }

    /// Length of the clip in seconds. Strictly positive for validated clips.
    pub fn duration(&self) -> u64 {
        self.end_total().saturating_sub(self.start_total())
    }
}

/// Validates one row, checking in order: required columns, integer
/// timestamps, timestamp ranges, positive duration, source existence and
/// destination directory existence.
pub fn validate_row(row: &Row) -> Result<ClipRequest, ClipError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| row.get(column).is_none())
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ClipError::MissingColumns {
            line: row.line,
            columns: missing,
        });
    }

    let start_minutes = parse_integer(row, "debutM")?;
    let start_seconds = parse_integer(row, "debutS")?;
    let end_minutes = parse_integer(row, "finM")?;
    let end_seconds = parse_integer(row, "finS")?;

    let invalid = |source: TimestampError| ClipError::InvalidTimestamp {
        line: row.line,
        source,
    };
    let start = to_total_seconds(start_minutes, start_seconds).map_err(invalid)?;
    let end = to_total_seconds(end_minutes, end_seconds).map_err(invalid)?;

    if end <= start {
        return Err(ClipError::NonPositiveDuration {
            line: row.line,
            start,
            end,
        });
    }

    let source_path = PathBuf::from(required(row, "fsource"));
    if !source_path.exists() {
        return Err(ClipError::SourceNotFound {
            line: row.line,
            path: source_path,
        });
    }

    let dest_path = PathBuf::from(required(row, "fdest"));
    let dest_dir = destination_dir(&dest_path);
    if !dest_dir.exists() {
        return Err(ClipError::DestinationDirNotFound {
            line: row.line,
            dir: dest_dir.to_path_buf(),
        });
    }

    // Both conversions succeeded, so every component is non-negative.
    Ok(ClipRequest {
        start_minutes: start_minutes as u64,
        start_seconds: start_seconds as u64,
        end_minutes: end_minutes as u64,
        end_seconds: end_seconds as u64,
        source_path,
        dest_path,
    })
}

fn required<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).unwrap_or_default()
}

fn parse_integer(row: &Row, column: &str) -> Result<i64, ClipError> {
    let value = required(row, column);
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ClipError::NonIntegerTimestamp {
            line: row.line,
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// A bare file name lives in the current directory.
fn destination_dir(dest: &Path) -> &Path {
    match dest.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => dest,
    }
}
