//! Core library for clip-batch.
//!
//! A batch is described by a CSV table whose rows hold cut points
//! (`debutM`, `debutS`, `finM`, `finS`) plus a source and a destination file.
//! Every row becomes one stream-copy `ffmpeg` invocation:
//!
//! ```text
//! ffmpeg -i <fsource> -c:a copy -c:v copy -ss <start> -t <duration> <fdest>
//! ```
//!
//! Validation is fail-fast: the first invalid row aborts the run before any
//! output is written or any command is executed.
//!
//! # Example
//!
//! ```rust
//! use clip_batch::command::DEFAULT_TOOL;
//! use clip_batch::generate_commands;
//! use clip_batch::table::read_rows;
//!
//! # fn demo() -> Result<(), clip_batch::error::ClipError> {
//! let csv = "debutM,debutS,finM,finS,fsource,fdest\n0,10,0,40,Cargo.toml,out.mp4\n";
//! let rows = read_rows(csv.as_bytes())?;
//! let commands = generate_commands(&rows, DEFAULT_TOOL)?;
//!
//! assert_eq!(
//!     commands[0].to_string(),
//!     "ffmpeg -i Cargo.toml -c:a copy -c:v copy -ss 10 -t 30 out.mp4"
//! );
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod clip;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod prompt;
pub mod runner;
pub mod table;
pub mod timestamp;

use crate::cli::Cli;
use crate::clip::validate_row;
use crate::command::ClipCommand;
use crate::dispatch::{dispatch, DispatchOptions};
use crate::error::ClipError;
use crate::prompt::{AssumeYes, Confirm, TerminalConfirm};
use crate::runner::ProcessRunner;
use crate::table::{read_rows, Row};
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::Path;

/// Validates every row and formats one command per row, in table order.
///
/// Stops at the first invalid row.
pub fn generate_commands(rows: &[Row], tool: &str) -> Result<Vec<ClipCommand>, ClipError> {
    let mut commands = Vec::with_capacity(rows.len());
    for row in rows {
        let clip = validate_row(row)?;
        let command = ClipCommand::from_clip(tool, &clip);
        log::info!("Generated command: {command}");
        commands.push(command);
    }
    Ok(commands)
}

/// Reads the CSV table at `csv_path` and generates its commands.
pub fn load_commands(csv_path: &Path, tool: &str) -> anyhow::Result<Vec<ClipCommand>> {
    if !csv_path.exists() {
        return Err(ClipError::MissingInputFile(csv_path.to_path_buf()).into());
    }

    log::info!("Reading CSV file: {}", csv_path.display());
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to read input file: {}", csv_path.display()))?;
    let rows = read_rows(file)?;

    Ok(generate_commands(&rows, tool)?)
}

/// The main entry point for the application logic.
pub fn run() -> anyhow::Result<()> {
    // Defaults to `info`; RUST_LOG overrides it.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli {
        csv_path,
        output,
        dry_run,
        execute,
        yes,
        ffmpeg,
    } = Cli::parse();

    let commands = load_commands(&csv_path, &ffmpeg)?;

    let options = DispatchOptions {
        output,
        dry_run,
        execute,
    };
    let mut confirm: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    };
    let mut stdout = io::stdout().lock();

    dispatch(
        &commands,
        &options,
        confirm.as_mut(),
        &mut ProcessRunner,
        &mut stdout,
    )?;

    Ok(())
}
