//! Defines the command-line interface for the application.

use clap::Parser;
use std::path::PathBuf;

use crate::command::DEFAULT_TOOL;

#[derive(Parser, Debug)]
#[command(
    name = "clip-batch",
    version,
    about = "Generate and/or run ffmpeg commands that cut clips from a CSV of timestamps."
)]
pub struct Cli {
    /// CSV file with the columns debutM, debutS, finM, finS, fsource, fdest.
    #[arg(value_name = "CSV_PATH")]
    pub csv_path: PathBuf,

    /// Write the generated commands to this file, one per line.
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Only generate and log the commands, without writing or executing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Execute the generated ffmpeg commands after confirmation.
    #[arg(long)]
    pub execute: bool,

    /// Skip the confirmation prompt of --execute.
    #[arg(short, long, requires = "execute")]
    pub yes: bool,

    /// The ffmpeg executable to invoke.
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_TOOL)]
    pub ffmpeg: String,
}
