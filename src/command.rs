//! Formatting of ffmpeg invocations.

use crate::clip::ClipRequest;
use std::fmt;

/// Executable used when none is configured.
pub const DEFAULT_TOOL: &str = "ffmpeg";

/// One stream-copy extraction, held as an argument vector.
///
/// The `Display` rendering joins the arguments with single spaces and is meant
/// for people and `--output` files. Execution always uses [`ClipCommand::argv`],
/// so paths containing spaces are passed through intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipCommand {
    argv: Vec<String>,
}

impl ClipCommand {
    /// Builds `<tool> -i <src> -c:a copy -c:v copy -ss <start> -t <duration> <dest>`.
    pub fn from_clip(tool: &str, clip: &ClipRequest) -> Self {
        let argv = vec![
            tool.to_string(),
            "-i".to_string(),
            clip.source_path.to_string_lossy().into_owned(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-ss".to_string(),
            clip.start_total().to_string(),
            "-t".to_string(),
            clip.duration().to_string(),
            clip.dest_path.to_string_lossy().into_owned(),
        ];
        Self { argv }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

impl fmt::Display for ClipCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}
