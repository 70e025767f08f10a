//! Delivers a generated batch: write it, print it, and/or execute it.

use crate::command::ClipCommand;
use crate::error::ClipError;
use crate::prompt::Confirm;
use crate::runner::ToolRunner;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How the generated commands should be delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Write the newline-joined commands to this file.
    pub output: Option<PathBuf>,
    /// Compute and log only; never write files or run anything.
    pub dry_run: bool,
    /// Run every command after confirmation.
    pub execute: bool,
}

/// Dispatches `commands` according to `options`.
///
/// The output file is written before anything is executed, so it survives a
/// failed execution. Commands run one after the other in batch order and the
/// first failure stops the batch. Commands are printed to `stdout` only when
/// neither an output file, execution nor a dry run was requested.
pub fn dispatch<C, R, W>(
    commands: &[ClipCommand],
    options: &DispatchOptions,
    confirm: &mut C,
    runner: &mut R,
    stdout: &mut W,
) -> Result<(), ClipError>
where
    C: Confirm + ?Sized,
    R: ToolRunner + ?Sized,
    W: Write + ?Sized,
{
    if let Some(path) = &options.output {
        if options.dry_run {
            log::info!("Dry run: not writing {}", path.display());
        } else {
            write_commands(commands, path)?;
            log::info!("Commands written to: {}", path.display());
        }
    }

    if options.execute {
        if options.dry_run {
            log::warn!("--execute ignored in --dry-run mode.");
        } else {
            execute_all(commands, confirm, runner, stdout)?;
        }
    }

    if options.output.is_none() && !options.execute && !options.dry_run {
        log::info!("Generated ffmpeg commands:");
        for command in commands {
            writeln!(stdout, "{command}").map_err(ClipError::Stdout)?;
        }
    }

    Ok(())
}

/// Renders the batch the way it is stored on disk: one command per line, no
/// trailing newline.
pub fn render_batch(commands: &[ClipCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_commands(commands: &[ClipCommand], path: &Path) -> Result<(), ClipError> {
    fs::write(path, render_batch(commands)).map_err(|source| ClipError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

fn execute_all<C, R, W>(
    commands: &[ClipCommand],
    confirm: &mut C,
    runner: &mut R,
    stdout: &mut W,
) -> Result<(), ClipError>
where
    C: Confirm + ?Sized,
    R: ToolRunner + ?Sized,
    W: Write + ?Sized,
{
    log::warn!("You are about to execute the following ffmpeg commands:");
    for command in commands {
        writeln!(stdout, "  - {command}").map_err(ClipError::Stdout)?;
    }
    stdout.flush().map_err(ClipError::Stdout)?;

    if !confirm.confirm("Proceed with execution?") {
        log::info!("Execution cancelled.");
        return Err(ClipError::UserDeclinedExecution);
    }

    let total = commands.len();
    for (index, command) in commands.iter().enumerate() {
        log::info!("Executing ({}/{}): {}", index + 1, total, command);

        let output = runner
            .run(command.argv())
            .map_err(|source| ClipError::ToolLaunch {
                program: command.program().to_string(),
                source,
            })?;

        if !output.success() {
            let stderr = output.stderr.trim_end().to_string();
            log::error!("Command failed: {command}");
            log::error!("Exit code: {:?}", output.exit_code);
            log::error!("Error output: {stderr}");
            return Err(ClipError::ExternalToolFailure {
                command: command.to_string(),
                code: output.exit_code,
                stderr,
            });
        }

        log::info!("Command succeeded: {command}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{dispatch, DispatchOptions};
    use crate::clip::ClipRequest;
    use crate::command::ClipCommand;
    use crate::error::ClipError;
    use crate::prompt::Confirm;
    use crate::runner::{ToolOutput, ToolRunner};
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use std::collections::VecDeque;
    use std::io;

    struct FakeConfirm {
        answer: bool,
        asked: usize,
    }

    impl FakeConfirm {
        fn answering(answer: bool) -> Self {
            Self { answer, asked: 0 }
        }
    }

    impl Confirm for FakeConfirm {
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.asked += 1;
            self.answer
        }
    }

    /// Records every argv and replays canned results, succeeding once they
    /// run out.
    #[derive(Default)]
    struct FakeRunner {
        calls: Vec<Vec<String>>,
        results: VecDeque<io::Result<ToolOutput>>,
    }

    impl FakeRunner {
        fn with_results(results: Vec<io::Result<ToolOutput>>) -> Self {
            Self {
                calls: Vec::new(),
                results: results.into(),
            }
        }
    }

    impl ToolRunner for FakeRunner {
        fn run(&mut self, argv: &[String]) -> io::Result<ToolOutput> {
            self.calls.push(argv.to_vec());
            self.results.pop_front().unwrap_or(Ok(ToolOutput {
                exit_code: Some(0),
                stderr: String::new(),
            }))
        }
    }

    fn commands() -> Vec<ClipCommand> {
        [("a.mp4", "a-clip.mp4", 10, 40), ("b.mp4", "b-clip.mp4", 65, 70)]
            .iter()
            .map(|&(source, dest, start, end)| {
                ClipCommand::from_clip(
                    "ffmpeg",
                    &ClipRequest {
                        start_minutes: start / 60,
                        start_seconds: start % 60,
                        end_minutes: end / 60,
                        end_seconds: end % 60,
                        source_path: source.into(),
                        dest_path: dest.into(),
                    },
                )
            })
            .collect()
    }

    fn stdout_of(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn prints_commands_when_no_flags_are_set() {
        let mut confirm = FakeConfirm::answering(true);
        let mut runner = FakeRunner::default();
        let mut stdout = Vec::new();

        dispatch(
            &commands(),
            &DispatchOptions::default(),
            &mut confirm,
            &mut runner,
            &mut stdout,
        )
        .unwrap();

        insta::assert_snapshot!(stdout_of(stdout), @r"
        ffmpeg -i a.mp4 -c:a copy -c:v copy -ss 10 -t 30 a-clip.mp4
        ffmpeg -i b.mp4 -c:a copy -c:v copy -ss 65 -t 5 b-clip.mp4
        ");
        assert!(runner.calls.is_empty());
        assert_eq!(confirm.asked, 0);
    }

    #[test]
    fn writes_output_file_without_printing() {
        let temp = TempDir::new().unwrap();
        let output = temp.child("commands.txt");
        let mut stdout = Vec::new();

        dispatch(
            &commands(),
            &DispatchOptions {
                output: Some(output.path().to_path_buf()),
                ..Default::default()
            },
            &mut FakeConfirm::answering(true),
            &mut FakeRunner::default(),
            &mut stdout,
        )
        .unwrap();

        output.assert(
            "ffmpeg -i a.mp4 -c:a copy -c:v copy -ss 10 -t 30 a-clip.mp4\n\
             ffmpeg -i b.mp4 -c:a copy -c:v copy -ss 65 -t 5 b-clip.mp4",
        );
        assert!(stdout.is_empty());
    }

    #[test]
    fn dry_run_suppresses_write_and_execution() {
        let temp = TempDir::new().unwrap();
        let output = temp.child("commands.txt");
        let mut confirm = FakeConfirm::answering(true);
        let mut runner = FakeRunner::default();
        let mut stdout = Vec::new();

        dispatch(
            &commands(),
            &DispatchOptions {
                output: Some(output.path().to_path_buf()),
                dry_run: true,
                execute: true,
            },
            &mut confirm,
            &mut runner,
            &mut stdout,
        )
        .unwrap();

        output.assert(predicates::path::missing());
        assert!(runner.calls.is_empty());
        assert_eq!(confirm.asked, 0);
        assert!(stdout.is_empty());
    }

    #[test]
    fn declining_runs_nothing() {
        let mut confirm = FakeConfirm::answering(false);
        let mut runner = FakeRunner::default();
        let mut stdout = Vec::new();

        let err = dispatch(
            &commands(),
            &DispatchOptions {
                execute: true,
                ..Default::default()
            },
            &mut confirm,
            &mut runner,
            &mut stdout,
        )
        .unwrap_err();

        assert!(matches!(err, ClipError::UserDeclinedExecution));
        assert_eq!(confirm.asked, 1);
        assert!(runner.calls.is_empty());
        assert!(stdout_of(stdout).starts_with("  - ffmpeg -i a.mp4"));
    }

    #[test]
    fn executes_argv_in_table_order() {
        let mut runner = FakeRunner::default();

        dispatch(
            &commands(),
            &DispatchOptions {
                execute: true,
                ..Default::default()
            },
            &mut FakeConfirm::answering(true),
            &mut runner,
            &mut Vec::new(),
        )
        .unwrap();

        let batch = commands();
        assert_eq!(runner.calls.len(), 2);
        assert_eq!(runner.calls[0], batch[0].argv());
        assert_eq!(runner.calls[1], batch[1].argv());
    }

    #[test]
    fn first_failure_stops_the_batch_and_keeps_written_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.child("commands.txt");
        let mut runner = FakeRunner::with_results(vec![Ok(ToolOutput {
            exit_code: Some(1),
            stderr: "a.mp4: Invalid data found when processing input\n".to_string(),
        })]);

        let err = dispatch(
            &commands(),
            &DispatchOptions {
                output: Some(output.path().to_path_buf()),
                dry_run: false,
                execute: true,
            },
            &mut FakeConfirm::answering(true),
            &mut runner,
            &mut Vec::new(),
        )
        .unwrap_err();

        match err {
            ClipError::ExternalToolFailure {
                command,
                code,
                stderr,
            } => {
                assert!(command.starts_with("ffmpeg -i a.mp4"));
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "a.mp4: Invalid data found when processing input");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.calls.len(), 1);
        output.assert(predicates::path::exists());
    }

    #[test]
    fn launch_failure_names_the_program() {
        let mut runner = FakeRunner::with_results(vec![Err(io::Error::new(
            io::ErrorKind::NotFound,
            "not found",
        ))]);

        let err = dispatch(
            &commands(),
            &DispatchOptions {
                execute: true,
                ..Default::default()
            },
            &mut FakeConfirm::answering(true),
            &mut runner,
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, ClipError::ToolLaunch { ref program, .. } if program == "ffmpeg"));
        assert_eq!(runner.calls.len(), 1);
    }

    #[test]
    fn empty_batch_with_output_writes_empty_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.child("commands.txt");

        dispatch(
            &[],
            &DispatchOptions {
                output: Some(output.path().to_path_buf()),
                ..Default::default()
            },
            &mut FakeConfirm::answering(true),
            &mut FakeRunner::default(),
            &mut Vec::new(),
        )
        .unwrap();

        output.assert("");
    }
}
