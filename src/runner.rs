//! The process boundary to the external media tool.

use std::io;

/// What a finished invocation reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one argument vector to completion.
///
/// `argv[0]` is the program; the rest are passed as separate arguments with no
/// shell in between. A non-zero exit is reported through [`ToolOutput`], not as
/// an `Err`; `Err` means the process could not be started at all.
pub trait ToolRunner {
    fn run(&mut self, argv: &[String]) -> io::Result<ToolOutput>;
}

/// Spawns real processes, discarding stdout and capturing stderr.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, argv: &[String]) -> io::Result<ToolOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;

        let output = duct::cmd(program.as_str(), args)
            .stdin_null()
            .stdout_null()
            .stderr_capture()
            .unchecked()
            .run()?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::{ProcessRunner, ToolRunner};

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn captures_exit_code_and_stderr() {
        let output = ProcessRunner
            .run(&argv(&["sh", "-c", "echo boom >&2; exit 3"]))
            .unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr.trim(), "boom");
        assert!(!output.success());
    }

    #[test]
    fn arguments_are_not_split_by_a_shell() {
        let output = ProcessRunner
            .run(&argv(&["sh", "-c", "[ \"$1\" = 'a b; c' ]", "sh", "a b; c"]))
            .unwrap();

        assert!(output.success());
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let result = ProcessRunner.run(&argv(&["clip-batch-no-such-tool-xyz"]));

        assert!(result.is_err());
    }
}
