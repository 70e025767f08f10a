//! The clip-batch command-line executable.

use clip_batch::error::ClipError;
use std::process::ExitCode;

fn main() -> ExitCode {
    match clip_batch::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<ClipError>()
                .map_or(1, ClipError::exit_code);
            ExitCode::from(code)
        }
    }
}
