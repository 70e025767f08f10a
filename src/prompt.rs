//! Interactive confirmation before executing a batch.

/// Asks a yes/no question.
pub trait Confirm {
    /// Returns `true` only on an explicit yes.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Prompts on the terminal, defaulting to "no".
///
/// When no terminal is attached or the answer cannot be read, the question is
/// treated as declined.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                log::debug!("Confirmation prompt unavailable: {e}");
                false
            }
        }
    }
}

/// Confirms without asking, for `--yes`.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> bool {
        log::info!("{prompt} yes (--yes)");
        true
    }
}
