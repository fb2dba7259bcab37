//! Terminal confirmation prompt

use std::io::IsTerminal;

use dialoguer::Confirm as ConfirmPrompt;
use redshiftctl_core::confirm::{Confirm, prompt_message};
use redshiftctl_core::{CoreError, Result};

/// Asks on the controlling terminal; defaults to "no"
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, target: &str, operation: &str) -> Result<bool> {
        if !std::io::stdin().is_terminal() {
            return Err(CoreError::Prompt(format!(
                "cannot confirm \"{}\" on \"{}\": stdin is not a terminal. \
                 Use --force to skip confirmation",
                operation, target
            )));
        }

        ConfirmPrompt::new()
            .with_prompt(prompt_message(target, operation))
            .default(false)
            .interact()
            .map_err(|e| CoreError::Prompt(e.to_string()))
    }
}
