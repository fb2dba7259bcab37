//! Confirmation for mutating operations
//!
//! The gate either proceeds unconditionally (force) or asks a [`Confirm`]
//! implementation. A declined prompt is a cancellation, not an error.

use tracing::debug;

use crate::error::Result;

/// Asks the operator whether an operation may proceed
#[cfg_attr(test, mockall::automock)]
pub trait Confirm: Send + Sync {
    /// Returns `Ok(true)` only on an explicit affirmative answer
    fn confirm(&self, target: &str, operation: &str) -> Result<bool>;
}

/// Prompt text shown to the operator
pub fn prompt_message(target: &str, operation: &str) -> String {
    format!(
        "Performing the operation \"{}\" on target \"{}\". Continue?",
        operation, target
    )
}

/// Force-or-prompt decision for a single invocation
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationGate {
    force: bool,
}

impl ConfirmationGate {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    /// Decide whether `operation` may run against `target`
    pub fn should_process(
        &self,
        prompt: &dyn Confirm,
        target: &str,
        operation: &str,
    ) -> Result<bool> {
        if self.force {
            debug!("Skipping confirmation for {} on {} (forced)", operation, target);
            return Ok(true);
        }

        let approved = prompt.confirm(target, operation)?;
        debug!(
            "Confirmation for {} on {}: {}",
            operation,
            target,
            if approved { "approved" } else { "declined" }
        );
        Ok(approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use mockall::predicate::eq;

    #[test]
    fn test_force_skips_prompt() {
        let mut prompt = MockConfirm::new();
        prompt.expect_confirm().never();

        let gate = ConfirmationGate::new(true);
        assert!(gate.should_process(&prompt, "analytics", "RebootCluster").unwrap());
    }

    #[test]
    fn test_prompt_receives_target_and_operation() {
        let mut prompt = MockConfirm::new();
        prompt
            .expect_confirm()
            .with(eq("analytics"), eq("RebootCluster"))
            .times(1)
            .returning(|_, _| Ok(true));

        let gate = ConfirmationGate::new(false);
        assert!(gate.should_process(&prompt, "analytics", "RebootCluster").unwrap());
    }

    #[test]
    fn test_declined_prompt() {
        let mut prompt = MockConfirm::new();
        prompt.expect_confirm().times(1).returning(|_, _| Ok(false));

        let gate = ConfirmationGate::new(false);
        assert!(!gate.should_process(&prompt, "analytics", "RebootCluster").unwrap());
    }

    #[test]
    fn test_prompt_failure_is_an_error() {
        let mut prompt = MockConfirm::new();
        prompt
            .expect_confirm()
            .returning(|_, _| Err(CoreError::Prompt("not a terminal".to_string())));

        let gate = ConfirmationGate::new(false);
        let err = gate
            .should_process(&prompt, "analytics", "RebootCluster")
            .unwrap_err();
        assert!(err.to_string().contains("not a terminal"));
    }

    #[test]
    fn test_prompt_message_names_target_and_operation() {
        let message = prompt_message("analytics", "RebootCluster");
        assert!(message.contains("\"RebootCluster\""));
        assert!(message.contains("\"analytics\""));
    }
}
