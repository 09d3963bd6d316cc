//! Commands that are reserved on the CLI but not implemented.
use anyhow::Result;

use crate::cli::StubOpts;
use crate::error::CommandError;

/// Fail with [`CommandError::NotImplemented`] for `command`.
///
/// # Errors
///
/// Always.
pub fn run(command: &str, _opts: &StubOpts) -> Result<()> {
    Err(CommandError::NotImplemented {
        command: command.to_string(),
    }
    .into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn save_and_show_are_not_implemented() {
        for cmd in ["save", "show"] {
            let err = run(cmd, &StubOpts { name: None }).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CommandError>(),
                Some(CommandError::NotImplemented { command }) if command == cmd
            ));
        }
    }
}
