//! Confirmed command execution.

use crate::error::TellError;
use anyhow::{Context, Result};
use std::process::Command;
use tracing::debug;

/// Run the command string through the user's shell, inheriting the
/// controlling terminal so the child can do its own I/O. Returns the
/// child's exit code; a signal-terminated child carries no code and is
/// reported as 1.
pub fn run_command(command: &str, shell_path: &str) -> Result<i32> {
    debug!(%command, shell = shell_path, "executing");

    let status = match Command::new(shell_path).arg("-c").arg(command).status() {
        Ok(status) => status,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TellError::ShellNotFound(shell_path.to_string()).into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to launch {}", shell_path));
        }
    };

    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_propagated() {
        assert_eq!(run_command("exit 3", "/bin/sh").unwrap(), 3);
    }

    #[test]
    fn test_success_is_zero() {
        assert_eq!(run_command("true", "/bin/sh").unwrap(), 0);
    }

    #[test]
    fn test_missing_shell() {
        let err = run_command("true", "/no/such/shell").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TellError>(),
            Some(TellError::ShellNotFound(_))
        ));
    }
}
