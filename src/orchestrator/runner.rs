//! Generator command execution
//!
//! Generators are shell snippets from the config (`npm run gen:env`,
//! `agent-guard generate env`, ...). They run one at a time, blocking, in the
//! project root.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::types::{GuardError, Result};

pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str, cwd: &Path) -> Result<()>;
}

/// Runs commands through the platform shell
pub struct ShellRunner;

impl ShellRunner {
    fn shell() -> (&'static str, &'static str) {
        if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<()> {
        let (shell, flag) = Self::shell();
        debug!("Running generator: {}", command);

        let output = Command::new(shell)
            .arg(flag)
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GuardError::Generator {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(GuardError::Generator {
            command: command.to_string(),
            message: if stderr.trim().is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            },
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_runs_in_cwd() {
        let temp_dir = TempDir::new().unwrap();
        ShellRunner
            .run("echo ok > marker.txt", temp_dir.path())
            .unwrap();
        assert!(temp_dir.path().join("marker.txt").exists());
    }

    #[test]
    fn test_failure_carries_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let err = ShellRunner
            .run("echo broken >&2; exit 3", temp_dir.path())
            .unwrap_err();
        match err {
            GuardError::Generator { command, message } => {
                assert!(command.contains("exit 3"));
                assert_eq!(message, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
