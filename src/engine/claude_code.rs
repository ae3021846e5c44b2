//! Claude Code CLI Engine
//!
//! Runs `claude -p -` in the project root with the prompt piped over stdin.
//! Passing the prompt as an argument would hit OS argument-length limits on
//! large change sets.
//!
//! Note: there is no retry. One attempt per hook run; failures fall back to
//! the manual prompt.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use super::{CodingEngine, EngineInvocationResult, ProgressFn, path_lookup_command, sanitize_prompt};
use crate::config::EngineConfig;
use crate::constants::engine::ENGINE_ID;
use crate::types::{ErrorCategory, ErrorClassifier, GuardError};

pub struct ClaudeCodeEngine {
    command: String,
    timeout_secs: u64,
}

impl ClaudeCodeEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            command: config.command.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    fn classify_failure(&self, stderr: &str) -> EngineInvocationResult {
        let category = ErrorClassifier::classify(Some(stderr));
        let message = ErrorClassifier::remediation(category, Some(stderr), &self.command);
        EngineInvocationResult::failed(category, message)
    }
}

#[async_trait]
impl CodingEngine for ClaudeCodeEngine {
    fn name(&self) -> &str {
        ENGINE_ID
    }

    fn command(&self) -> &str {
        &self.command
    }

    fn install_hint(&self) -> String {
        format!(
            "{} not found. Install Claude Code with `npm install -g @anthropic-ai/claude-code` to enable auto-fix.",
            self.command
        )
    }

    async fn detect(&self) -> Option<String> {
        let status = Command::new(path_lookup_command())
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {
                debug!("Found engine CLI: {}", self.command);
                Some(ENGINE_ID.to_string())
            }
            Ok(_) => None,
            Err(e) => {
                debug!("PATH lookup for {} failed: {}", self.command, e);
                None
            }
        }
    }

    async fn invoke(
        &self,
        prompt: &str,
        cwd: &Path,
        on_progress: ProgressFn<'_>,
    ) -> EngineInvocationResult {
        let prompt = sanitize_prompt(prompt);
        let limit = Duration::from_secs(self.timeout_secs);

        info!(
            "Invoking {} ({} bytes of prompt, timeout {}s)",
            self.command,
            prompt.len(),
            self.timeout_secs
        );

        let mut child = match Command::new(&self.command)
            .args(["-p", "-"])
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return EngineInvocationResult::failed(ErrorCategory::Unknown, self.install_hint());
            }
            Err(e) => {
                return EngineInvocationResult::failed(
                    ErrorCategory::Unknown,
                    format!("Failed to spawn {}: {}", self.command, e),
                );
            }
        };

        // Feed stdin from its own task so a chatty child cannot deadlock us
        if let Some(mut stdin) = child.stdin.take() {
            let bytes = prompt.into_bytes();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&bytes).await {
                    debug!("Writing prompt to engine stdin failed: {}", e);
                }
                let _ = stdin.shutdown().await;
            });
        }

        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        let stdout = child.stdout.take();
        let run = async {
            let mut output = String::new();
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    on_progress(&line);
                    output.push_str(&line);
                    output.push('\n');
                }
            }
            (output, child.wait().await)
        };

        let outcome = timeout(limit, run).await;

        let (output, status) = match outcome {
            Ok(done) => done,
            Err(_) => {
                let _ = child.kill().await;
                return EngineInvocationResult::failed(
                    ErrorCategory::Unknown,
                    GuardError::timeout(&self.command, limit).to_string(),
                );
            }
        };

        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        match status {
            Ok(status) if status.success() => EngineInvocationResult::ok(output),
            Ok(status) => {
                debug!("{} exited with {}", self.command, status);
                let detail = if stderr.trim().is_empty() {
                    output.as_str()
                } else {
                    stderr.as_str()
                };
                self.classify_failure(detail)
            }
            Err(e) => EngineInvocationResult::failed(
                ErrorCategory::Unknown,
                format!("{} execution failed: {}", self.command, e),
            ),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // `sh -p -` reads its script from stdin, which makes it a stand-in engine
    fn shell_engine(timeout_secs: u64) -> ClaudeCodeEngine {
        ClaudeCodeEngine::new(&EngineConfig {
            command: "sh".to_string(),
            timeout_secs,
        })
    }

    #[tokio::test]
    async fn test_detect_installed() {
        assert_eq!(shell_engine(5).detect().await.as_deref(), Some(ENGINE_ID));
    }

    #[tokio::test]
    async fn test_detect_missing() {
        let engine = ClaudeCodeEngine::new(&EngineConfig {
            command: "agent-guard-no-such-engine".to_string(),
            timeout_secs: 5,
        });
        assert!(engine.detect().await.is_none());
    }

    #[tokio::test]
    async fn test_invoke_pipes_prompt_over_stdin() {
        let engine = shell_engine(10);
        let seen = Mutex::new(Vec::new());
        let progress = |line: &str| seen.lock().unwrap().push(line.to_string());

        let result = engine
            .invoke("echo first\r\necho second\n", Path::new("."), &progress)
            .await;

        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.output, "first\nsecond\n");
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_invoke_classifies_auth_failure() {
        let engine = shell_engine(10);
        let result = engine
            .invoke(
                "echo 'Error: not authenticated' >&2; exit 1\n",
                Path::new("."),
                &|_| {},
            )
            .await;

        assert!(!result.success);
        assert_eq!(result.category, Some(ErrorCategory::Auth));
        assert!(result.error.unwrap().contains("not authenticated"));
    }

    #[tokio::test]
    async fn test_invoke_times_out() {
        let engine = shell_engine(1);
        let result = engine.invoke("sleep 5\n", Path::new("."), &|_| {}).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_invoke_missing_binary() {
        let engine = ClaudeCodeEngine::new(&EngineConfig {
            command: "agent-guard-no-such-engine".to_string(),
            timeout_secs: 5,
        });
        let result = engine.invoke("hi", Path::new("."), &|_| {}).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("not found"));
    }
}
