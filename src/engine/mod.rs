//! External Engine Adapter
//!
//! Abstraction over an AI coding CLI that can edit files in the working tree.
//! The hook only needs three things from it: is it installed, run this prompt,
//! and why did it fail.

mod claude_code;

pub use claude_code::ClaudeCodeEngine;

use async_trait::async_trait;
use std::path::Path;

use crate::types::ErrorCategory;

/// Progress callback receiving one line of engine output at a time
pub type ProgressFn<'a> = &'a (dyn Fn(&str) + Send + Sync);

/// Outcome of a single engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInvocationResult {
    pub success: bool,
    pub output: String,
    /// User-facing remediation message on failure
    pub error: Option<String>,
    pub category: Option<ErrorCategory>,
}

impl EngineInvocationResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
            category: None,
        }
    }

    pub fn failed(category: ErrorCategory, error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
            category: Some(category),
        }
    }
}

#[async_trait]
pub trait CodingEngine: Send + Sync {
    /// Identifier recorded in the audit log
    fn name(&self) -> &str;

    /// Binary looked up on PATH
    fn command(&self) -> &str;

    /// How to install the CLI when it is missing
    fn install_hint(&self) -> String;

    /// Engine id if the CLI is resolvable on PATH
    async fn detect(&self) -> Option<String>;

    /// Run one prompt in `cwd`; never returns an `Err`
    async fn invoke(
        &self,
        prompt: &str,
        cwd: &Path,
        on_progress: ProgressFn<'_>,
    ) -> EngineInvocationResult;
}

/// Strip NUL bytes and normalize line endings to `\n`
pub fn sanitize_prompt(text: &str) -> String {
    text.replace('\0', "")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Platform lookup command for resolving a binary on PATH
pub(crate) fn path_lookup_command() -> &'static str {
    if cfg!(windows) { "where" } else { "which" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_prompt() {
        assert_eq!(sanitize_prompt("a\0b\r\nc"), "ab\nc");
        assert_eq!(sanitize_prompt("old\rmac"), "old\nmac");
        assert_eq!(sanitize_prompt("\r\0\n"), "\n");
        assert_eq!(sanitize_prompt("clean\n"), "clean\n");
    }

    proptest! {
        #[test]
        fn prop_sanitize_removes_nul_and_cr(text in "[a-z\r\n\0 ]{0,64}") {
            let once = sanitize_prompt(&text);
            prop_assert!(!once.contains('\0'));
            prop_assert!(!once.contains("\r\n"));
            prop_assert_eq!(sanitize_prompt(&once), once.clone());
        }
    }
}
