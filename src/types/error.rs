//! Unified Error Type System
//!
//! Centralized error types for the hook and its companion commands.
//! Provides classification of external engine failures so the user gets a
//! remediation hint instead of a raw stderr dump.
//!
//! ## Error Categories
//!
//! - **Auth**: The engine CLI is installed but not logged in
//! - **Offline**: The engine could not reach its backend
//! - **Unknown**: Anything else (shown truncated)
//!
//! ## Propagation
//!
//! - Config errors are fatal and surface to `main`
//! - Engine, generator and git errors are recoverable and degrade the hook to
//!   the manual prompt path
//! - Audit log errors are returned but intentionally discarded by callers

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

use crate::constants::engine::ERROR_EXCERPT_CHARS;

// =============================================================================
// Error Categories
// =============================================================================

/// Failure classes for external engine invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Engine reported missing or expired credentials
    Auth,
    /// Engine could not reach the network
    Offline,
    /// Unrecognized failure
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "auth"),
            Self::Offline => write!(f, "offline"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

// Network codes are checked first: a resolver failure that happens to
// mention "401" in an address is still an offline failure.
static OFFLINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:enotfound|econnrefused|econnreset|etimedout|eai_again|getaddrinfo|network|offline|unreachable|could not resolve host|connection refused)",
    )
    .expect("valid regex")
});

static AUTH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:not authenticated|unauthenticated|authentication|unauthorized|not logged in|log ?in|api key|invalid key|401)\b",
    )
    .expect("valid regex")
});

/// Classifies engine stderr text into an [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify raw stderr text. Empty or absent text is `Unknown`.
    pub fn classify(message: Option<&str>) -> ErrorCategory {
        let Some(message) = message else {
            return ErrorCategory::Unknown;
        };
        if message.trim().is_empty() {
            return ErrorCategory::Unknown;
        }

        if OFFLINE_PATTERN.is_match(message) {
            ErrorCategory::Offline
        } else if AUTH_PATTERN.is_match(message) {
            ErrorCategory::Auth
        } else {
            ErrorCategory::Unknown
        }
    }

    /// Build a user-facing remediation message for a classified failure
    pub fn remediation(category: ErrorCategory, raw: Option<&str>, engine_cmd: &str) -> String {
        match category {
            ErrorCategory::Auth => format!(
                "{} is not authenticated. Run `{}` once in a terminal to log in, then retry the commit.",
                engine_cmd, engine_cmd
            ),
            ErrorCategory::Offline => format!(
                "{} could not reach its service. Auto-fix requires network connectivity.",
                engine_cmd
            ),
            ErrorCategory::Unknown => {
                let raw = raw.map(str::trim).filter(|s| !s.is_empty());
                match raw {
                    Some(text) => format!("{} failed: {}", engine_cmd, truncate(text)),
                    None => format!("{} failed without error output", engine_cmd),
                }
            }
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= ERROR_EXCERPT_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(ERROR_EXCERPT_CHARS).collect();
    format!("{}…", head)
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum GuardError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    // -------------------------------------------------------------------------
    // Config Errors (fatal)
    // -------------------------------------------------------------------------
    #[error("Config file not found: {}. Run 'agent-guard init' to create one.", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Recoverable Errors
    // -------------------------------------------------------------------------
    #[error("Git error: {0}")]
    Git(String),

    #[error("Generator `{command}` failed: {message}")]
    Generator { command: String, message: String },

    #[error("{operation} timed out after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("Documentation check failed: {0} issue(s)")]
    QualityCheck(usize),
}

pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Config errors stop the process; everything else degrades
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ConfigMissing { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth() {
        assert_eq!(
            ErrorClassifier::classify(Some("Error: not authenticated")),
            ErrorCategory::Auth
        );
        assert_eq!(
            ErrorClassifier::classify(Some("401 Unauthorized")),
            ErrorCategory::Auth
        );
        assert_eq!(
            ErrorClassifier::classify(Some("Please run /login")),
            ErrorCategory::Auth
        );
        assert_eq!(
            ErrorClassifier::classify(Some("Invalid API key. Please log in again.")),
            ErrorCategory::Auth
        );
    }

    #[test]
    fn test_classify_offline() {
        assert_eq!(
            ErrorClassifier::classify(Some("ENOTFOUND registry")),
            ErrorCategory::Offline
        );
        assert_eq!(
            ErrorClassifier::classify(Some("connect ECONNREFUSED 127.0.0.1:443")),
            ErrorCategory::Offline
        );
        // Digits and words that merely contain an auth keyword
        assert_eq!(
            ErrorClassifier::classify(Some("ENOTFOUND 10.0.0.4010")),
            ErrorCategory::Offline
        );
        assert_eq!(
            ErrorClassifier::classify(Some("getaddrinfo EAI_AGAIN api.example.com:401")),
            ErrorCategory::Offline
        );
        assert_eq!(
            ErrorClassifier::classify(Some("network error reading blog in cache")),
            ErrorCategory::Offline
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(ErrorClassifier::classify(Some("boom")), ErrorCategory::Unknown);
        assert_eq!(
            ErrorClassifier::classify(Some("failed to read catalog index")),
            ErrorCategory::Unknown
        );
        assert_eq!(
            ErrorClassifier::classify(Some("exit code 4015 while writing blog input")),
            ErrorCategory::Unknown
        );
        assert_eq!(ErrorClassifier::classify(Some("")), ErrorCategory::Unknown);
        assert_eq!(ErrorClassifier::classify(Some("   \n")), ErrorCategory::Unknown);
        assert_eq!(ErrorClassifier::classify(None), ErrorCategory::Unknown);
    }

    #[test]
    fn test_remediation_messages() {
        let auth = ErrorClassifier::remediation(ErrorCategory::Auth, None, "claude");
        assert!(auth.contains("not authenticated"));
        assert!(auth.contains("`claude`"));

        let offline = ErrorClassifier::remediation(ErrorCategory::Offline, None, "claude");
        assert!(offline.contains("network connectivity"));

        let unknown = ErrorClassifier::remediation(ErrorCategory::Unknown, Some("boom"), "claude");
        assert_eq!(unknown, "claude failed: boom");
    }

    #[test]
    fn test_remediation_truncates_long_errors() {
        let long = "x".repeat(ERROR_EXCERPT_CHARS * 2);
        let msg = ErrorClassifier::remediation(ErrorCategory::Unknown, Some(&long), "claude");
        assert!(msg.ends_with('…'));
        assert!(msg.chars().count() < long.len());
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Auth.to_string(), "auth");
        assert_eq!(ErrorCategory::Offline.to_string(), "offline");
        assert_eq!(ErrorCategory::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_fatal_errors() {
        assert!(GuardError::Config("bad".into()).is_fatal());
        assert!(!GuardError::Git("add failed".into()).is_fatal());
    }
}
