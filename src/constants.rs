//! Global Constants
//!
//! Centralized constants for file locations and tuning.

/// Well-known paths relative to the project root
pub mod paths {
    /// Policy file read by every command
    pub const CONFIG_FILE: &str = "agent-docs.config.json";

    /// Default append-only audit log
    pub const AUDIT_LOG: &str = ".agent-guard/log.json";

    /// Marker consumed by the commit-msg hook after a narrative auto-fix
    pub const SIGNAL_FILE: &str = ".agent-guard/.auto-fix-ran";

    /// Git hook installed by `agent-guard init`
    pub const PRE_COMMIT_HOOK: &str = ".git/hooks/pre-commit";
}

/// Audit log constants
pub mod audit {
    /// Maximum retained entries; oldest are evicted first
    pub const MAX_ENTRIES: usize = 500;
}

/// External engine constants
pub mod engine {
    /// Default engine CLI binary
    pub const DEFAULT_COMMAND: &str = "claude";

    /// Identifier recorded in the audit log
    pub const ENGINE_ID: &str = "claude-code";

    /// Hard wall-clock limit for one engine invocation (seconds)
    pub const TIMEOUT_SECS: u64 = 120;

    /// Characters of raw stderr kept in an `unknown` failure message
    pub const ERROR_EXCERPT_CHARS: usize = 200;
}

/// Quality checker constants
pub mod quality {
    /// Literal markers the architecture doc must contain
    pub const REQUIRED_SECTIONS: &[&str] = &["## Overview", "API Routes"];
}
