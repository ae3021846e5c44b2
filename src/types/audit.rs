//! Audit record types
//!
//! One [`AuditLogEntry`] is produced per hook run that reaches classification.

use serde::{Deserialize, Serialize};

/// How a hook run concluded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AuditMode {
    /// At least one generator or narrative update ran successfully
    AutoFix,
    /// Doc-relevant changes, nothing fixed, fallback prompt shown
    Prompt,
    /// No staged file matched a category
    Skip,
    /// Doc-relevant changes were committed together with doc updates
    Sync,
}

impl AuditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoFix => "auto-fix",
            Self::Prompt => "prompt",
            Self::Skip => "skip",
            Self::Sync => "sync",
        }
    }
}

impl std::fmt::Display for AuditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generator command that ran to completion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorResult {
    pub command: String,
    pub status: String,
}

impl GeneratorResult {
    pub fn regenerated(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            status: "regenerated".to_string(),
        }
    }
}

/// A narrative doc file the engine updated and the hook staged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NarrativeResult {
    pub file: String,
    pub status: String,
}

impl NarrativeResult {
    pub fn updated(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: "narrative updated".to_string(),
        }
    }
}

/// Immutable record of a single hook run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub timestamp: String,
    pub commit_hash: Option<String>,
    pub mode: AuditMode,
    pub engine: Option<String>,
    #[serde(default)]
    pub generator_results: Vec<GeneratorResult>,
    #[serde(default)]
    pub narrative_results: Vec<NarrativeResult>,
    /// Why the run fell back to the manual prompt, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditLogEntry {
    pub fn new(mode: AuditMode, commit_hash: Option<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            commit_hash,
            mode,
            engine: None,
            generator_results: Vec::new(),
            narrative_results: Vec::new(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&AuditMode::AutoFix).unwrap(),
            "\"auto-fix\""
        );
        assert_eq!(serde_json::to_string(&AuditMode::Sync).unwrap(), "\"sync\"");
        assert_eq!(AuditMode::Prompt.to_string(), "prompt");
    }

    #[test]
    fn test_entry_uses_camel_case_keys() {
        let mut entry = AuditLogEntry::new(AuditMode::AutoFix, Some("abc123".into()));
        entry.engine = Some("claude-code".into());
        entry
            .generator_results
            .push(GeneratorResult::regenerated("npm run gen:env"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["commitHash"], "abc123");
        assert_eq!(json["mode"], "auto-fix");
        assert_eq!(json["generatorResults"][0]["status"], "regenerated");
        assert!(json.get("error").is_none());
    }
}
