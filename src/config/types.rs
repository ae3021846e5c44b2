//! Configuration Types
//!
//! Mirrors `agent-docs.config.json`. All keys are camelCase on disk and every
//! section has a default so a minimal config only needs `categories`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::{Category, Matcher};
use crate::constants;
use crate::types::{GuardError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// File classification rules, evaluated in order
    pub categories: Vec<CategoryConfig>,

    /// Inputs for the built-in generators
    pub scan_paths: ScanPaths,

    /// Directory holding mechanically generated inventories
    pub generated_dir: String,

    /// Prefix to group mapping for the env inventory
    pub env_categories: Vec<EnvCategory>,

    /// Staging anything under this prefix counts as a doc update
    pub docs_dir: String,

    /// Agent instruction file; staging it counts as a doc update
    pub agent_config_file: String,

    /// Primary narrative doc the engine keeps current
    pub architecture_file: String,

    pub auto_fix: AutoFixConfig,

    pub engine: EngineConfig,

    pub audit: AuditConfig,

    pub quality: QualityConfig,

    #[serde(skip)]
    root: PathBuf,

    #[serde(skip)]
    rules: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            scan_paths: ScanPaths::default(),
            generated_dir: "docs/_generated".to_string(),
            env_categories: Vec::new(),
            docs_dir: "docs".to_string(),
            agent_config_file: "CLAUDE.md".to_string(),
            architecture_file: "docs/ARCHITECTURE.md".to_string(),
            auto_fix: AutoFixConfig::default(),
            engine: EngineConfig::default(),
            audit: AuditConfig::default(),
            quality: QualityConfig::default(),
            root: PathBuf::from("."),
            rules: Vec::new(),
        }
    }
}

impl Config {
    /// Validate value ranges. Returns `GuardError::Config` on failure.
    pub fn validate(&self) -> Result<()> {
        if self.engine.timeout_secs == 0 {
            return Err(GuardError::Config(
                "engine.timeoutSecs must be greater than 0".to_string(),
            ));
        }

        if self.audit.max_entries == 0 {
            return Err(GuardError::Config(
                "audit.maxEntries must be greater than 0".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(GuardError::Config("category id must not be empty".to_string()));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(GuardError::Config(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }

        Ok(())
    }

    /// Bind the config to a project root and compile category matchers
    pub(crate) fn finalize(mut self, root: &Path) -> Result<Self> {
        self.validate()?;
        self.root = root.to_path_buf();
        self.rules = self
            .categories
            .iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// Project root every relative path resolves against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compiled classification rules in declaration order
    pub fn rules(&self) -> &[Category] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&Category> {
        self.rules.iter().find(|c| c.id == id)
    }

    /// Resolve a config-relative path against the project root
    pub fn resolve_path(&self, relative: Option<&str>) -> Option<PathBuf> {
        let relative = relative?;
        let path = Path::new(relative);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(self.root.join(path))
        }
    }

    /// Files the engine is allowed to rewrite, architecture file first
    pub fn narrative_targets(&self) -> Vec<String> {
        let mut targets = vec![self.architecture_file.clone()];
        for extra in &self.auto_fix.narrative.additional_narrative_targets {
            if !targets.contains(extra) {
                targets.push(extra.clone());
            }
        }
        targets
    }

    pub fn audit_log_path(&self) -> PathBuf {
        self.root.join(&self.audit.log_file)
    }

    pub fn signal_file_path(&self) -> PathBuf {
        self.root.join(&self.audit.signal_file)
    }
}

// =============================================================================
// Categories
// =============================================================================

/// How `filePattern` is interpreted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PatternType {
    Exact,
    StartsWith,
    Regex,
}

/// One category as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub pattern_type: PatternType,
    pub file_pattern: String,
    #[serde(default)]
    pub doc_target: Option<String>,
    #[serde(default)]
    pub gen_command: Option<String>,
}

impl TryFrom<&CategoryConfig> for Category {
    type Error = GuardError;

    fn try_from(raw: &CategoryConfig) -> Result<Self> {
        let matcher = match raw.pattern_type {
            PatternType::Exact => Matcher::Exact(raw.file_pattern.clone()),
            PatternType::StartsWith => Matcher::Prefix(raw.file_pattern.clone()),
            PatternType::Regex => {
                let re = regex::Regex::new(&raw.file_pattern).map_err(|e| {
                    GuardError::Config(format!(
                        "category '{}' has an invalid regex: {}",
                        raw.id, e
                    ))
                })?;
                Matcher::Regex(re)
            }
        };

        Ok(Category {
            id: raw.id.clone(),
            name: raw.name.clone(),
            emoji: raw.emoji.clone().unwrap_or_else(|| "📄".to_string()),
            matcher,
            doc_target: raw.doc_target.clone(),
            gen_command: raw.gen_command.clone(),
        })
    }
}

// =============================================================================
// Generators
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanPaths {
    /// Example env file listing every variable the app reads
    pub env_file: String,
    /// Source tree scanned for API route handlers
    pub source_dir: String,
}

impl Default for ScanPaths {
    fn default() -> Self {
        Self {
            env_file: ".env.example".to_string(),
            source_dir: "src".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvCategory {
    pub prefix: String,
    pub category: String,
}

// =============================================================================
// Auto-fix
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoFixConfig {
    /// Run category `genCommand`s automatically
    pub generators: bool,
    pub narrative: NarrativeConfig,
}

impl Default for AutoFixConfig {
    fn default() -> Self {
        Self {
            generators: true,
            narrative: NarrativeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NarrativeConfig {
    pub enabled: bool,
    /// Ask for y/N confirmation on the controlling terminal
    pub review: bool,
    /// Category ids that warrant a narrative update
    pub narrative_triggers: Vec<String>,
    pub additional_narrative_targets: Vec<String>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            review: false,
            narrative_triggers: Vec::new(),
            additional_narrative_targets: Vec::new(),
        }
    }
}

// =============================================================================
// Engine / Audit / Quality
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// CLI binary looked up on PATH
    pub command: String,
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: constants::engine::DEFAULT_COMMAND.to_string(),
            timeout_secs: constants::engine::TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditConfig {
    pub log_file: String,
    pub signal_file: String,
    pub max_entries: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_file: constants::paths::AUDIT_LOG.to_string(),
            signal_file: constants::paths::SIGNAL_FILE.to_string(),
            max_entries: constants::audit::MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityConfig {
    pub required_sections: Vec<String>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            required_sections: constants::quality::REQUIRED_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, pattern_type: PatternType, pattern: &str) -> CategoryConfig {
        CategoryConfig {
            id: id.to_string(),
            name: id.to_string(),
            emoji: None,
            pattern_type,
            file_pattern: pattern.to_string(),
            doc_target: None,
            gen_command: None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine.timeout_secs, 120);
        assert_eq!(config.audit.max_entries, 500);
        assert!(config.auto_fix.generators);
        assert!(!config.auto_fix.narrative.review);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_path() {
        let config = Config::default().finalize(Path::new("/repo")).unwrap();
        assert_eq!(
            config.resolve_path(Some("docs/a.md")),
            Some(PathBuf::from("/repo/docs/a.md"))
        );
        assert_eq!(config.resolve_path(None), None);
        assert_eq!(
            config.resolve_path(Some("/abs/file")),
            Some(PathBuf::from("/abs/file"))
        );
    }

    #[test]
    fn test_finalize_rejects_bad_regex() {
        let mut config = Config::default();
        config
            .categories
            .push(category("broken", PatternType::Regex, "route(\\.ts$"));
        let err = config.finalize(Path::new("/repo")).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut config = Config::default();
        config
            .categories
            .push(category("api", PatternType::Exact, "a"));
        config
            .categories
            .push(category("api", PatternType::Exact, "b"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_narrative_targets_dedup() {
        let mut config = Config::default();
        config.auto_fix.narrative.additional_narrative_targets = vec![
            "README.md".to_string(),
            "docs/ARCHITECTURE.md".to_string(),
        ];
        assert_eq!(
            config.narrative_targets(),
            vec!["docs/ARCHITECTURE.md".to_string(), "README.md".to_string()]
        );
    }
}
