//! Configuration Loader (Figment-based)
//!
//! Loads `agent-docs.config.json` from the project root on top of the built-in
//! defaults. A missing or malformed file is fatal: every other component is
//! driven by this policy.

use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::paths;
use crate::types::{GuardError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the project rooted at `root`:
    /// defaults → `agent-docs.config.json`
    pub fn load(root: &Path) -> Result<Config> {
        let path = Self::config_path(root);
        if !path.exists() {
            return Err(GuardError::ConfigMissing { path });
        }

        debug!("Loading config from: {}", path.display());
        Self::load_from_file(root, &path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(root: &Path, path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Json::file(path))
            .extract()
            .map_err(|e| GuardError::Config(format!("{}: {}", path.display(), e)))?;

        config.finalize(root)
    }

    /// Load configuration from an in-memory JSON document
    pub fn from_json(root: &Path, json: &str) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Json::string(json))
            .extract()
            .map_err(|e| GuardError::Config(format!("Configuration error: {}", e)))?;

        config.finalize(root)
    }

    /// Path of the policy file for a project root
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(paths::CONFIG_FILE)
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the starter config. Refuses to overwrite unless `force`.
    pub fn init_project(root: &Path, force: bool) -> Result<PathBuf> {
        let path = Self::config_path(root);
        if path.exists() && !force {
            return Err(GuardError::Config(format!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            )));
        }

        fs::write(&path, Self::default_project_config())?;
        info!("Created project config: {}", path.display());
        Ok(path)
    }

    /// Starter policy for a Next.js style repository
    pub fn default_project_config() -> String {
        r#"{
  "categories": [
    {
      "id": "api-routes",
      "name": "API Routes",
      "emoji": "🔌",
      "patternType": "regex",
      "filePattern": "^src/app/api/.*route\\.(ts|js)$",
      "docTarget": "docs/_generated/api-routes.md",
      "genCommand": "agent-guard generate api-routes"
    },
    {
      "id": "env",
      "name": "Environment Variables",
      "emoji": "🔑",
      "patternType": "exact",
      "filePattern": ".env.example",
      "docTarget": "docs/_generated/env-vars.md",
      "genCommand": "agent-guard generate env"
    },
    {
      "id": "schema",
      "name": "Database Schema",
      "emoji": "🗄️",
      "patternType": "startsWith",
      "filePattern": "prisma/",
      "docTarget": "docs/ARCHITECTURE.md"
    }
  ],
  "scanPaths": {
    "envFile": ".env.example",
    "sourceDir": "src"
  },
  "generatedDir": "docs/_generated",
  "envCategories": [
    { "prefix": "NEXT_PUBLIC_", "category": "Client" },
    { "prefix": "DATABASE_", "category": "Database" }
  ],
  "docsDir": "docs",
  "agentConfigFile": "CLAUDE.md",
  "architectureFile": "docs/ARCHITECTURE.md",
  "autoFix": {
    "generators": true,
    "narrative": {
      "enabled": true,
      "review": false,
      "narrativeTriggers": ["api-routes", "schema"],
      "additionalNarrativeTargets": []
    }
  }
}
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigLoader::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, GuardError::ConfigMissing { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(ConfigLoader::config_path(temp_dir.path()), "{ not json").unwrap();

        let err = ConfigLoader::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, GuardError::Config(_)));
    }

    #[test]
    fn test_load_merges_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            ConfigLoader::config_path(temp_dir.path()),
            r#"{
                "categories": [
                    {"id": "api", "name": "API", "patternType": "startsWith", "filePattern": "src/api/"}
                ],
                "autoFix": {"narrative": {"review": true}}
            }"#,
        )
        .unwrap();

        let config = ConfigLoader::load(temp_dir.path()).unwrap();
        assert_eq!(config.rules().len(), 1);
        assert_eq!(config.rules()[0].emoji, "📄");
        assert!(config.auto_fix.narrative.review);
        assert!(config.auto_fix.narrative.enabled);
        assert_eq!(config.docs_dir, "docs");
        assert_eq!(config.root(), temp_dir.path());
    }

    #[test]
    fn test_default_project_config_parses() {
        let config =
            ConfigLoader::from_json(Path::new("/repo"), &ConfigLoader::default_project_config())
                .unwrap();
        assert_eq!(config.rules().len(), 3);
        assert!(config.rule("api-routes").is_some());
        assert_eq!(
            config.auto_fix.narrative.narrative_triggers,
            vec!["api-routes".to_string(), "schema".to_string()]
        );
    }

    #[test]
    fn test_init_project_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        ConfigLoader::init_project(temp_dir.path(), false).unwrap();
        assert!(ConfigLoader::init_project(temp_dir.path(), false).is_err());
        assert!(ConfigLoader::init_project(temp_dir.path(), true).is_ok());
    }
}
