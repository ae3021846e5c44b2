//! Environment variable inventory
//!
//! Reads the example env file and writes `env-vars.md`, one table per group.
//! Groups come from `envCategories` (first matching prefix wins) and keep the
//! order in which they first appear in the env file.

use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::{Config, EnvCategory};
use crate::types::{GuardError, Result};

const OTHER_GROUP: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    /// Example value with quotes stripped; empty when unset
    pub example: String,
    /// Comment lines directly above the variable
    pub description: Option<String>,
}

/// Parse `KEY=value` lines. Comments directly above a key become its description.
pub fn parse_env_file(content: &str) -> Vec<EnvVar> {
    let mut vars = Vec::new();
    let mut pending_comment: Vec<String> = Vec::new();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() {
            pending_comment.clear();
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            pending_comment.push(comment.trim().to_string());
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((name, value)) = line.split_once('=') else {
            pending_comment.clear();
            continue;
        };

        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            pending_comment.clear();
            continue;
        }

        let description = (!pending_comment.is_empty()).then(|| pending_comment.join(" "));
        pending_comment.clear();

        vars.push(EnvVar {
            name: name.to_string(),
            example: unquote(value.trim()).to_string(),
            description,
        });
    }

    vars
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Group name for a variable; first matching prefix wins
pub fn group_for<'a>(name: &str, categories: &'a [EnvCategory]) -> &'a str {
    categories
        .iter()
        .find(|c| name.starts_with(&c.prefix))
        .map(|c| c.category.as_str())
        .unwrap_or(OTHER_GROUP)
}

/// Render the inventory markdown
pub fn render(vars: &[EnvVar], categories: &[EnvCategory], source: &str) -> String {
    let mut groups: Vec<(&str, Vec<&EnvVar>)> = Vec::new();
    for var in vars {
        let group = group_for(&var.name, categories);
        match groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, members)) => members.push(var),
            None => groups.push((group, vec![var])),
        }
    }

    let mut out = String::new();
    out.push_str("# Environment Variables\n\n");
    let _ = writeln!(
        out,
        "Generated from `{}` by `agent-guard generate env`. Do not edit by hand.\n",
        source
    );
    let _ = writeln!(out, "Total: {} variable(s)", vars.len());

    for (group, members) in groups {
        let _ = writeln!(out, "\n## {}\n", group);
        out.push_str("| Variable | Example | Description |\n");
        out.push_str("|----------|---------|-------------|\n");
        for var in members {
            let example = if var.example.is_empty() {
                String::new()
            } else {
                format!("`{}`", var.example.replace('|', "\\|"))
            };
            let _ = writeln!(
                out,
                "| `{}` | {} | {} |",
                var.name,
                example,
                var.description.as_deref().unwrap_or("").replace('|', "\\|")
            );
        }
    }

    out
}

/// Regenerate `<generatedDir>/env-vars.md`
pub fn generate(config: &Config) -> Result<PathBuf> {
    let source = config
        .resolve_path(Some(&config.scan_paths.env_file))
        .ok_or_else(|| GuardError::Config("scanPaths.envFile is empty".to_string()))?;
    let content = fs::read_to_string(&source).map_err(|e| GuardError::Generator {
        command: "generate env".to_string(),
        message: format!("cannot read {}: {}", source.display(), e),
    })?;

    let vars = parse_env_file(&content);
    let markdown = render(&vars, &config.env_categories, &config.scan_paths.env_file);

    let out_dir = config.root().join(&config.generated_dir);
    fs::create_dir_all(&out_dir)?;
    let out_path = out_dir.join("env-vars.md");
    fs::write(&out_path, markdown)?;

    info!("Wrote {} env vars to {}", vars.len(), out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# Postgres connection string
DATABASE_URL=\"postgres://localhost/app\"
DATABASE_POOL=5

# Shown in the browser
NEXT_PUBLIC_SITE_URL=https://example.com
export SECRET_KEY=
not a var
BAD-NAME=1
";

    fn categories() -> Vec<EnvCategory> {
        vec![
            EnvCategory {
                prefix: "NEXT_PUBLIC_".into(),
                category: "Client".into(),
            },
            EnvCategory {
                prefix: "DATABASE_".into(),
                category: "Database".into(),
            },
        ]
    }

    #[test]
    fn test_parse_env_file() {
        let vars = parse_env_file(SAMPLE);
        let names: Vec<_> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["DATABASE_URL", "DATABASE_POOL", "NEXT_PUBLIC_SITE_URL", "SECRET_KEY"]
        );
        assert_eq!(vars[0].example, "postgres://localhost/app");
        assert_eq!(vars[0].description.as_deref(), Some("Postgres connection string"));
        assert_eq!(vars[1].description, None);
        assert_eq!(vars[3].example, "");
    }

    #[test]
    fn test_group_for() {
        let cats = categories();
        assert_eq!(group_for("NEXT_PUBLIC_X", &cats), "Client");
        assert_eq!(group_for("DATABASE_URL", &cats), "Database");
        assert_eq!(group_for("SECRET_KEY", &cats), "Other");
    }

    #[test]
    fn test_render_groups_in_first_seen_order() {
        let md = render(&parse_env_file(SAMPLE), &categories(), ".env.example");
        let database = md.find("## Database").unwrap();
        let client = md.find("## Client").unwrap();
        let other = md.find("## Other").unwrap();
        assert!(database < client && client < other);
        assert!(md.contains("| `DATABASE_URL` | `postgres://localhost/app` | Postgres connection string |"));
        assert!(md.contains("Total: 4 variable(s)"));
    }

    #[test]
    fn test_generate_writes_inventory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env.example"), SAMPLE).unwrap();
        let config = ConfigLoader::from_json(
            temp_dir.path(),
            r#"{"envCategories": [{"prefix": "DATABASE_", "category": "Database"}]}"#,
        )
        .unwrap();

        let path = generate(&config).unwrap();
        assert!(path.ends_with("docs/_generated/env-vars.md"));
        let md = fs::read_to_string(path).unwrap();
        assert!(md.contains("## Database"));
        assert!(md.contains("`SECRET_KEY`"));
    }

    #[test]
    fn test_generate_missing_env_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::from_json(temp_dir.path(), "{}").unwrap();
        assert!(matches!(
            generate(&config),
            Err(GuardError::Generator { .. })
        ));
    }
}
