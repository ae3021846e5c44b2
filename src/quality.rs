//! Documentation Quality Checker
//!
//! Lint-style checks over markdown, run in CI rather than in the hook:
//!
//! - Unbalanced code fences
//! - Missing required section markers
//! - Leftover placeholders (`TODO`, `FIXME`, `HACK`, fill-in-the-blank text)
//!
//! Each check returns a list of issue strings; an empty list means clean.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use tracing::debug;

use crate::config::Config;

static TODO_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:TODO|FIXME|HACK)\b").expect("valid regex"));

static FILL_IN_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*(?:fill\s+in|insert)\b[^\]]*\]|\bfill\s+in\s+the\s+blanks?\b")
        .expect("valid regex")
});

/// Placeholder patterns with the label used in issue text
fn placeholder_patterns() -> [(&'static str, &'static Regex); 2] {
    [
        ("TODO/FIXME/HACK marker", &*TODO_MARKERS),
        ("fill-in placeholder", &*FILL_IN_MARKERS),
    ]
}

/// Odd number of ``` means a code block never closes
pub fn check_markdown_validity(text: &str) -> Vec<String> {
    let fences = text.matches("```").count();
    if fences % 2 == 1 {
        vec![format!(
            "Unclosed code block ({} ``` fences, expected an even number)",
            fences
        )]
    } else {
        Vec::new()
    }
}

/// Every required literal marker must appear at least once
pub fn check_required_sections<S: AsRef<str>>(text: &str, required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|section| !text.contains(*section))
        .map(|section| format!("Missing required section: \"{}\"", section))
        .collect()
}

/// One issue per placeholder pattern that matches, with its match count
pub fn check_placeholders(text: &str) -> Vec<String> {
    placeholder_patterns()
        .iter()
        .filter_map(|(label, re)| {
            let count = re.find_iter(text).count();
            (count > 0).then(|| format!("Found {} {}(s)", count, label))
        })
        .collect()
}

/// Issues found in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIssues {
    pub file: String,
    pub issues: Vec<String>,
}

/// Aggregated result across all checked files
#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub files_checked: usize,
    pub findings: Vec<FileIssues>,
}

impl QualityReport {
    pub fn issue_count(&self) -> usize {
        self.findings.iter().map(|f| f.issues.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    fn add(&mut self, file: String, issues: Vec<String>) {
        self.files_checked += 1;
        if !issues.is_empty() {
            self.findings.push(FileIssues { file, issues });
        }
    }
}

/// Check the architecture doc and every markdown file in the generated dir
pub fn check_project(config: &Config) -> QualityReport {
    let mut report = QualityReport::default();
    let root = config.root();

    let architecture = config.architecture_file.clone();
    match fs::read_to_string(root.join(&architecture)) {
        Ok(text) => {
            let mut issues = check_markdown_validity(&text);
            issues.extend(check_required_sections(
                &text,
                &config.quality.required_sections,
            ));
            issues.extend(check_placeholders(&text));
            report.add(architecture, issues);
        }
        Err(e) => {
            debug!("Cannot read {}: {}", architecture, e);
            report.add(architecture, vec!["File not found".to_string()]);
        }
    }

    for path in generated_markdown(root, &config.generated_dir) {
        let display = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        match fs::read_to_string(&path) {
            Ok(text) => {
                let mut issues = check_markdown_validity(&text);
                issues.extend(check_placeholders(&text));
                report.add(display, issues);
            }
            Err(e) => report.add(display, vec![format!("Unreadable: {}", e)]),
        }
    }

    report
}

fn generated_markdown(root: &Path, generated_dir: &str) -> Vec<std::path::PathBuf> {
    let pattern = root.join(generated_dir).join("**").join("*.md");
    let Some(pattern) = pattern.to_str() else {
        return Vec::new();
    };

    match glob::glob(pattern) {
        Ok(paths) => {
            let mut files: Vec<_> = paths.filter_map(|p| p.ok()).collect();
            files.sort();
            files
        }
        Err(e) => {
            debug!("Invalid generated docs pattern {}: {}", pattern, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use tempfile::TempDir;

    #[test]
    fn test_fence_balance() {
        assert!(check_markdown_validity("no code here").is_empty());
        assert!(check_markdown_validity("```rust\nfn main() {}\n```\n").is_empty());
        assert_eq!(check_markdown_validity("```\nopen forever").len(), 1);
        assert_eq!(check_markdown_validity("```\n```\n```").len(), 1);
    }

    #[test]
    fn test_required_sections() {
        let text = "# Arch\n\n## Overview\n\nStuff.\n";
        let issues = check_required_sections(text, &["## Overview", "API Routes"]);
        assert_eq!(issues, vec!["Missing required section: \"API Routes\"".to_string()]);
        assert!(check_required_sections::<&str>(text, &[]).is_empty());
    }

    #[test]
    fn test_placeholder_counts() {
        let doc = "TODO: write intro\nSome todo list here.\nfixme later\nHACK\nTODOS and mastodon are fine\n";
        let issues = check_placeholders(doc);
        assert_eq!(issues, vec!["Found 4 TODO/FIXME/HACK marker(s)".to_string()]);
    }

    #[test]
    fn test_fill_in_placeholder() {
        let issues = check_placeholders("Owner: [Fill in team name]\n");
        assert_eq!(issues, vec!["Found 1 fill-in placeholder(s)".to_string()]);
    }

    #[test]
    fn test_clean_document() {
        assert!(check_placeholders("# Overview\n\nAll routes documented.\n").is_empty());
    }

    #[test]
    fn test_check_project_aggregates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("docs/_generated/nested")).unwrap();
        fs::write(
            root.join("docs/ARCHITECTURE.md"),
            "# Architecture\n\n## Overview\n\nSee API Routes.\n",
        )
        .unwrap();
        fs::write(root.join("docs/_generated/env-vars.md"), "# Env\n```\n").unwrap();
        fs::write(root.join("docs/_generated/nested/routes.md"), "TODO\n").unwrap();

        let config = ConfigLoader::from_json(root, "{}").unwrap();
        let report = check_project(&config);

        assert_eq!(report.files_checked, 3);
        assert_eq!(report.issue_count(), 2);
        let files: Vec<_> = report.findings.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(
            files,
            vec!["docs/_generated/env-vars.md", "docs/_generated/nested/routes.md"]
        );
    }

    #[test]
    fn test_missing_architecture_is_issue() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::from_json(temp_dir.path(), "{}").unwrap();
        let report = check_project(&config);
        assert!(!report.is_clean());
        assert_eq!(report.findings[0].file, "docs/ARCHITECTURE.md");
    }
}
