//! Version control access
//!
//! The orchestrator talks to git only through [`Vcs`]. Staging and revert
//! calls return `Result` so callers decide what to swallow; a path that does
//! not exist or has no changes is not worth blocking a commit over.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::types::{GuardError, Result};

pub trait Vcs: Send + Sync {
    /// Repository-relative paths in the index, in git's order
    fn staged_files(&self) -> Result<Vec<String>>;

    /// `git add` a file or directory
    fn stage(&self, path: &str) -> Result<()>;

    /// Discard working-tree edits to `path`
    fn revert(&self, path: &str) -> Result<()>;

    /// Unstaged diff for `path`
    fn diff(&self, path: &str) -> Result<String>;

    /// Current HEAD commit, if any
    fn head_commit(&self) -> Option<String>;
}

/// [`Vcs`] backed by the `git` CLI
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| GuardError::Git(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GuardError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Whether `root` is inside a work tree
    pub fn is_repository(&self) -> bool {
        self.git(&["rev-parse", "--git-dir"]).is_ok()
    }
}

impl Vcs for GitCli {
    fn staged_files(&self) -> Result<Vec<String>> {
        let out = self.git(&["diff", "--cached", "--name-only", "--diff-filter=ACMR"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn stage(&self, path: &str) -> Result<()> {
        debug!("git add {}", path);
        self.git(&["add", "--", path]).map(|_| ())
    }

    fn revert(&self, path: &str) -> Result<()> {
        debug!("git checkout {}", path);
        self.git(&["checkout", "--", path]).map(|_| ())
    }

    fn diff(&self, path: &str) -> Result<String> {
        self.git(&["diff", "--", path])
    }

    fn head_commit(&self) -> Option<String> {
        self.git(&["rev-parse", "HEAD"])
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> Option<(TempDir, GitCli)> {
        let temp_dir = TempDir::new().unwrap();
        let git = GitCli::new(temp_dir.path());
        git.git(&["init", "-q"]).ok()?;
        git.git(&["config", "user.email", "hook@example.com"]).ok()?;
        git.git(&["config", "user.name", "Hook Test"]).ok()?;
        Some((temp_dir, git))
    }

    #[test]
    fn test_staged_files_and_revert() {
        // Skip when git is unavailable in the test environment
        let Some((dir, git)) = init_repo() else {
            return;
        };
        assert!(git.is_repository());
        assert!(git.head_commit().is_none());

        fs::write(dir.path().join("a.md"), "one\n").unwrap();
        git.stage("a.md").unwrap();
        assert_eq!(git.staged_files().unwrap(), vec!["a.md".to_string()]);

        git.git(&["commit", "-q", "-m", "init"]).unwrap();
        assert!(git.head_commit().is_some());

        fs::write(dir.path().join("a.md"), "two\n").unwrap();
        assert!(git.diff("a.md").unwrap().contains("+two"));

        git.revert("a.md").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), "one\n");
    }

    #[test]
    fn test_stage_missing_path_is_error() {
        let Some((_dir, git)) = init_repo() else {
            return;
        };
        assert!(git.stage("does/not/exist").is_err());
    }
}
