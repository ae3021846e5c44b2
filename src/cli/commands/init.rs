//! Init Command
//!
//! Write the starter policy and install the git pre-commit hook.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::constants::paths;
use crate::types::{GuardError, Result};

const HOOK_SCRIPT: &str = "#!/bin/sh\n# Installed by agent-guard. Never blocks the commit.\nexec agent-guard pre-commit \"$@\"\n";

pub fn run(root: &Path, force: bool, install_hook: bool, output: &Output) -> Result<()> {
    let config_path = ConfigLoader::init_project(root, force)?;
    output.success(&format!("Created {}", display_relative(root, &config_path)));

    if install_hook {
        match install_pre_commit_hook(root, force) {
            Ok(hook) => output.success(&format!(
                "Installed pre-commit hook at {}",
                display_relative(root, &hook)
            )),
            Err(e) => output.warning(&format!("Hook not installed: {}", e)),
        }
    }

    output.header("Next steps");
    output.detail("1. Edit the categories in agent-docs.config.json to match your repo");
    output.detail("2. Run 'agent-guard check-docs' in CI to lint the docs");
    Ok(())
}

/// Write `.git/hooks/pre-commit`. An existing hook is kept unless `force`.
pub fn install_pre_commit_hook(root: &Path, force: bool) -> Result<PathBuf> {
    let hook = root.join(paths::PRE_COMMIT_HOOK);
    let Some(hooks_dir) = hook.parent() else {
        return Err(GuardError::Git("invalid hook path".to_string()));
    };

    if !root.join(".git").is_dir() {
        return Err(GuardError::Git(format!(
            "{} is not a git repository",
            root.display()
        )));
    }

    if hook.exists() && !force {
        return Err(GuardError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            hook.display()
        )));
    }

    fs::create_dir_all(hooks_dir)?;
    fs::write(&hook, HOOK_SCRIPT)?;
    make_executable(&hook)?;
    Ok(hook)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
