//! Interactive review of engine edits
//!
//! The hook's stdin is not a terminal under git, so the prompt talks to the
//! controlling terminal device directly. No device means CI or a piped
//! context, and edits are accepted without asking.

use console::style;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub trait ReviewGate: Send + Sync {
    /// Whether a human can be asked right now
    fn has_interactive_terminal(&self) -> bool;

    /// Show `(path, diff)` pairs and return true if the operator accepts
    fn confirm(&self, diffs: &[(String, String)]) -> bool;
}

/// Reviews on the controlling terminal
pub struct TtyReview;

fn tty_device_path() -> &'static str {
    if cfg!(windows) { "CONIN$" } else { "/dev/tty" }
}

fn open_tty() -> Option<File> {
    File::open(tty_device_path()).ok()
}

impl ReviewGate for TtyReview {
    fn has_interactive_terminal(&self) -> bool {
        open_tty().is_some()
    }

    fn confirm(&self, diffs: &[(String, String)]) -> bool {
        let Some(tty) = open_tty() else {
            return true;
        };

        eprintln!();
        eprintln!("{}", style("Review documentation changes").bold().underlined());
        for (path, diff) in diffs {
            eprintln!("\n{}", style(path).bold());
            if diff.trim().is_empty() {
                eprintln!("  (no changes)");
                continue;
            }
            for line in diff.lines() {
                eprintln!("{}", colorize_diff_line(line));
            }
        }
        eprint!("\nAccept these documentation changes? [y/N] ");

        let mut answer = String::new();
        let accepted = match BufReader::new(tty).read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::debug!("Reading review answer failed: {}", e);
                false
            }
        };
        eprintln!();
        accepted
    }
}

fn colorize_diff_line(line: &str) -> String {
    if line.starts_with("+++") || line.starts_with("---") {
        style(line).bold().to_string()
    } else if line.starts_with('+') {
        style(line).green().to_string()
    } else if line.starts_with('-') {
        style(line).red().to_string()
    } else if line.starts_with("@@") {
        style(line).cyan().to_string()
    } else {
        line.to_string()
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_colorize_keeps_text() {
        let line = colorize_diff_line("+added line");
        assert!(line.contains("+added line"));
        assert_eq!(colorize_diff_line(" context"), " context");
    }
}
