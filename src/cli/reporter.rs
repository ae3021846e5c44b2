//! Terminal Reporter
//!
//! Renders the hook's human-facing output. Each method returns a `String` so
//! the orchestrator decides where it goes and tests can inspect it.

use console::style;
use std::fmt::Write;

use crate::classifier::Classification;
use crate::config::Config;
use crate::types::{GeneratorResult, NarrativeResult};

const RULE: &str = "────────────────────────────────────────────────────────";

pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Docs were staged together with the code that needed them
    pub fn positive_note(&self, classification: &Classification) -> String {
        format!(
            "{} Documentation updated alongside {} doc-relevant file(s). Nice.\n",
            style("📚").green(),
            classification.matched_count()
        )
    }

    /// One-line status while a long step runs
    pub fn progress(&self, message: &str) -> String {
        format!("{} {}", style("⏳").cyan(), message)
    }

    pub fn auto_fix_summary(
        &self,
        generators: &[GeneratorResult],
        narratives: &[NarrativeResult],
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{}",
            style("✓ agent-guard auto-fixed documentation").green().bold()
        );
        for result in generators {
            let _ = writeln!(out, "  {} {} ({})", style("↻").green(), result.command, result.status);
        }
        for result in narratives {
            let _ = writeln!(out, "  {} {} ({})", style("✎").green(), result.file, result.status);
        }
        out.push_str("  Changes have been staged into this commit.\n");
        out
    }

    /// Staged doc-relevant changes grouped by category
    pub fn categorized_changes(&self, config: &Config, classification: &Classification) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{}",
            style("⚠ Documentation may be out of date").yellow().bold()
        );
        for (id, files) in &classification.matches {
            let (emoji, name, target) = match config.rule(id) {
                Some(c) => (c.emoji.as_str(), c.name.as_str(), c.doc_target.as_deref()),
                None => ("📄", id.as_str(), None),
            };
            let _ = write!(out, "\n  {} {}", emoji, style(name).bold());
            match target {
                Some(target) => {
                    let _ = writeln!(out, " → {}", target);
                }
                None => out.push('\n'),
            }
            for file in files {
                let _ = writeln!(out, "     - {}", file);
            }
        }
        out
    }

    /// Degraded path: everything the user needs to finish by hand
    pub fn fallback(
        &self,
        config: &Config,
        classification: &Classification,
        manual_commands: &[String],
        reason: &str,
        prompt: &str,
    ) -> String {
        let mut out = self.categorized_changes(config, classification);

        if !manual_commands.is_empty() {
            let _ = writeln!(out, "\n  {}", style("Run these generators:").bold());
            for command in manual_commands {
                let _ = writeln!(out, "     $ {}", command);
            }
        }

        let _ = writeln!(out, "\n  {} {}", style("Auto-fix unavailable:").yellow(), reason);
        let _ = writeln!(
            out,
            "\n  Paste this prompt into your AI coding assistant:\n{}",
            RULE
        );
        out.push_str(prompt);
        if !prompt.ends_with('\n') {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", RULE);
        out.push_str("  This hook never blocks the commit.\n");
        out
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
