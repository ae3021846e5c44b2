//! Remediation Orchestrator
//!
//! Drives one pre-commit run:
//!
//! ```text
//! staged files ──▶ classify ──▶ silent | positive note
//!                                  │
//!                                  ▼
//!                   generators ──▶ narrative engine ──▶ review
//!                                  │
//!                                  ▼
//!                      auto-fix summary | manual prompt
//! ```
//!
//! Every step after classification is best-effort. The run never returns an
//! error; the worst case is the manual prompt.

pub mod prompt;
pub mod review;
pub mod runner;

pub use prompt::build_narrative_prompt;
pub use review::{ReviewGate, TtyReview};
pub use runner::{CommandRunner, ShellRunner};

use std::fs;
use tracing::{debug, info};

use crate::audit::AuditLog;
use crate::classifier::{Classification, categorize, is_doc_file};
use crate::cli::reporter::Reporter;
use crate::config::Config;
use crate::engine::{CodingEngine, ProgressFn};
use crate::types::{AuditLogEntry, AuditMode, GeneratorResult, NarrativeResult, Result};
use crate::vcs::Vcs;

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    NoStagedFiles,
    NoDocRelevantChanges,
    DocRelevantWithDocsUpdated,
    AutoFixSucceeded,
    PromptFallback,
}

/// What a run did, for the caller to print
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub state: PipelineState,
    /// Audit record written for this run, if any
    pub entry: Option<AuditLogEntry>,
    /// Text for stdout; empty for silent states
    pub report: String,
}

/// Accumulated results of the auto-fix attempt
#[derive(Debug, Default)]
struct FixProgress {
    engine: Option<String>,
    generator_results: Vec<GeneratorResult>,
    narrative_results: Vec<NarrativeResult>,
    /// Generators the user still has to run
    manual_commands: Vec<String>,
    /// Reason the narrative step could not complete
    blocking_error: Option<String>,
}

impl FixProgress {
    fn has_results(&self) -> bool {
        !self.generator_results.is_empty() || !self.narrative_results.is_empty()
    }
}

pub struct Orchestrator<'a> {
    config: &'a Config,
    vcs: &'a dyn Vcs,
    engine: &'a dyn CodingEngine,
    runner: &'a dyn CommandRunner,
    review: &'a dyn ReviewGate,
    /// Receives status lines while long steps run
    progress: ProgressFn<'a>,
    audit: AuditLog,
    reporter: Reporter,
}

fn discard_progress(_: &str) {}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a Config,
        vcs: &'a dyn Vcs,
        engine: &'a dyn CodingEngine,
        runner: &'a dyn CommandRunner,
        review: &'a dyn ReviewGate,
    ) -> Self {
        Self {
            config,
            vcs,
            engine,
            runner,
            review,
            progress: &discard_progress,
            audit: AuditLog::new(config.audit_log_path(), config.audit.max_entries),
            reporter: Reporter::new(),
        }
    }

    /// Route status lines (e.g. "Updating narrative docs...") to `progress`
    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(&self) -> RunOutcome {
        let staged = match self.vcs.staged_files() {
            Ok(files) => files,
            Err(e) => {
                debug!("Could not read staged files: {}", e);
                Vec::new()
            }
        };

        if staged.is_empty() {
            debug!("No staged files");
            return RunOutcome {
                state: PipelineState::NoStagedFiles,
                entry: None,
                report: String::new(),
            };
        }

        let classification = categorize(self.config.rules(), &staged);
        let docs_staged = staged.iter().any(|f| is_doc_file(self.config, f));
        debug!(
            "{} staged, {} doc-relevant, {} unmatched, docs staged: {}",
            staged.len(),
            classification.matched_count(),
            classification.unmatched.len(),
            docs_staged
        );

        if classification.is_empty() {
            let entry = self.record(AuditLogEntry::new(AuditMode::Skip, self.vcs.head_commit()));
            return RunOutcome {
                state: PipelineState::NoDocRelevantChanges,
                entry: Some(entry),
                report: String::new(),
            };
        }

        if docs_staged {
            let entry = self.record(AuditLogEntry::new(AuditMode::Sync, self.vcs.head_commit()));
            return RunOutcome {
                state: PipelineState::DocRelevantWithDocsUpdated,
                entry: Some(entry),
                report: self.reporter.positive_note(&classification),
            };
        }

        let mut fix = FixProgress::default();
        self.run_generators(&classification, &mut fix);
        self.run_narrative(&classification, &mut fix).await;

        let succeeded = fix.has_results() && fix.blocking_error.is_none();
        let (state, report) = if succeeded {
            (
                PipelineState::AutoFixSucceeded,
                self.reporter
                    .auto_fix_summary(&fix.generator_results, &fix.narrative_results),
            )
        } else {
            let reason = fix
                .blocking_error
                .clone()
                .unwrap_or_else(|| "no automatic fix applies to these changes".to_string());
            let prompt = build_narrative_prompt(self.config, &classification);
            (
                PipelineState::PromptFallback,
                self.reporter.fallback(
                    self.config,
                    &classification,
                    &fix.manual_commands,
                    &reason,
                    &prompt,
                ),
            )
        };

        let mode = if fix.has_results() {
            AuditMode::AutoFix
        } else {
            AuditMode::Prompt
        };
        let mut entry = AuditLogEntry::new(mode, self.vcs.head_commit());
        entry.engine = fix.engine;
        entry.generator_results = fix.generator_results;
        entry.narrative_results = fix.narrative_results;
        entry.error = fix.blocking_error;

        RunOutcome {
            state,
            entry: Some(self.record(entry)),
            report,
        }
    }

    /// Append to the audit log; a failed write is logged and dropped
    fn record(&self, entry: AuditLogEntry) -> AuditLogEntry {
        if let Err(e) = self.audit.append(entry.clone()) {
            debug!("Audit log write failed (ignored): {}", e);
        }
        entry
    }

    fn run_generators(&self, classification: &Classification, fix: &mut FixProgress) {
        let mut commands: Vec<String> = Vec::new();
        for id in classification.category_ids() {
            if let Some(command) = self.config.rule(id).and_then(|c| c.gen_command.as_ref())
                && !commands.contains(command)
            {
                commands.push(command.clone());
            }
        }

        if commands.is_empty() {
            return;
        }

        if !self.config.auto_fix.generators {
            debug!("Generator auto-fix disabled; {} to run by hand", commands.len());
            fix.manual_commands = commands;
            return;
        }

        for command in commands {
            match self.runner.run(&command, self.config.root()) {
                Ok(()) => {
                    info!("Regenerated: {}", command);
                    fix.generator_results.push(GeneratorResult::regenerated(&command));
                }
                Err(e) => {
                    debug!("{}", e);
                    fix.manual_commands.push(command);
                }
            }
        }

        if !fix.generator_results.is_empty()
            && let Err(e) = self.vcs.stage(&self.config.generated_dir)
        {
            // Nothing changed under the generated dir, or it does not exist
            debug!("Staging {} skipped: {}", self.config.generated_dir, e);
        }
    }

    async fn run_narrative(&self, classification: &Classification, fix: &mut FixProgress) {
        let narrative = &self.config.auto_fix.narrative;
        if !narrative.enabled {
            return;
        }

        let triggered = classification
            .category_ids()
            .any(|id| narrative.narrative_triggers.iter().any(|t| t == id));
        if !triggered {
            debug!("No matched category triggers a narrative update");
            return;
        }

        let Some(engine_id) = self.engine.detect().await else {
            fix.blocking_error = Some(self.engine.install_hint());
            return;
        };
        fix.engine = Some(engine_id);

        let prompt = build_narrative_prompt(self.config, classification);
        let status = self
            .reporter
            .progress(&format!("Updating narrative docs with {}...", self.engine.command()));
        (self.progress)(status.as_str());
        let on_progress = |line: &str| debug!(target: "agent_guard::engine", "{}", line);
        let result = self
            .engine
            .invoke(&prompt, self.config.root(), &on_progress)
            .await;

        if !result.success {
            fix.blocking_error = Some(
                result
                    .error
                    .unwrap_or_else(|| format!("{} failed", self.engine.command())),
            );
            return;
        }

        let targets = self.config.narrative_targets();

        if narrative.review && self.review.has_interactive_terminal() {
            let diffs: Vec<(String, String)> = targets
                .iter()
                .map(|t| (t.clone(), self.vcs.diff(t).unwrap_or_default()))
                .collect();

            if !self.review.confirm(&diffs) {
                for target in &targets {
                    if let Err(e) = self.vcs.revert(target) {
                        debug!("Revert of {} skipped: {}", target, e);
                    }
                }
                fix.blocking_error =
                    Some("documentation changes were rejected during review".to_string());
                return;
            }
        }

        for target in &targets {
            if let Err(e) = self.vcs.stage(target) {
                debug!("Staging {} skipped: {}", target, e);
            }
            fix.narrative_results.push(NarrativeResult::updated(target));
        }

        if let Err(e) = self.write_signal_file() {
            debug!("Signal file write failed (ignored): {}", e);
        }
    }

    fn write_signal_file(&self) -> Result<()> {
        let path = self.config.signal_file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, b"")?;
        Ok(())
    }
}
