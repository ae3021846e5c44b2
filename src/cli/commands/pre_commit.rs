//! Pre-Commit Command
//!
//! Git hook entry point. Wires the real collaborators into the orchestrator,
//! prints its report and swallows every failure, panics included. The commit
//! always proceeds.

use std::panic::{AssertUnwindSafe, catch_unwind};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::ClaudeCodeEngine;
use crate::orchestrator::{Orchestrator, RunOutcome, ShellRunner, TtyReview};
use crate::vcs::GitCli;

/// Run the hook. `None` means the run aborted and was ignored.
pub fn run(config: &Config) -> Option<RunOutcome> {
    let vcs = GitCli::new(config.root());
    if !vcs.is_repository() {
        debug!("{} is not a git work tree; nothing to check", config.root().display());
        return None;
    }

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            warn!("agent-guard skipped: cannot start runtime: {}", e);
            return None;
        }
    };

    let engine = ClaudeCodeEngine::new(&config.engine);
    let runner = ShellRunner;
    let review = TtyReview;

    // stdout carries only the final report
    let status_line = |line: &str| eprintln!("{}", line);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let orchestrator = Orchestrator::new(config, &vcs, &engine, &runner, &review)
            .with_progress(&status_line);
        runtime.block_on(orchestrator.run())
    }));

    match result {
        Ok(outcome) => {
            debug!("Hook finished in state {:?}", outcome.state);
            if !outcome.report.is_empty() {
                print!("{}", outcome.report);
            }
            Some(outcome)
        }
        Err(_) => {
            warn!("agent-guard hit an internal error; commit continues");
            None
        }
    }
}
