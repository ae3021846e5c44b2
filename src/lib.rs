//! agent-guard - Documentation Staleness Guard
//!
//! A git pre-commit hook that notices when a commit changes code whose
//! documentation is not part of the same commit, then tries to fix it.
//!
//! ## Core Features
//!
//! - **Classification**: Config-driven rules map staged paths to doc categories
//! - **Generators**: Deterministic reference docs regenerated and staged in place
//! - **Narrative Updates**: An external AI coding CLI edits prose docs, with optional review
//! - **Never Blocks**: Every failure degrades to a copy-pasteable prompt
//! - **Audit Log**: Bounded JSON history of every hook run
//! - **Quality Checks**: CI lint for fences, required sections and placeholders
//!
//! ## Quick Start
//!
//! ```ignore
//! use agent_guard::{ConfigLoader, Orchestrator};
//! use agent_guard::engine::ClaudeCodeEngine;
//! use agent_guard::orchestrator::{ShellRunner, TtyReview};
//! use agent_guard::vcs::GitCli;
//!
//! let config = ConfigLoader::load(&root)?;
//! let vcs = GitCli::new(&root);
//! let engine = ClaudeCodeEngine::new(&config.engine);
//! let outcome = Orchestrator::new(&config, &vcs, &engine, &ShellRunner, &TtyReview)
//!     .run()
//!     .await;
//! print!("{}", outcome.report);
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Policy file loading and validation
//! - [`classifier`]: Staged path categorization
//! - [`orchestrator`]: The pre-commit pipeline
//! - [`engine`]: External AI coding CLI adapter
//! - [`audit`]: Append-only run history
//! - [`quality`]: Markdown lint checks
//! - [`generators`]: Built-in env and API route inventories

pub mod audit;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod generators;
pub mod orchestrator;
pub mod quality;
pub mod types;
pub mod vcs;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, ErrorClassifier, GuardError, Result};

// Audit
pub use audit::AuditLog;
pub use types::{AuditLogEntry, AuditMode};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use classifier::{Category, Classification, categorize};
pub use engine::{ClaudeCodeEngine, CodingEngine, EngineInvocationResult};
pub use orchestrator::{Orchestrator, PipelineState, RunOutcome};
pub use quality::{QualityReport, check_project};
