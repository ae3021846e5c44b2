pub mod audit;
pub mod error;

pub use audit::{AuditLogEntry, AuditMode, GeneratorResult, NarrativeResult};
pub use error::{ErrorCategory, ErrorClassifier, GuardError, Result};
