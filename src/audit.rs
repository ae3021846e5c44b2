//! Audit Log
//!
//! Append-only JSON array of [`AuditLogEntry`] records, capped at a maximum
//! entry count. Reads never fail: a missing or corrupt file is an empty log.
//! The whole file is rewritten on every append; concurrent hook runs are not
//! coordinated.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::{AuditLogEntry, Result};

pub struct AuditLog {
    path: PathBuf,
    max_entries: usize,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All retained entries, oldest first
    pub fn read(&self) -> Vec<AuditLogEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<Vec<AuditLogEntry>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Ignoring unreadable audit log {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append one entry, evicting the oldest beyond `max_entries`
    pub fn append(&self, entry: AuditLogEntry) -> Result<()> {
        let mut entries = self.read();
        entries.push(entry);

        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// Most recent `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditLogEntry> {
        let mut entries = self.read();
        entries.reverse();
        entries.truncate(limit);
        entries
    }
}
