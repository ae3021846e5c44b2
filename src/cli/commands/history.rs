//! History Command
//!
//! Show recent audit log entries, newest first.

use console::style;

use crate::audit::AuditLog;
use crate::cli::ui::Output;
use crate::config::Config;
use crate::types::{AuditLogEntry, AuditMode, Result};

pub fn run(config: &Config, limit: usize, json: bool, output: &Output) -> Result<()> {
    let log = AuditLog::new(config.audit_log_path(), config.audit.max_entries);
    let entries = log.recent(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output.info(&format!(
            "No hook runs recorded yet in {}",
            log.path().display()
        ));
        return Ok(());
    }

    output.header(&format!("Last {} hook run(s)", entries.len()));
    for entry in &entries {
        println!("{}", format_entry(entry));
        for result in &entry.generator_results {
            output.detail(&format!("↻ {} ({})", result.command, result.status));
        }
        for result in &entry.narrative_results {
            output.detail(&format!("✎ {} ({})", result.file, result.status));
        }
        if let Some(error) = &entry.error {
            output.detail(&format!("! {}", error));
        }
    }
    Ok(())
}

fn format_entry(entry: &AuditLogEntry) -> String {
    let mode = match entry.mode {
        AuditMode::AutoFix => style(entry.mode.as_str()).green(),
        AuditMode::Prompt => style(entry.mode.as_str()).yellow(),
        AuditMode::Skip | AuditMode::Sync => style(entry.mode.as_str()).dim(),
    };
    let commit = entry
        .commit_hash
        .as_deref()
        .map(|h| h.chars().take(8).collect::<String>())
        .unwrap_or_else(|| "--------".to_string());
    let engine = entry
        .engine
        .as_deref()
        .map(|e| format!(" via {}", e))
        .unwrap_or_default();

    let when = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| entry.timestamp.clone());

    format!(
        "  {}  {}  {:<8}{}",
        when,
        commit,
        mode,
        engine
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let mut entry = AuditLogEntry::new(AuditMode::AutoFix, Some("0123456789abcdef".into()));
        entry.engine = Some("claude-code".into());
        let line = console::strip_ansi_codes(&format_entry(&entry)).to_string();
        assert!(line.contains("01234567"));
        assert!(!line.contains("89abcdef"));
        assert!(line.contains("auto-fix"));
        assert!(line.contains("via claude-code"));
    }

    #[test]
    fn test_format_entry_without_commit() {
        let entry = AuditLogEntry::new(AuditMode::Skip, None);
        let line = console::strip_ansi_codes(&format_entry(&entry)).to_string();
        assert!(line.contains("--------"));
    }
}
