//! Check-Docs Command
//!
//! CI entry point for the quality checker. Fails when any issue is found.

use crate::cli::ui::Output;
use crate::config::Config;
use crate::quality::{QualityReport, check_project};
use crate::types::{GuardError, Result};

pub fn run(config: &Config, output: &Output) -> Result<QualityReport> {
    let report = check_project(config);

    output.header("Documentation quality");
    for finding in &report.findings {
        output.finding(&finding.file, &finding.issues);
    }

    if report.is_clean() {
        output.success(&format!(
            "{} file(s) checked, no issues",
            report.files_checked
        ));
        Ok(report)
    } else {
        output.error(&format!(
            "{} issue(s) in {} of {} file(s)",
            report.issue_count(),
            report.findings.len(),
            report.files_checked
        ));
        Err(GuardError::QualityCheck(report.issue_count()))
    }
}
