//! Narrative update prompt
//!
//! Plain-text instructions for the engine. The same text is shown to the user
//! as the copy-pasteable fallback, so it must make sense to a human too.

use std::fmt::Write;

use crate::classifier::Classification;
use crate::config::Config;

pub fn build_narrative_prompt(config: &Config, classification: &Classification) -> String {
    let mut out = String::new();
    let targets = config.narrative_targets();

    out.push_str(
        "Update the project documentation so it reflects the code changes staged for this commit.\n\n",
    );

    out.push_str("## Changed files\n");
    for (id, files) in &classification.matches {
        let (emoji, name) = config
            .rule(id)
            .map(|c| (c.emoji.as_str(), c.name.as_str()))
            .unwrap_or(("📄", id.as_str()));
        let _ = writeln!(out, "\n### {} {} ({})", emoji, name, id);
        for file in files {
            let _ = writeln!(out, "- {}", file);
        }
    }

    out.push_str("\n## Documentation to update\n");
    for target in &targets {
        let _ = writeln!(out, "- {}", target);
    }

    let references: Vec<&str> = classification
        .category_ids()
        .filter_map(|id| config.rule(id))
        .filter_map(|c| c.doc_target.as_deref())
        .filter(|t| !targets.iter().any(|n| n == t))
        .collect();
    if !references.is_empty() {
        out.push_str("\n## Reference (regenerated automatically, do not edit)\n");
        for reference in dedup(references) {
            let _ = writeln!(out, "- {}", reference);
        }
    }

    out.push_str("\n## Rules\n");
    out.push_str("- Read the changed files and describe what changed in the documents listed above.\n");
    out.push_str("- Keep the existing structure and tone; only touch sections affected by these changes.\n");
    out.push_str("- Do NOT modify any source code.\n");
    out.push_str("- Do NOT create new files.\n");
    let _ = writeln!(out, "- Do NOT edit {}.", config.agent_config_file);
    out.push_str("- Do NOT edit files under the generated docs directory");
    let _ = writeln!(out, " ({}).", config.generated_dir);

    out
}

fn dedup(items: Vec<&str>) -> Vec<&str> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
