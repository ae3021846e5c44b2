//! Staleness Classifier
//!
//! Maps staged paths onto configured categories. Categories are tried in
//! declaration order and the first match wins, so a path lands in at most one
//! bucket.

use regex::Regex;

use crate::config::Config;

/// Path matcher compiled from a category's `patternType`/`filePattern`
#[derive(Debug, Clone)]
pub enum Matcher {
    Exact(String),
    Prefix(String),
    Regex(Regex),
}

impl Matcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(pattern) => path == pattern,
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
            Self::Regex(re) => re.is_match(path),
        }
    }
}

/// A compiled classification rule
#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub matcher: Matcher,
    pub doc_target: Option<String>,
    pub gen_command: Option<String>,
}

/// Result of classifying one batch of staged files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// (category id, files) in first-match order; files keep staging order
    pub matches: Vec<(String, Vec<String>)>,
    pub unmatched: Vec<String>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn files_for(&self, id: &str) -> Option<&[String]> {
        self.matches
            .iter()
            .find(|(cat, _)| cat == id)
            .map(|(_, files)| files.as_slice())
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|(id, _)| id.as_str())
    }

    pub fn matched_count(&self) -> usize {
        self.matches.iter().map(|(_, files)| files.len()).sum()
    }

    fn push(&mut self, id: &str, file: &str) {
        match self.matches.iter_mut().find(|(cat, _)| cat == id) {
            Some((_, files)) => files.push(file.to_string()),
            None => self.matches.push((id.to_string(), vec![file.to_string()])),
        }
    }
}

/// Classify every file against `categories`
pub fn categorize<S: AsRef<str>>(categories: &[Category], files: &[S]) -> Classification {
    let mut result = Classification::default();

    for file in files {
        let file = file.as_ref();
        match categories.iter().find(|c| c.matcher.matches(file)) {
            Some(category) => result.push(&category.id, file),
            None => result.unmatched.push(file.to_string()),
        }
    }

    result
}

/// Whether a staged path is itself documentation.
///
/// `docsDir` matches whole path segments: with `docs`, `docs/a.md` counts and
/// `docs-site/a.md` does not.
pub fn is_doc_file(config: &Config, path: &str) -> bool {
    let docs_dir = config.docs_dir.trim_end_matches('/');
    let in_docs_dir = !docs_dir.is_empty()
        && path
            .strip_prefix(docs_dir)
            .is_some_and(|rest| rest.starts_with('/'));

    in_docs_dir || path == config.agent_config_file
}
