//! Ignore file parser
//!
//! Both `.gitignore` files and extra ignore files share one line format: one
//! glob per line, surrounding whitespace stripped, blank lines and lines
//! starting with `#` dropped. Every other line is taken literally.

use crate::core::error::{PromptError, Result};
use crate::ignore::pattern::GlobRule;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the per-directory ignore file
pub const GITIGNORE: &str = ".gitignore";

/// Where an ignore rule came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// `.gitignore` found in this directory during traversal
    Gitignore(PathBuf),
    /// Explicitly supplied extra ignore file
    IgnoreFile(PathBuf),
    /// `--ignore` pattern given on the command line or in the config file
    Pattern,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Gitignore(dir) => write!(f, "{}", dir.join(GITIGNORE).display()),
            RuleSource::IgnoreFile(path) => write!(f, "{}", path.display()),
            RuleSource::Pattern => write!(f, "--ignore"),
        }
    }
}

/// One ignore rule tagged with its origin
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pub glob: GlobRule,
    pub source: RuleSource,
}

impl IgnoreRule {
    pub fn new(rule: &str, source: RuleSource) -> Self {
        Self {
            glob: GlobRule::new(rule),
            source,
        }
    }

    pub fn matches(&self, name: &str, is_dir: bool) -> bool {
        self.glob.matches(name, is_dir)
    }

    /// Human readable reason used when this rule excludes an entry
    pub fn describe(&self) -> String {
        format!("'{}' from {}", self.glob.as_str(), self.source)
    }
}

/// Split ignore file content into rule strings
pub fn parse_rules(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load an explicitly supplied ignore file. The file must exist.
pub fn load_ignore_file(path: &Path) -> Result<Vec<IgnoreRule>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PromptError::ignore_file_not_found(path),
        _ => PromptError::IgnoreFileUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let source = RuleSource::IgnoreFile(path.to_path_buf());
    let rules: Vec<IgnoreRule> = parse_rules(&content)
        .iter()
        .map(|rule| IgnoreRule::new(rule, source.clone()))
        .collect();

    tracing::debug!(path = %path.display(), rules = rules.len(), "loaded ignore file");
    Ok(rules)
}

/// Load the `.gitignore` directly inside `dir`.
///
/// A missing file is the common case and yields no rules. A file that exists
/// but cannot be read as UTF-8 text is reported and also yields no rules.
pub fn load_gitignore(dir: &Path) -> Vec<IgnoreRule> {
    let path = dir.join(GITIGNORE);
    if !path.is_file() {
        return Vec::new();
    }

    match fs::read_to_string(&path) {
        Ok(content) => {
            let source = RuleSource::Gitignore(dir.to_path_buf());
            let rules: Vec<IgnoreRule> = parse_rules(&content)
                .iter()
                .map(|rule| IgnoreRule::new(rule, source.clone()))
                .collect();
            tracing::debug!(path = %path.display(), rules = rules.len(), "loaded .gitignore");
            rules
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable .gitignore");
            Vec::new()
        },
    }
}
