//! Ignore checking with scoped, inherited .gitignore support
//!
//! An entry is excluded when it matches **any** active rule; there is no
//! override or negation. The sources, checked in this order:
//!
//! 1. hidden entries (name starts with `.`), unless hidden files are included
//! 2. `.gitignore` rules of the current directory and all of its ancestors
//!    inside the walk, plus the seed read from the root's parent directory
//! 3. rules from extra ignore files, active everywhere
//! 4. `--ignore` patterns, which only ever apply to files
//!
//! Directory rules are held in [`IgnoreRules`], an immutable chain that each
//! directory extends for its own descendants. Siblings never see each other's
//! rules.

use crate::core::error::Result;
use crate::core::types::TraversalEntry;
use crate::ignore::parser::{self, IgnoreRule, RuleSource};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Result of ignore checking
#[derive(Debug, Clone, PartialEq)]
pub enum IgnoreResult {
    /// Entry should be ignored
    Ignored(String), // Reason for ignoring
    /// Entry should be included
    Included,
}

impl IgnoreResult {
    pub fn is_ignored(&self) -> bool {
        matches!(self, IgnoreResult::Ignored(_))
    }
}

/// Inputs that shape which entries are ignored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgnoreSettings {
    /// Keep entries whose name starts with `.`
    pub include_hidden: bool,
    /// Skip reading `.gitignore` files altogether
    pub ignore_gitignore: bool,
    /// Extra ignore files, read once up front
    pub ignore_files: Vec<PathBuf>,
    /// File name globs
    pub patterns: Vec<String>,
}

/// `.gitignore` rules visible from one directory of the walk
#[derive(Debug, Default)]
pub struct IgnoreRules {
    parent: Option<Rc<IgnoreRules>>,
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// A scope with no rules at all
    pub fn empty() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Extend `parent` with `rules`. An empty extension reuses the parent.
    pub fn extend(parent: &Rc<IgnoreRules>, rules: Vec<IgnoreRule>) -> Rc<Self> {
        if rules.is_empty() {
            return Rc::clone(parent);
        }

        Rc::new(Self {
            parent: Some(Rc::clone(parent)),
            rules,
        })
    }

    /// All rules in scope, innermost directory first
    pub fn iter(&self) -> impl Iterator<Item = &IgnoreRule> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
            .flat_map(|scope| scope.rules.iter())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Decides for each discovered entry whether it is part of the output
#[derive(Debug)]
pub struct IgnoreChecker {
    include_hidden: bool,
    use_gitignore: bool,
    /// Rules from extra ignore files
    global_rules: Vec<IgnoreRule>,
    /// `--ignore` patterns
    file_patterns: Vec<IgnoreRule>,
}

impl IgnoreChecker {
    /// Create a checker, loading every extra ignore file. A missing extra
    /// ignore file is an error.
    pub fn new(settings: &IgnoreSettings) -> Result<Self> {
        let mut global_rules = Vec::new();
        for path in &settings.ignore_files {
            global_rules.extend(parser::load_ignore_file(path)?);
        }

        let file_patterns = settings
            .patterns
            .iter()
            .map(|pattern| IgnoreRule::new(pattern, RuleSource::Pattern))
            .collect();

        Ok(Self {
            include_hidden: settings.include_hidden,
            use_gitignore: !settings.ignore_gitignore,
            global_rules,
            file_patterns,
        })
    }

    /// Initial scope for a root path: the `.gitignore` of its parent directory
    pub fn seed(&self, root: &Path) -> Rc<IgnoreRules> {
        let empty = IgnoreRules::empty();
        if !self.use_gitignore {
            return empty;
        }

        match root.parent() {
            Some(parent) if parent.as_os_str().is_empty() => {
                IgnoreRules::extend(&empty, parser::load_gitignore(Path::new(".")))
            },
            Some(parent) => IgnoreRules::extend(&empty, parser::load_gitignore(parent)),
            None => empty,
        }
    }

    /// Scope for the contents of `dir`: `inherited` plus the directory's own `.gitignore`
    pub fn enter(&self, dir: &Path, inherited: &Rc<IgnoreRules>) -> Rc<IgnoreRules> {
        if !self.use_gitignore {
            return Rc::clone(inherited);
        }

        IgnoreRules::extend(inherited, parser::load_gitignore(dir))
    }

    /// Check an entry discovered inside a directory whose scope is `rules`
    pub fn check(&self, entry: &TraversalEntry, rules: &IgnoreRules) -> IgnoreResult {
        let name = entry.name();
        let is_dir = entry.kind.is_dir();

        if !self.include_hidden && entry.is_hidden() {
            return IgnoreResult::Ignored("hidden entry".to_string());
        }

        let mut active = rules.iter().chain(self.global_rules.iter());
        if let Some(rule) = active.find(|rule| rule.matches(&name, is_dir)) {
            return IgnoreResult::Ignored(rule.describe());
        }

        if !is_dir {
            if let Some(rule) = self
                .file_patterns
                .iter()
                .find(|rule| rule.matches(&name, false))
            {
                return IgnoreResult::Ignored(rule.describe());
            }
        }

        IgnoreResult::Included
    }

    /// Get statistics about loaded rules: (extra ignore-file rules, patterns)
    pub fn stats(&self) -> (usize, usize) {
        (self.global_rules.len(), self.file_patterns.len())
    }
}
