//! Shell-style glob matching of a single path segment
//!
//! Rules are matched against the final segment of a path only, never the full
//! relative path. `*`, `?`, `[...]` and `[!...]` behave as in a shell; there is
//! no recursive `**`. A leading `!` is an ordinary character: negation is not
//! supported.

use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A glob rule compiled once and matched many times
#[derive(Debug, Clone)]
pub struct GlobRule {
    /// The rule exactly as written
    original: String,
    /// `None` when the rule is not a valid glob; it then matches only itself
    pattern: Option<Pattern>,
}

impl GlobRule {
    pub fn new(rule: &str) -> Self {
        let pattern = match Pattern::new(&collapse_stars(rule)) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::debug!(rule, error = %e, "invalid glob, matching literally");
                None
            },
        };

        Self {
            original: rule.to_string(),
            pattern,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Match a bare name. Directories are also tested with a trailing `/` so
    /// that rules such as `build/` only hit directories.
    pub fn matches(&self, name: &str, is_dir: bool) -> bool {
        if self.matches_segment(name) {
            return true;
        }

        is_dir && self.matches_segment(&format!("{}/", name))
    }

    fn matches_segment(&self, segment: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.matches_with(segment, MATCH_OPTIONS),
            None => segment == self.original,
        }
    }
}

/// Convenience form of [`GlobRule::matches`] for one-off checks
pub fn matches(name: &str, rule: &str, is_dir: bool) -> bool {
    GlobRule::new(rule).matches(name, is_dir)
}

/// Runs of `*` behave like a single `*`; the glob crate would otherwise read
/// `**` as a recursive wildcard.
fn collapse_stars(rule: &str) -> String {
    let mut collapsed = String::with_capacity(rule.len());
    let mut previous_star = false;

    for c in rule.chars() {
        if c == '*' && previous_star {
            continue;
        }
        previous_star = c == '*';
        collapsed.push(c);
    }

    collapsed
}
