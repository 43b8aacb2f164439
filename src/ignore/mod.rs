//! File selection with .gitignore support
//!
//! This module decides which files end up in the prompt: glob matching of
//! single path segments, ignore file parsing, scoped rule inheritance while
//! walking, and the walk itself.

pub mod checker;
pub mod parser;
pub mod pattern;
pub mod scanner;

// Re-export commonly used items
pub use checker::{IgnoreChecker, IgnoreResult, IgnoreRules, IgnoreSettings};
pub use parser::{IgnoreRule, RuleSource};
pub use pattern::GlobRule;
pub use scanner::{FilteredFileScanner, ScanStats};
