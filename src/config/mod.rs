//! Run options for files-to-prompt
//!
//! Command-line flags and the optional configuration file are merged into a
//! single [`Options`] value, which is validated before any traversal starts.

pub mod settings;

// Re-export commonly used items
pub use settings::{ConfigFile, Defaults};

use crate::core::error::{PromptError, Result};
use crate::ignore::checker::IgnoreSettings;
use std::fs;
use std::path::{Path, PathBuf};

/// Selected output shape
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Xml,
    Template(PathBuf),
}

/// Everything a run needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// Root paths in the order given
    pub paths: Vec<PathBuf>,
    pub ignore: IgnoreSettings,
    pub format: OutputFormat,
    /// Write here instead of stdout
    pub output: Option<PathBuf>,
}

impl Options {
    /// Fold configuration defaults under the explicit options. Booleans are
    /// OR-ed; lists from the config come first.
    pub fn with_defaults(mut self, defaults: &Defaults) -> Self {
        self.ignore.include_hidden |= defaults.include_hidden;
        self.ignore.ignore_gitignore |= defaults.ignore_gitignore;
        self.ignore.patterns = defaults
            .ignore
            .iter()
            .cloned()
            .chain(self.ignore.patterns)
            .collect();
        self.ignore.ignore_files = defaults
            .ignore_files
            .iter()
            .cloned()
            .chain(self.ignore.ignore_files)
            .collect();
        self
    }

    /// Check every path named by the options before any output is produced
    pub fn validate(&self) -> Result<()> {
        for path in &self.paths {
            if !path.exists() {
                return Err(PromptError::path_not_found(path));
            }
        }

        for path in &self.ignore.ignore_files {
            if !path.is_file() {
                return Err(PromptError::ignore_file_not_found(path));
            }
        }

        if let OutputFormat::Template(path) = &self.format {
            if !path.is_file() {
                return Err(PromptError::template_file_not_found(path));
            }
        }

        // Creating the output file truncates it, so it must not be read from
        if let Some(target) = self.output_target() {
            if let Some(input) = self.inputs().find(|input| same_file(input, &target)) {
                return Err(PromptError::output_is_input(input));
            }
        }

        Ok(())
    }

    /// Canonical path of the output file. A file that does not exist yet is
    /// resolved through its parent directory.
    pub fn output_target(&self) -> Option<PathBuf> {
        let path = self.output.as_ref()?;
        if let Ok(canonical) = fs::canonicalize(path) {
            return Some(canonical);
        }

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let name = path.file_name()?;
        fs::canonicalize(parent).ok().map(|dir| dir.join(name))
    }

    /// Every file or directory the run reads from
    fn inputs(&self) -> impl Iterator<Item = &PathBuf> {
        let template = match &self.format {
            OutputFormat::Template(path) => Some(path),
            _ => None,
        };
        self.paths
            .iter()
            .chain(self.ignore.ignore_files.iter())
            .chain(template)
    }
}

fn same_file(path: &Path, canonical: &Path) -> bool {
    fs::canonicalize(path).is_ok_and(|path| path == canonical)
}
