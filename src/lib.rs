//! files-to-prompt - concatenate a tree of files into one LLM prompt
//!
//! Every file found by recursively walking the given paths is written out
//! wrapped with its path, as plain text, as numbered `<document>` blocks, or
//! through a user template.
//!
//! # File selection
//!
//! - **Hidden entries**: names starting with `.` are skipped unless requested
//! - **`.gitignore`**: each directory's rules apply to it and its descendants
//! - **Extra ignore files**: rules that apply everywhere in the walk
//! - **`--ignore` globs**: matched against bare file names
//!
//! Files named directly as arguments are always included.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use files_to_prompt::{run, Options, OutputFormat};
//! use std::path::PathBuf;
//!
//! let options = Options {
//!     paths: vec![PathBuf::from("src")],
//!     format: OutputFormat::Xml,
//!     ..Default::default()
//! };
//! let summary = run(&options, std::io::stdout().lock())?;
//! eprintln!("{} documents", summary.emit.documents);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod output;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{
    error::{PromptError, Result},
    types::{EmittedDocument, EntryKind, TraversalEntry},
};

pub use config::{OutputFormat, Options};

pub use ignore::{FilteredFileScanner, IgnoreChecker, IgnoreSettings};

pub use output::{Emitter, OutputMode, TemplateRenderer};

pub use runner::{run, run_with_mode, RunSummary};

/// Current version of files-to-prompt
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
