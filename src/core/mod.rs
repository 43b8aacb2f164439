//! Core types and error handling for files-to-prompt
//!
//! This module contains the data types shared by the traversal engine and
//! the emitter, plus the crate-wide error type.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{PromptError, Result};
pub use types::{EmittedDocument, EntryKind, TraversalEntry};
