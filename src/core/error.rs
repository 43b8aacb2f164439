//! Error types for files-to-prompt

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for files-to-prompt operations
#[derive(Error, Debug)]
pub enum PromptError {
    /// Usage errors, reported before any traversal
    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Ignore file does not exist: {path}")]
    IgnoreFileNotFound { path: PathBuf },

    #[error("Template file does not exist: {path}")]
    TemplateFileNotFound { path: PathBuf },

    #[error("Output file is also an input path: {path}")]
    OutputIsInput { path: PathBuf },

    #[error("Failed to read ignore file {path}: {source}")]
    IgnoreFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template errors
    #[error("Invalid template {path}: {source}")]
    InvalidTemplate {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to render template for {path}: {source}")]
    TemplateRender {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Create a new path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a new ignore file not found error
    pub fn ignore_file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::IgnoreFileNotFound { path: path.into() }
    }

    /// Create a new template file not found error
    pub fn template_file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateFileNotFound { path: path.into() }
    }

    /// Create a new output-is-input error
    pub fn output_is_input(path: impl Into<PathBuf>) -> Self {
        Self::OutputIsInput { path: path.into() }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by bad command-line input rather than the run itself
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound { .. }
                | Self::IgnoreFileNotFound { .. }
                | Self::TemplateFileNotFound { .. }
                | Self::OutputIsInput { .. }
                | Self::InvalidTemplate { .. }
                | Self::ConfigurationError { .. }
        )
    }
}

/// Result type alias for files-to-prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;
