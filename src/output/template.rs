//! User-supplied templates for rendering documents
//!
//! Templates use Jinja syntax and see three variables: `path`, `content` and
//! `index`. Referencing any other variable is an error.

use crate::core::error::{PromptError, Result};
use crate::core::types::EmittedDocument;
use minijinja::{Environment, UndefinedBehavior};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TEMPLATE_NAME: &str = "document";

/// Something that can turn a document into text
pub trait TemplateRenderer {
    fn render(&self, document: &EmittedDocument) -> Result<String>;
}

/// A template compiled with minijinja
#[derive(Debug)]
pub struct JinjaTemplate {
    env: Environment<'static>,
}

impl JinjaTemplate {
    /// Load and compile a template file. Syntax errors surface here, before any
    /// document is rendered.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PromptError::template_file_not_found(path),
            _ => PromptError::Io(e),
        })?;

        Self::from_source(&source, path)
    }

    /// Compile template text. `origin` is only used in error messages.
    pub fn from_source(source: &str, origin: &Path) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(TEMPLATE_NAME, source.to_string())
            .map_err(|source| PromptError::InvalidTemplate {
                path: PathBuf::from(origin),
                source,
            })?;

        Ok(Self { env })
    }
}

impl TemplateRenderer for JinjaTemplate {
    fn render(&self, document: &EmittedDocument) -> Result<String> {
        let render_error = |source: minijinja::Error| PromptError::TemplateRender {
            path: document.path.clone(),
            source,
        };

        let template = self.env.get_template(TEMPLATE_NAME).map_err(render_error)?;
        template.render(document).map_err(render_error)
    }
}
