//! Rendering of included files into the prompt stream
//!
//! Three shapes are supported:
//!
//! - plain: path, `---`, content, blank line, `---`
//! - tagged: an XML-like `<documents>` collection, each `<document>` carrying its index
//! - template: a user template rendered once per file
//!
//! Files that cannot be read or are not valid UTF-8 are reported on stderr and
//! skipped. A skipped file never takes a document index.

pub mod template;

pub use template::{JinjaTemplate, TemplateRenderer};

use crate::core::error::Result;
use crate::core::types::{EmittedDocument, TraversalEntry};
use colored::Colorize;
use std::fs;
use std::io::Write;

const TAGGED_PREAMBLE: &str = "Here are some documents for you to reference for your task:";

/// Output shape
pub enum OutputMode {
    Plain,
    Tagged,
    Template(Box<dyn TemplateRenderer>),
}

impl std::fmt::Debug for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Plain => write!(f, "Plain"),
            OutputMode::Tagged => write!(f, "Tagged"),
            OutputMode::Template(_) => write!(f, "Template"),
        }
    }
}

/// Statistics from emission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitStats {
    pub documents: u32,
    pub skipped: usize,
}

/// Writes documents to `out` in the selected shape
#[derive(Debug)]
pub struct Emitter<W: Write> {
    out: W,
    mode: OutputMode,
    stats: EmitStats,
    started: bool,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            stats: EmitStats::default(),
            started: false,
        }
    }

    pub fn stats(&self) -> &EmitStats {
        &self.stats
    }

    /// Write the run header. Called automatically by the first [`Emitter::emit`].
    pub fn begin(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        if let OutputMode::Tagged = self.mode {
            writeln!(self.out, "{}", TAGGED_PREAMBLE)?;
            writeln!(self.out)?;
            writeln!(self.out, "<documents>")?;
        }
        Ok(())
    }

    /// Read one file and write it out. Unreadable and non-UTF-8 files are
    /// skipped with a warning; only output and template failures are errors.
    pub fn emit(&mut self, entry: &TraversalEntry) -> Result<()> {
        self.begin()?;

        let display = entry.path.display().to_string();
        let content = match read_text(entry) {
            Ok(content) => content,
            Err(reason) => {
                warn_skip(&display, &reason);
                self.stats.skipped += 1;
                return Ok(());
            },
        };

        self.write_document(&EmittedDocument {
            index: self.stats.documents + 1,
            path: display,
            content,
        })?;
        self.stats.documents += 1;
        Ok(())
    }

    /// Write the run footer and flush, handing back the writer
    pub fn finish(mut self) -> Result<(W, EmitStats)> {
        self.begin()?;

        if let OutputMode::Tagged = self.mode {
            writeln!(self.out, "</documents>")?;
        }
        self.out.flush()?;

        Ok((self.out, self.stats))
    }

    fn write_document(&mut self, doc: &EmittedDocument) -> Result<()> {
        match &self.mode {
            OutputMode::Plain => {
                writeln!(self.out, "{}", doc.path)?;
                writeln!(self.out, "---")?;
                writeln!(self.out, "{}", doc.content)?;
                writeln!(self.out)?;
                writeln!(self.out, "---")?;
            },
            OutputMode::Tagged => {
                writeln!(self.out, "<document index=\"{}\">", doc.index)?;
                writeln!(self.out, "<source>")?;
                writeln!(self.out, "{}", doc.path)?;
                writeln!(self.out, "</source>")?;
                writeln!(self.out, "<document_content>")?;
                writeln!(self.out, "{}", doc.content)?;
                writeln!(self.out, "</document_content>")?;
                writeln!(self.out, "</document>")?;
            },
            OutputMode::Template(renderer) => {
                let rendered = renderer.render(doc)?;
                self.out.write_all(rendered.as_bytes())?;
            },
        }

        tracing::trace!(document = %doc, "emitted");
        Ok(())
    }
}

/// Whole file as UTF-8 text, or the reason it cannot be used
fn read_text(entry: &TraversalEntry) -> std::result::Result<String, String> {
    let bytes = fs::read(&entry.path).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|_| "UnicodeDecodeError".to_string())
}

fn warn_skip(path: &str, reason: &str) {
    let message = format!("Warning: Skipping file {} due to {}", path, reason);
    eprintln!("{}", message.red());
}
