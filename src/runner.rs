//! One complete run: validate, walk, emit

use crate::config::{OutputFormat, Options};
use crate::core::error::Result;
use crate::ignore::{FilteredFileScanner, IgnoreChecker, ScanStats};
use crate::output::{EmitStats, Emitter, JinjaTemplate, OutputMode};
use std::io::Write;

/// What a run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub scan: ScanStats,
    pub emit: EmitStats,
}

/// Build the output shape. Template files are compiled here so that syntax
/// errors stop the run before anything is written.
pub fn output_mode(format: &OutputFormat) -> Result<OutputMode> {
    Ok(match format {
        OutputFormat::Plain => OutputMode::Plain,
        OutputFormat::Xml => OutputMode::Tagged,
        OutputFormat::Template(path) => {
            OutputMode::Template(Box::new(JinjaTemplate::from_file(path)?))
        },
    })
}

/// Write the prompt for `options` to `out`
pub fn run<W: Write>(options: &Options, out: W) -> Result<RunSummary> {
    options.validate()?;
    let mode = output_mode(&options.format)?;
    run_with_mode(options, mode, out)
}

/// Like [`run`], for options that are already validated and an output
/// shape that is already built
pub fn run_with_mode<W: Write>(options: &Options, mode: OutputMode, out: W) -> Result<RunSummary> {
    let checker = IgnoreChecker::new(&options.ignore)?;
    let (extra_rules, patterns) = checker.stats();
    tracing::debug!(
        roots = options.paths.len(),
        extra_rules,
        patterns,
        mode = ?mode,
        "starting run"
    );

    let mut scanner = FilteredFileScanner::new(checker, options.paths.clone());
    if let Some(target) = options.output_target() {
        scanner = scanner.excluding(target);
    }
    let mut emitter = Emitter::new(out, mode);
    emitter.begin()?;

    for entry in scanner.by_ref() {
        emitter.emit(&entry)?;
    }

    let (_, emit) = emitter.finish()?;
    let summary = RunSummary {
        scan: scanner.stats().clone(),
        emit,
    };

    tracing::debug!(
        directories = summary.scan.directories_visited,
        ignored = summary.scan.entries_ignored,
        documents = summary.emit.documents,
        skipped = summary.emit.skipped,
        "run complete"
    );
    Ok(summary)
}
