//! Command-line interface for files-to-prompt

use crate::config::{ConfigFile, OutputFormat, Options};
use crate::core::error::PromptError;
use crate::ignore::IgnoreSettings;
use crate::runner;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Concatenate a directory full of files into a single prompt for use with LLMs
#[derive(Parser, Debug)]
#[command(
    name = "files-to-prompt",
    version,
    about = "Concatenate a directory full of files into a single prompt for use with LLMs",
    long_about = "Takes one or more paths to files or directories and outputs every file, \
                  recursively, each one preceded with its filename like this:\n\n\
                  path/to/file.py\n---\nContents of file.py goes here\n\n---\n\n\
                  Hidden files and anything matched by a .gitignore are skipped by default. \
                  With --xml the files are wrapped in numbered <document> tags; with \
                  --template-file each file is rendered through a Jinja template that sees \
                  `path`, `content` and `index`."
)]
pub struct Cli {
    /// Files or directories to include
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Include files and folders starting with .
    #[arg(long)]
    pub include_hidden: bool,

    /// Ignore .gitignore files and include all files
    #[arg(long)]
    pub ignore_gitignore: bool,

    /// Pattern of file names to ignore (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore_patterns: Vec<String>,

    /// Extra file of ignore rules, one glob per line (repeatable)
    #[arg(long = "ignore-file", visible_alias = "add-ignore-file", value_name = "PATH")]
    pub ignore_files: Vec<PathBuf>,

    /// Output in XML format suitable for Claude's long context window
    #[arg(long, conflicts_with = "template_file")]
    pub xml: bool,

    /// Render each file through this Jinja template (variables: path, content, index)
    #[arg(short = 't', long, value_name = "PATH")]
    pub template_file: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file with default options
    #[arg(long, env = "FILES_TO_PROMPT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// When to colour warnings
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Colour output: auto, always, never
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Options given on the command line, before configuration defaults
    pub fn to_options(&self) -> Options {
        let format = match (&self.template_file, self.xml) {
            (Some(path), _) => OutputFormat::Template(path.clone()),
            (None, true) => OutputFormat::Xml,
            (None, false) => OutputFormat::Plain,
        };

        Options {
            paths: self.paths.clone(),
            ignore: IgnoreSettings {
                include_hidden: self.include_hidden,
                ignore_gitignore: self.ignore_gitignore,
                ignore_files: self.ignore_files.clone(),
                patterns: self.ignore_patterns.clone(),
            },
            format,
            output: self.output.clone(),
        }
    }
}

impl ColorChoice {
    /// Whether warnings on stderr should be coloured
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Warnings go to stderr, whatever stdout is connected to
            ColorChoice::Auto => atty::is(atty::Stream::Stderr),
        }
    }
}

/// Exit status for a failed run: 2 for bad invocations, like clap, 1 otherwise
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PromptError>() {
        Some(e) if e.is_usage_error() => 2,
        _ => 1,
    }
}

/// Run the command described by `cli`
pub fn execute(cli: Cli) -> Result<()> {
    colored::control::set_override(cli.color.enabled());

    let config = match cli.config.clone().or_else(ConfigFile::default_path) {
        Some(path) => ConfigFile::load(&path)?,
        None => ConfigFile::default(),
    };
    let options = cli.to_options().with_defaults(&config.defaults);

    // Nothing, not even an empty output file, is created for a bad invocation
    options.validate()?;
    let mode = runner::output_mode(&options.format)?;

    let result = match &options.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            runner::run_with_mode(&options, mode, BufWriter::new(file))
        },
        None => runner::run_with_mode(&options, mode, BufWriter::new(io::stdout().lock())),
    };

    match result {
        Ok(_) => Ok(()),
        // The reader went away (e.g. `| head`); nothing left to do
        Err(PromptError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}
