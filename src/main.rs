//! files-to-prompt CLI
//!
//! Concatenates files discovered under the given paths into one prompt.

use clap::Parser;
use files_to_prompt::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; stdout carries the prompt, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(cli::exit_code(&err))
        },
    }
}
