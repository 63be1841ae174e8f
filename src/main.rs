//! Application entry point.
//!
//! Parses command-line arguments, runs the stage pipeline, and turns the
//! first failure into the process exit code.

use clap::Parser;
use graphrun::cli::Cli;
use graphrun::config::Config;
use graphrun::error::PipelineError;
use graphrun::log::Log;
use graphrun::paths::PathSet;
use graphrun::pipeline::Pipeline;
use graphrun::process::SystemRunner;
use miette::Diagnostic;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();

    let log = Log::stdout();
    let verbose = cli.verbose;
    match run(cli, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&err.to_string());
            if verbose {
                report_details(&log, &err);
            }
            tracing::debug!(error = ?err, "pipeline failed");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli, log: &Log) -> Result<(), PipelineError> {
    let paths = PathSet::discover(cli.root.as_deref())?;
    let config = Config::new(cli, paths);
    Pipeline::new(&config, log, &SystemRunner).execute()
}

/// Print the diagnostic help and the chain of underlying causes.
fn report_details(log: &Log, err: &PipelineError) {
    let mut source = err.source();
    while let Some(cause) = source {
        log.info(&format!("caused by: {cause}"));
        source = cause.source();
    }
    if let Some(help) = err.help() {
        log.info(&format!("help: {help}"));
    }
}
