//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure. Every option is independent;
//! none of them conflict with each other.

use camino::Utf8PathBuf;
use clap::Parser;
use std::path::PathBuf;

/// Default name of the graph file written by the analyzer.
pub const DEFAULT_OUTPUT: &str = "graph.txt";

/// Clean, build, and run the TypeScript graph extractor.
#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Skip build stage.
    #[arg(short = 'n', long = "no-build", action = clap::ArgAction::SetFalse)]
    pub build: bool,

    /// Run the analyzer on the given input files (default: do not run anything).
    #[arg(short, long, value_name = "INPUT", num_args = 1..)]
    pub input: Vec<Utf8PathBuf>,

    /// Save the graph inside the file named OUTPUT.
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Print logs and output results.
    #[arg(short, long)]
    pub verbose: bool,

    /// Before building, remove build and output directories.
    #[arg(short, long)]
    pub clean: bool,

    /// Repository root; defaults to the parent of the executable's directory.
    #[arg(long, value_name = "DIR", env = toolchain_env::ROOT_ENV)]
    pub root: Option<PathBuf>,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            build: true,
            input: Vec::new(),
            output: DEFAULT_OUTPUT.to_owned(),
            verbose: false,
            clean: false,
            root: None,
        }
    }
}
