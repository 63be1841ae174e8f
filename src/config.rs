//! Immutable run configuration shared by every stage.

use crate::cli::Cli;
use crate::paths::PathSet;
use camino::Utf8PathBuf;

/// Parsed options plus resolved paths.
///
/// Built once in `main` and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    should_build: bool,
    input_files: Vec<Utf8PathBuf>,
    output_file_name: String,
    verbose: bool,
    clean_first: bool,
    paths: PathSet,
}

impl Config {
    /// Combine parsed command-line options with resolved paths.
    #[must_use]
    pub fn new(cli: Cli, paths: PathSet) -> Self {
        Self {
            should_build: cli.build,
            input_files: cli.input,
            output_file_name: cli.output,
            verbose: cli.verbose,
            clean_first: cli.clean,
            paths,
        }
    }

    /// Whether the build stage runs.
    #[must_use]
    pub const fn should_build(&self) -> bool {
        self.should_build
    }

    /// Analyzer inputs in command-line order. Empty means the run stage is
    /// skipped.
    #[must_use]
    pub fn input_files(&self) -> &[Utf8PathBuf] {
        &self.input_files
    }

    /// Name of the graph file inside the output directory.
    #[must_use]
    pub fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    /// Whether informational lines are printed.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether the clean stage runs.
    #[must_use]
    pub const fn clean_first(&self) -> bool {
        self.clean_first
    }

    /// Resolved directory locations.
    #[must_use]
    pub const fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Full path of the graph file the analyzer is expected to write.
    #[must_use]
    pub fn output_path(&self) -> Utf8PathBuf {
        self.paths.output_dir().join(&self.output_file_name)
    }
}
