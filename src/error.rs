//! Error types for path resolution and pipeline stages.
//!
//! Every failure the orchestrator can hit is a [`PipelineError`] variant. The
//! stages return these values instead of exiting, and `main` converts the
//! first one it sees into a process exit code via
//! [`PipelineError::exit_code`].

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::process::ProcessExit;

/// Exit code used when no more specific code is available.
pub const DEFAULT_EXIT_CODE: u8 = 1;

/// Errors raised while resolving paths or executing pipeline stages.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    /// The location of the running executable could not be determined.
    #[error("Failed to locate the graphrun executable")]
    #[diagnostic(code(graphrun::paths::tool_location))]
    ToolLocation {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A path that must be UTF-8 was not.
    #[error("Path {} is not valid UTF-8", path.display())]
    #[diagnostic(code(graphrun::paths::non_utf8))]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The tool directory has no parent to act as the repository root.
    #[error("Path {path} has no parent directory")]
    #[diagnostic(
        code(graphrun::paths::no_parent),
        help("pass --root to name the repository root explicitly")
    )]
    NoParentDirectory {
        /// Directory whose parent was requested.
        path: Utf8PathBuf,
    },

    /// Recursive removal of a directory failed during the clean stage.
    #[error("Failed to remove existing {name} directory")]
    #[diagnostic(code(graphrun::clean::remove_dir))]
    RemoveDirectory {
        /// Short name of the directory (`out` or `build`).
        name: &'static str,
        /// Absolute path of the directory.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The run stage was requested but nothing has been built yet.
    #[error("Build directory does not exist")]
    #[diagnostic(
        code(graphrun::run::build_dir_missing),
        help("run without --no-build at least once to compile the analyzer")
    )]
    BuildDirectoryMissing {
        /// Expected build directory.
        path: Utf8PathBuf,
    },

    /// The analyzer output directory could not be created.
    #[error("Failed to create output directory")]
    #[diagnostic(code(graphrun::run::create_output_dir))]
    CreateOutputDirectory {
        /// Directory that was being created.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The toolchain could not be started or exited unsuccessfully.
    #[error("Build failed")]
    #[diagnostic(code(graphrun::build::failed))]
    BuildFailed {
        /// How the child ended, or why it never started.
        #[source]
        cause: ChildFailure,
    },

    /// The analyzer could not be started or exited unsuccessfully.
    #[error("Analyzer failed")]
    #[diagnostic(code(graphrun::run::analyzer_failed))]
    AnalyzerFailed {
        /// How the child ended, or why it never started.
        #[source]
        cause: ChildFailure,
    },
}

/// Why a child process did not complete successfully.
#[derive(Debug, Error)]
pub enum ChildFailure {
    /// The program could not be spawned or waited on.
    #[error("failed to run {program}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The program ran and reported failure.
    #[error("{program} {exit}")]
    Exit {
        /// Program that was invoked.
        program: String,
        /// Observed exit.
        exit: ProcessExit,
    },
}

impl ChildFailure {
    /// Exit code to propagate for this failure.
    ///
    /// A child's own exit code passes through verbatim; spawn failures fall
    /// back to [`DEFAULT_EXIT_CODE`].
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Spawn { .. } => DEFAULT_EXIT_CODE,
            Self::Exit { exit, .. } => exit.code().map_or(DEFAULT_EXIT_CODE, clamp_exit_code),
        }
    }
}

impl PipelineError {
    /// Map the error to the code the process should exit with.
    ///
    /// Filesystem failures report the OS error number, child failures report
    /// the child's code, and everything else uses [`DEFAULT_EXIT_CODE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use graphrun::error::PipelineError;
    ///
    /// let err = PipelineError::BuildDirectoryMissing { path: "/repo/build".into() };
    /// assert_eq!(err.exit_code(), 1);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ToolLocation { source }
            | Self::RemoveDirectory { source, .. }
            | Self::CreateOutputDirectory { source, .. } => os_exit_code(source),
            Self::BuildFailed { cause } | Self::AnalyzerFailed { cause } => cause.exit_code(),
            Self::NonUtf8Path { .. }
            | Self::NoParentDirectory { .. }
            | Self::BuildDirectoryMissing { .. } => DEFAULT_EXIT_CODE,
        }
    }
}

fn os_exit_code(err: &io::Error) -> u8 {
    err.raw_os_error().map_or(DEFAULT_EXIT_CODE, clamp_exit_code)
}

/// Narrow an arbitrary status to a non-zero process exit code.
///
/// Values outside `1..=255` cannot be reported faithfully and collapse to
/// [`DEFAULT_EXIT_CODE`] so a failure never reads as success.
fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code)
        .ok()
        .filter(|value| *value != 0)
        .unwrap_or(DEFAULT_EXIT_CODE)
}

/// Errors raised while walking the sources directory.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    /// A directory entry could not be read.
    #[error("failed to walk sources below {root}")]
    #[diagnostic(code(graphrun::sources::walk))]
    Walk {
        /// Root of the walk.
        root: Utf8PathBuf,
        /// Underlying traversal failure.
        #[source]
        source: walkdir::Error,
    },

    /// A discovered file path was not valid UTF-8.
    #[error("source path {} is not valid UTF-8", path.display())]
    #[diagnostic(code(graphrun::sources::non_utf8))]
    NonUtf8 {
        /// The offending path.
        path: PathBuf,
    },
}
