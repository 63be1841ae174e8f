//! Run stage: execute the compiled analyzer over the inputs.

use super::{ENTRY_ARTIFACT, Pipeline};
use crate::error::{ChildFailure, PipelineError};
use crate::log::Format;
use crate::process::CommandLine;
use std::fs;
use std::io::Write;

impl<W: Write> Pipeline<'_, W> {
    /// The analyzer invocation: the runtime, the entry artefact, the output
    /// directory, then every input in command-line order.
    #[must_use]
    pub fn run_command(&self) -> CommandLine {
        let paths = self.config.paths();
        CommandLine::new(self.programs.node.clone())
            .arg(paths.build_dir().join(ENTRY_ARTIFACT).into_string())
            .arg(paths.output_dir().as_str())
            .args(self.config.input_files().iter().map(|input| input.as_str()))
    }

    /// Run the analyzer when inputs were given.
    ///
    /// Without inputs the stage is a successful no-op. Otherwise the build
    /// directory must already exist; the check happens before the output
    /// directory is created.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::BuildDirectoryMissing`],
    /// [`PipelineError::CreateOutputDirectory`], or
    /// [`PipelineError::AnalyzerFailed`].
    pub fn run(&self) -> Result<(), PipelineError> {
        if self.config.input_files().is_empty() {
            self.verbose("No samples or inputs were specified");
            return Ok(());
        }
        let build_dir = self.config.paths().build_dir();
        if !build_dir.is_dir() {
            return Err(PipelineError::BuildDirectoryMissing {
                path: build_dir.to_path_buf(),
            });
        }

        self.create_output_directory()?;

        let command = self.run_command();
        self.verbose_command("Running analyzer", &command.to_string());

        let program = command.program().to_string();
        let exit = self.runner.run(&command).map_err(|source| PipelineError::AnalyzerFailed {
            cause: ChildFailure::Spawn {
                program: program.clone(),
                source,
            },
        })?;
        if !exit.success() {
            return Err(PipelineError::AnalyzerFailed {
                cause: ChildFailure::Exit { program, exit },
            });
        }

        self.verbose_formatted("Analyzer finished successfully", &[Format::Green]);
        self.verbose_formatted(
            &format!("Output path: {}", self.config.output_path()),
            &[Format::Bold],
        );
        Ok(())
    }

    fn create_output_directory(&self) -> Result<(), PipelineError> {
        self.verbose("Creating output directory");
        let output_dir = self.config.paths().output_dir();
        fs::create_dir_all(output_dir).map_err(|source| PipelineError::CreateOutputDirectory {
            path: output_dir.to_path_buf(),
            source,
        })
    }
}
