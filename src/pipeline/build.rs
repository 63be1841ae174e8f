//! Build stage: compile the analyzer with the toolchain.

use super::Pipeline;
use crate::error::{ChildFailure, PipelineError};
use crate::log::Format;
use crate::process::CommandLine;
use std::io::Write;

impl<W: Write> Pipeline<'_, W> {
    /// The toolchain invocation. It takes no arguments and relies on the
    /// compiler's own project discovery from the working directory.
    #[must_use]
    pub fn build_command(&self) -> CommandLine {
        CommandLine::new(self.programs.tsc.clone())
    }

    /// Run the toolchain unless `--no-build` was given.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::BuildFailed`] when the toolchain cannot be
    /// started or exits with a non-zero status.
    pub fn build(&self) -> Result<(), PipelineError> {
        if !self.config.should_build() {
            self.verbose("Skipping build stage");
            return Ok(());
        }

        let command = self.build_command();
        self.verbose_command("Running build command", &command.to_string());

        let program = command.program().to_string();
        let exit = self.runner.run(&command).map_err(|source| PipelineError::BuildFailed {
            cause: ChildFailure::Spawn {
                program: program.clone(),
                source,
            },
        })?;
        if !exit.success() {
            return Err(PipelineError::BuildFailed {
                cause: ChildFailure::Exit { program, exit },
            });
        }

        self.verbose_formatted("Build finished successfully", &[Format::Green]);
        Ok(())
    }
}
