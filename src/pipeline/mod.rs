//! Stage sequencing and failure propagation.
//!
//! A [`Pipeline`] walks [`Stage::ALL`] in order. Each stage either completes
//! or returns a [`PipelineError`]; the first error stops the walk and is
//! handed back to the caller, so downstream stages never run after an
//! upstream failure. Stages share nothing except the configuration and the
//! directories they create or remove.

mod build;
mod clean;
mod run;
mod stage;

pub use stage::{STAGE_COUNT, Stage};

use crate::config::Config;
use crate::error::PipelineError;
use crate::log::{Format, InfoOptions, Log};
use crate::process::{ProcessRunner, resolve_program};
use camino::Utf8PathBuf;
use std::io::{self, Write};
use toolchain_env::{NODE_ENV, TSC_ENV};
use tracing::{debug, info_span};

/// Default toolchain executable.
pub const TSC_PROGRAM: &str = "tsc";
/// Default runtime executable for the analyzer.
pub const NODE_PROGRAM: &str = "node";
/// Entry point of the compiled analyzer inside the build directory.
pub const ENTRY_ARTIFACT: &str = "main.js";

/// Executables invoked by the build and run stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Programs {
    /// Compiler run by the build stage.
    pub tsc: Utf8PathBuf,
    /// Runtime that executes the analyzer.
    pub node: Utf8PathBuf,
}

impl Programs {
    /// Resolve both executables, honouring `GRAPHRUN_TSC` and `GRAPHRUN_NODE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            tsc: resolve_program(TSC_ENV, TSC_PROGRAM),
            node: resolve_program(NODE_ENV, NODE_PROGRAM),
        }
    }
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            tsc: Utf8PathBuf::from(TSC_PROGRAM),
            node: Utf8PathBuf::from(NODE_PROGRAM),
        }
    }
}

/// The clean, build, run orchestrator.
pub struct Pipeline<'a, W: Write = io::Stdout> {
    config: &'a Config,
    log: &'a Log<W>,
    runner: &'a dyn ProcessRunner,
    programs: Programs,
}

impl<'a, W: Write> Pipeline<'a, W> {
    /// Bind a pipeline to its configuration, logger, and process runner.
    ///
    /// Executables are resolved from the environment; see
    /// [`Programs::from_env`].
    #[must_use]
    pub fn new(config: &'a Config, log: &'a Log<W>, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            config,
            log,
            runner,
            programs: Programs::from_env(),
        }
    }

    /// Replace the executables used by the build and run stages.
    #[must_use]
    pub fn with_programs(mut self, programs: Programs) -> Self {
        self.programs = programs;
        self
    }

    /// Execute every stage in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails.
    pub fn execute(&self) -> Result<(), PipelineError> {
        for stage in Stage::ALL {
            let span = info_span!("stage", name = stage.name(), index = stage.index());
            let _entered = span.enter();
            debug!("entering stage");
            self.execute_stage(stage)?;
        }
        Ok(())
    }

    /// Execute a single stage.
    ///
    /// # Errors
    ///
    /// Returns the stage's error unchanged.
    pub fn execute_stage(&self, stage: Stage) -> Result<(), PipelineError> {
        match stage {
            Stage::Clean => self.clean(),
            Stage::Build => self.build(),
            Stage::Run => self.run(),
        }
    }

    fn verbose(&self, message: &str) {
        if self.config.verbose() {
            self.log.info(message);
        }
    }

    fn verbose_formatted(&self, message: &str, format: &[Format]) {
        if self.config.verbose() {
            self.log.info_with(message, InfoOptions::formatted(format));
        }
    }

    fn verbose_command(&self, message: &str, command: &str) {
        if self.config.verbose() {
            self.log.command(message, command);
        }
    }
}
