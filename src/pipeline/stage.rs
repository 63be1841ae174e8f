//! Pipeline stage model.

use std::fmt;

/// Enumerates the pipeline stages in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Stage 1: remove the output and build directories.
    Clean = 1,
    /// Stage 2: compile the analyzer with the toolchain.
    Build = 2,
    /// Stage 3: run the analyzer over the inputs.
    Run = 3,
}

/// The number of stages every pipeline walks through.
pub const STAGE_COUNT: usize = 3;

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Self; STAGE_COUNT] = [Self::Clean, Self::Build, Self::Run];

    /// 1-based position of this stage.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Lower-case name used in tracing spans.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Build => "build",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
