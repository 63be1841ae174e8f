//! Test utilities for driving graphrun end to end.
//!
//! This crate provides fake `tsc` and `node` executables, a throwaway
//! repository layout, and error formatting helpers used across the
//! integration tests.

pub mod error;
pub mod fake_tool;
pub mod workspace;

pub use error::display_error_chain;
pub use fake_tool::{FakeTool, fake_analyzer, fake_compiler, fake_exit};
pub use workspace::Workspace;
