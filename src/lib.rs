//! graphrun core library.
//!
//! This library drives the graph extractor through its clean, build, and run
//! stages: command line definitions, path resolution, the stage pipeline,
//! and the subprocess abstraction the stages execute through.

pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod paths;
pub mod pipeline;
pub mod process;
pub mod sources;
