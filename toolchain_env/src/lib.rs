#![forbid(unsafe_code)]

//! Environment variable names shared by graphrun, its tests, and helpers.
//!
//! Each variable replaces the default executable for one external
//! collaborator. Unset variables leave the default program name in place so
//! it is resolved through `PATH`.

/// Environment variable override for the TypeScript compiler used by the
/// build stage.
///
/// # Examples
///
/// ```
/// use toolchain_env::TSC_ENV;
/// assert_eq!(TSC_ENV, "GRAPHRUN_TSC");
/// ```
pub const TSC_ENV: &str = "GRAPHRUN_TSC";

/// Environment variable override for the runtime that executes the analyzer.
pub const NODE_ENV: &str = "GRAPHRUN_NODE";

/// Environment variable that replaces the derived repository root.
pub const ROOT_ENV: &str = "GRAPHRUN_ROOT";
