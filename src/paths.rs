//! Well-known directory locations.
//!
//! Every directory the pipeline touches hangs off the repository root, which
//! is the parent of the directory holding the `graphrun` executable unless an
//! explicit root is supplied.

use crate::error::PipelineError;
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::path::{Path, PathBuf};

/// Directory receiving the toolchain output.
pub const BUILD_DIR_NAME: &str = "build";
/// Directory receiving the analyzer output.
pub const OUTPUT_DIR_NAME: &str = "out";
/// Directory holding pipeline input sources.
pub const SOURCES_DIR_NAME: &str = "sources";

/// Absolute locations derived once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    tool: Utf8PathBuf,
    root: Utf8PathBuf,
    build: Utf8PathBuf,
    output: Utf8PathBuf,
    sources: Utf8PathBuf,
}

impl PathSet {
    /// Derive every location from the path of the tool's own executable.
    ///
    /// The tool directory is the parent of `tool_path`; the root is the
    /// parent of the tool directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoParentDirectory`] when either parent is
    /// missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use graphrun::paths::PathSet;
    ///
    /// let paths = PathSet::from_tool_path(Utf8Path::new("/repo/scripts/graphrun")).unwrap();
    /// assert_eq!(paths.root_dir().as_str(), "/repo");
    /// assert_eq!(paths.build_dir().as_str(), "/repo/build");
    /// ```
    pub fn from_tool_path(tool_path: &Utf8Path) -> Result<Self, PipelineError> {
        let tool_dir = parent_of(tool_path)?;
        let root_dir = parent_of(&tool_dir)?;
        Ok(Self::with_root(tool_dir, root_dir))
    }

    /// Use `root_dir` as the repository root, keeping `tool_dir` as given.
    #[must_use]
    pub fn with_root(tool_dir: Utf8PathBuf, root_dir: Utf8PathBuf) -> Self {
        Self {
            build: root_dir.join(BUILD_DIR_NAME),
            output: root_dir.join(OUTPUT_DIR_NAME),
            sources: root_dir.join(SOURCES_DIR_NAME),
            tool: tool_dir,
            root: root_dir,
        }
    }

    /// Resolve paths for the running executable.
    ///
    /// The executable path is canonicalised so symlinked installs resolve to
    /// the real checkout. When `root_override` is provided it replaces the
    /// derived root; relative overrides are taken from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the executable cannot be located, a path is not
    /// UTF-8, or the derived root has no parent.
    pub fn discover(root_override: Option<&Path>) -> Result<Self, PipelineError> {
        let exe = env::current_exe()
            .and_then(|path| path.canonicalize())
            .map_err(|source| PipelineError::ToolLocation { source })?;
        let exe_utf8 = to_utf8(exe)?;
        match root_override {
            Some(root) => {
                let tool_dir = parent_of(&exe_utf8)?;
                let abs_root = std::path::absolute(root)
                    .map_err(|source| PipelineError::ToolLocation { source })?;
                Ok(Self::with_root(tool_dir, to_utf8(abs_root)?))
            }
            None => Self::from_tool_path(&exe_utf8),
        }
    }

    /// Directory containing the tool executable.
    #[must_use]
    pub fn tool_dir(&self) -> &Utf8Path {
        &self.tool
    }

    /// Repository root.
    #[must_use]
    pub fn root_dir(&self) -> &Utf8Path {
        &self.root
    }

    /// `root/build`.
    #[must_use]
    pub fn build_dir(&self) -> &Utf8Path {
        &self.build
    }

    /// `root/out`.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output
    }

    /// `root/sources`.
    #[must_use]
    pub fn sources_dir(&self) -> &Utf8Path {
        &self.sources
    }
}

fn parent_of(path: &Utf8Path) -> Result<Utf8PathBuf, PipelineError> {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .map(Utf8Path::to_path_buf)
        .ok_or_else(|| PipelineError::NoParentDirectory {
            path: path.to_path_buf(),
        })
}

fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf, PipelineError> {
    Utf8PathBuf::from_path_buf(path).map_err(|bad| PipelineError::NonUtf8Path { path: bad })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn derives_all_locations_from_tool_path() {
        let paths = PathSet::from_tool_path(Utf8Path::new("/work/repo/scripts/graphrun"))
            .expect("derive paths");
        assert_eq!(paths.tool_dir().as_str(), "/work/repo/scripts");
        assert_eq!(paths.root_dir().as_str(), "/work/repo");
        assert_eq!(paths.build_dir().as_str(), "/work/repo/build");
        assert_eq!(paths.output_dir().as_str(), "/work/repo/out");
        assert_eq!(paths.sources_dir().as_str(), "/work/repo/sources");
    }

    #[rstest]
    #[case("/graphrun")]
    #[case("graphrun")]
    fn tool_path_without_grandparent_is_rejected(#[case] tool_path: &str) {
        let err = PathSet::from_tool_path(Utf8Path::new(tool_path)).expect_err("no root");
        assert!(matches!(err, PipelineError::NoParentDirectory { .. }));
    }

    #[test]
    fn explicit_root_keeps_tool_dir() {
        let paths = PathSet::with_root("/opt/bin".into(), "/work/repo".into());
        assert_eq!(paths.tool_dir().as_str(), "/opt/bin");
        assert_eq!(paths.output_dir().as_str(), "/work/repo/out");
    }

    #[test]
    fn discover_makes_relative_root_absolute() {
        let paths = PathSet::discover(Some(Path::new("checkout"))).expect("discover");
        assert!(paths.root_dir().is_absolute());
        assert!(paths.root_dir().ends_with("checkout"));
        assert!(paths.tool_dir().is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_rejected() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = PathBuf::from(OsString::from_vec(vec![b'/', 0xff, b'x']));
        let err = to_utf8(raw.clone()).expect_err("invalid UTF-8");
        assert!(matches!(err, PipelineError::NonUtf8Path { path } if path == raw));
    }
}
