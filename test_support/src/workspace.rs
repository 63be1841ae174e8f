//! Throwaway repository layout for end-to-end runs.

use crate::fake_tool::FakeTool;
use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;
use toolchain_env::{NODE_ENV, ROOT_ENV, TSC_ENV};

/// A temporary repository root.
#[derive(Debug)]
pub struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    /// Create an empty repository root.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create workspace temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("workspace {} is not UTF-8", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Repository root.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` below the root.
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Create `relative` and any missing parents.
    pub fn mkdir(&self, relative: &str) -> Result<()> {
        let path = self.path(relative);
        fs::create_dir_all(&path).with_context(|| format!("create {path}"))
    }

    /// Write an empty file at `relative`, creating parents as needed.
    pub fn touch(&self, relative: &str) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, "").with_context(|| format!("write {path}"))
    }

    /// Return `true` when `relative` exists below the root.
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Environment that points graphrun at this root and the given fakes.
    pub fn env(&self, tsc: &FakeTool, node: &FakeTool) -> [(&'static str, String); 3] {
        [
            (ROOT_ENV, self.root.to_string()),
            (TSC_ENV, tsc.path().to_string()),
            (NODE_ENV, node.path().to_string()),
        ]
    }
}
