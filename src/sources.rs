//! Recursive discovery of pipeline input sources.
//!
//! [`SourceCollector`] walks the sources directory lazily. Nothing in the
//! stage pipeline consumes it yet; it exists for callers that want every
//! sample file below `sources/`.

use crate::error::SourceError;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Restartable walker over the regular files below a root directory.
///
/// Each call to [`files`](Self::files) starts a fresh traversal, so the same
/// collector can be iterated any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCollector {
    root: Utf8PathBuf,
}

impl SourceCollector {
    /// Collector rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the walk starts from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Lazily yield every regular file below the root.
    ///
    /// Entries within a directory are visited in file-name order and
    /// symbolic links are followed. Directories are descended into but never
    /// yielded. Traversal errors are yielded in place and do not stop the
    /// walk.
    pub fn files(&self) -> impl Iterator<Item = Result<Utf8PathBuf, SourceError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(file) if file.file_type().is_file() => Some(
                    Utf8PathBuf::from_path_buf(file.into_path())
                        .map_err(|path| SourceError::NonUtf8 { path }),
                ),
                Ok(_) => None,
                Err(source) => Some(Err(SourceError::Walk {
                    root: self.root.clone(),
                    source,
                })),
            })
    }

    /// Eagerly collect every file path.
    ///
    /// # Errors
    ///
    /// Returns the first traversal error encountered.
    pub fn collect(&self) -> Result<Vec<Utf8PathBuf>, SourceError> {
        self.files().collect()
    }
}
