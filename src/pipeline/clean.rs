//! Clean stage: remove previous output and build artefacts.

use super::Pipeline;
use crate::error::PipelineError;
use crate::paths::{BUILD_DIR_NAME, OUTPUT_DIR_NAME};
use std::fs;
use std::io::Write;
use tracing::debug;

impl<W: Write> Pipeline<'_, W> {
    /// Remove the output directory, then the build directory.
    ///
    /// Does nothing unless `--clean` was given. Directories that do not exist
    /// are skipped. The first removal failure stops the stage, so a failure on
    /// `out` leaves `build` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::RemoveDirectory`] when a directory cannot be
    /// removed.
    pub fn clean(&self) -> Result<(), PipelineError> {
        if !self.config.clean_first() {
            return Ok(());
        }
        let paths = self.config.paths();
        let targets = [
            (paths.output_dir(), OUTPUT_DIR_NAME),
            (paths.build_dir(), BUILD_DIR_NAME),
        ];
        for (path, name) in targets {
            self.verbose(&format!("Removing {name} directory"));
            if !path.is_dir() {
                debug!(%path, "directory absent; nothing to remove");
                continue;
            }
            fs::remove_dir_all(path).map_err(|source| PipelineError::RemoveDirectory {
                name,
                path: path.to_path_buf(),
                source,
            })?;
            debug!(%path, "removed directory");
        }
        Ok(())
    }
}
