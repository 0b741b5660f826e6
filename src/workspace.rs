//! Per-request scratch space.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{Error, Result};

/// Scratch directory owning every temporary artifact of one request.
///
/// The directory and everything under it is removed when the workspace is
/// dropped, on success and failure alike. Only a finalized artifact
/// survives, by being moved out first.
pub struct RequestWorkspace {
    temp_dir: TempDir,
}

impl RequestWorkspace {
    /// Create a fresh workspace.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()
            .map_err(|e| Error::resource(format!("failed to create request workspace: {e}")))?;
        Ok(Self { temp_dir })
    }

    /// The workspace directory.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path for a named artifact inside the workspace.
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Move the named artifact out of the workspace to `dest`, falling back
    /// to a copy when `dest` is on another filesystem.
    pub fn finalize(&self, name: &str, dest: &Path) -> Result<PathBuf> {
        let src = self.artifact(name);
        if !src.exists() {
            return Err(Error::resource(format!(
                "artifact does not exist: {}",
                src.display()
            )));
        }

        if std::fs::rename(&src, dest).is_err() {
            std::fs::copy(&src, dest)?;
            let _ = std::fs::remove_file(&src);
        }
        Ok(dest.to_path_buf())
    }
}
