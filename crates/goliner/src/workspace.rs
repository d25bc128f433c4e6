//! Scratch directory holding the generated source and its binary

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;
use crate::format::ValidatedProgram;

const PREFIX: &str = "goliner-";
pub(crate) const SOURCE_FILE: &str = "script.go";
pub(crate) const BINARY_FILE: &str = "script.exe";

/// A uniquely named directory that is removed, with its contents, on drop.
#[derive(Debug)]
pub struct Workspace {
    /// Only `None` while being dropped.
    dir: Option<TempDir>,
}

impl Workspace {
    /// Create a workspace under `root`, or under the OS temp directory.
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        tracing::debug!("created workspace {}", dir.path().display());
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.path().join(SOURCE_FILE)
    }

    pub fn binary_path(&self) -> PathBuf {
        self.path().join(BINARY_FILE)
    }

    pub fn write_source(&self, program: &ValidatedProgram) -> Result<PathBuf> {
        let path = self.source_path();
        fs::write(&path, program.as_bytes())?;
        Ok(path)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        tracing::debug!("removing workspace {}", path.display());
        if let Err(e) = dir.close() {
            tracing::warn!("cannot remove workspace {}: {}", path.display(), e);
        }
    }
}
