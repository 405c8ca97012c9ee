use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const FILE_NAME: &str = "capture.png";

/// Scratch location the capture tool writes into.
///
/// Each run gets its own directory, so concurrent invocations never share
/// a path. The directory and anything in it are removed when the artifact
/// is dropped, on every exit path. Removal errors are ignored.
#[derive(Debug)]
pub struct TemporaryArtifact {
    dir: TempDir,
    path: PathBuf,
}

impl TemporaryArtifact {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("activeshot-").tempdir()?;
        let path = dir.path().join(FILE_NAME);
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the capture tool produced output.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }

    /// Deletes the scratch directory now instead of at drop.
    pub fn remove(self) {
        let _ = self.dir.close();
    }
}
