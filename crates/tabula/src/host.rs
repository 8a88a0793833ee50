//! Native file saving.

use std::path::{Path, PathBuf};
use tabula_core::{FileSaver, SaveError};

/// Saves files into a directory on disk.
#[derive(Debug, Clone)]
pub struct FsFileSaver {
    dir: PathBuf,
}

impl FsFileSaver {
    /// Save into `dir`, creating it on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a file named `filename` is written to.
    #[must_use]
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSaver for FsFileSaver {
    fn save(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<(), SaveError> {
        let plain = Path::new(filename)
            .file_name()
            .is_some_and(|name| name.to_str() == Some(filename));
        if !plain {
            return Err(SaveError::Rejected(format!(
                "file name must not contain a path: {filename}"
            )));
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(filename);
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), mime_type, "saved file");
        Ok(())
    }
}
