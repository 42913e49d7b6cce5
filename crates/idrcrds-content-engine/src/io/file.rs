use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use relative_path::RelativePath;
use tempfile::NamedTempFile;

use super::{DocumentStore, IoError};

/// Stores the document as a UTF-8 file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A document addressed relative to the site root, e.g. `data/site-content.txt`.
    pub fn in_site(site_root: &Path, document: &RelativePath) -> Self {
        Self::new(document.to_path(site_root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<String, IoError> {
        if !self.path.exists() {
            return Err(IoError::NotFound(self.path.display().to_string()));
        }
        fs::read_to_string(&self.path).map_err(IoError::Io)
    }

    /// Writes to a temporary file next to the target and renames it over the
    /// target, so readers see either the old or the new document.
    fn save(&self, text: &str) -> Result<(), IoError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}
