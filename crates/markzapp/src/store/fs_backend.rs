use super::backend::StorageBackend;
use crate::error::{MarkzError, Result};
use crate::lines;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_SETTINGS_DIR: &str = ".markz";
pub const DEFAULT_NAMESPACE: &str = "bookmarks";
pub const DOCUMENT_FILE_NAME: &str = "bookmarks.json";

/// Filesystem backend. The document lives at
/// `<root>/<settings_dir>/<namespace>/bookmarks.json`.
pub struct FsBackend {
    root: PathBuf,
    settings_dir: String,
    namespace: String,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            settings_dir: DEFAULT_SETTINGS_DIR.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_location(mut self, settings_dir: &str, namespace: &str) -> Self {
        self.settings_dir = settings_dir.to_string();
        self.namespace = namespace.to_string();
        self
    }

    fn storage_dir(&self) -> PathBuf {
        self.root.join(&self.settings_dir).join(&self.namespace)
    }

    fn write_failure(&self, source: std::io::Error) -> MarkzError {
        MarkzError::PersistenceWriteFailure {
            path: self.document_path(),
            source,
        }
    }
}

impl StorageBackend for FsBackend {
    fn load_document(&self) -> Result<Option<String>> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(MarkzError::Io)?;
        Ok(Some(content))
    }

    fn save_document(&self, contents: &str) -> Result<()> {
        let dir = self.storage_dir();
        // Both levels are created on demand, on every save.
        fs::create_dir_all(&dir).map_err(|e| self.write_failure(e))?;

        // Atomic Write
        let tmp_file = dir.join(format!(".bookmarks-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, contents).map_err(|e| self.write_failure(e))?;
        if let Err(e) = fs::rename(&tmp_file, self.document_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(self.write_failure(e));
        }

        Ok(())
    }

    fn document_path(&self) -> PathBuf {
        self.storage_dir().join(DOCUMENT_FILE_NAME)
    }

    fn read_line(&self, path: &Path, line: u32) -> Result<String> {
        lines::read_line(path, line)
    }
}
