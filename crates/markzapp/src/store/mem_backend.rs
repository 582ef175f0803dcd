use super::backend::StorageBackend;
use crate::error::{MarkzError, Result};
use crate::lines;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since markz is single-threaded.
/// Bookmarked "files" are plain strings registered with [`MemBackend::write_file`].
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    files: RefCell<HashMap<PathBuf, String>>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the persisted document, as if a previous session had saved it.
    pub fn with_document(self, contents: &str) -> Self {
        *self.document.borrow_mut() = Some(contents.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Create or overwrite a virtual file readable through `read_line`.
    pub fn write_file(&self, path: impl Into<PathBuf>, text: &str) {
        self.files.borrow_mut().insert(path.into(), text.to_string());
    }

    /// The last saved document.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful saves, to assert when persistence happened.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_document(&self) -> Result<Option<String>> {
        Ok(self.document.borrow().clone())
    }

    fn save_document(&self, contents: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(MarkzError::PersistenceWriteFailure {
                path: self.document_path(),
                source: io::Error::new(io::ErrorKind::Other, "Simulated write error"),
            });
        }
        *self.document.borrow_mut() = Some(contents.to_string());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn document_path(&self) -> PathBuf {
        PathBuf::from("memory://bookmarks.json")
    }

    fn read_line(&self, path: &Path, line: u32) -> Result<String> {
        let files = self.files.borrow();
        let text = files
            .get(path)
            .ok_or_else(|| MarkzError::FileUnavailable {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such virtual file"),
            })?;
        Ok(lines::line_at(text, line))
    }
}
