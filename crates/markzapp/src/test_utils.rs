use crate::api::MarkzApi;
use crate::store::fs_backend::FsBackend;
use crate::store::{BookmarkStore, FileStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway workspace on disk.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Writes `text` to `relative` under the root, creating parent dirs.
    pub fn write_file(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, text).expect("failed to write file");
        path
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn document_path(&self) -> PathBuf {
        self.root
            .join(".markz")
            .join("bookmarks")
            .join("bookmarks.json")
    }

    pub fn read_document(&self) -> Option<String> {
        fs::read_to_string(self.document_path()).ok()
    }

    /// Loads a store from whatever is on disk now.
    pub fn store(&self) -> FileStore {
        BookmarkStore::load(FsBackend::new(&self.root), &self.root)
    }

    pub fn api(&self) -> MarkzApi<FsBackend> {
        MarkzApi::new(self.store())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
