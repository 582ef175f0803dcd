//! # Storage Layer
//!
//! [`BookmarkStore`] is the aggregate root: every file entry and bookmark lives
//! in it, and it is the unit of persistence. It is generic over a
//! [`StorageBackend`] so the same logic runs against disk ([`FileStore`]) and
//! memory ([`InMemoryStore`]).
//!
//! ## Invariants
//!
//! After every public operation returns:
//! 1. **Unique paths**: no two file entries share a path.
//! 2. **No empty files**: removing the last bookmark of a file removes the file.
//! 3. **Ascending lines**: bookmarks inside a file are strictly ascending.
//! 4. **File order**: when an add creates a file, files are re-sorted ascending
//!    by path. Loading keeps the persisted order.
//!
//! [`BookmarkStore::check_invariants`] verifies 1-3. It runs after load, and
//! after each mutation in debug builds.
//!
//! ## Persistence
//!
//! Every mutation rewrites the whole document synchronously before returning, so
//! disk always holds a complete snapshot. If the write fails the in-memory
//! change is kept and `PersistenceWriteFailure` is returned; the next successful
//! save writes it out.
//!
//! Loading never fails. A missing document is an empty store; an unreadable or
//! malformed one is logged and also treated as empty.
//!
//! ## Labels
//!
//! A bookmark's label (`#<line>: <text>`) is derived from the file content and
//! cached per `(path, line)`. The cache is dropped for a file when it is mutated
//! or refreshed. While nothing refreshes a file its labels stay frozen, even if
//! the file changes on disk.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/.markz/
//! ├── markz.toml                # Project configuration (optional)
//! └── bookmarks/
//!     └── bookmarks.json        # The persisted document
//! ```

use crate::error::{MarkzError, Result};
use crate::model::{FileEntry, Node, Reload};
use crate::paths::normalize;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub mod backend;
pub mod codec;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;
use fs_backend::FsBackend;
use mem_backend::MemBackend;

pub const DEFAULT_UNAVAILABLE_LABEL: &str = "(unavailable)";

pub type FileStore = BookmarkStore<FsBackend>;
pub type InMemoryStore = BookmarkStore<MemBackend>;

/// What [`BookmarkStore::add_bookmark`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The file was not tracked yet; it was created with this bookmark.
    CreatedFile,
    /// The bookmark was added to an existing file.
    Added,
    /// The bookmark already existed. Nothing was saved.
    Exists,
}

impl AddOutcome {
    pub fn reload(&self, path: &Path) -> Reload {
        match self {
            AddOutcome::CreatedFile => Reload::All,
            AddOutcome::Added => Reload::File {
                path: path.to_path_buf(),
            },
            AddOutcome::Exists => Reload::None,
        }
    }
}

/// What [`BookmarkStore::remove`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub reload: Reload,
    /// Set when a file entry left the store, directly or by cascade.
    pub removed_file: Option<PathBuf>,
}

pub struct BookmarkStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    root: PathBuf,
    files: Vec<FileEntry>,
    /// Position of each file in `files`, keyed by normalized path.
    index: HashMap<PathBuf, usize>,
    labels: RefCell<HashMap<(PathBuf, u32), String>>,
    unavailable_label: String,
}

impl<B: StorageBackend> BookmarkStore<B> {
    /// An empty store. Nothing is read from the backend.
    pub fn with_backend(backend: B, root: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            root: root.into(),
            files: Vec::new(),
            index: HashMap::new(),
            labels: RefCell::new(HashMap::new()),
            unavailable_label: DEFAULT_UNAVAILABLE_LABEL.to_string(),
        }
    }

    /// Loads the persisted document. Never fails: an absent, unreadable or
    /// malformed document yields an empty store.
    pub fn load(backend: B, root: impl Into<PathBuf>) -> Self {
        let mut store = Self::with_backend(backend, root);
        let text = match store.backend.load_document() {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(
                    path = %store.backend.document_path().display(),
                    "no bookmarks document yet"
                );
                return store;
            }
            Err(e) => {
                tracing::warn!(
                    path = %store.backend.document_path().display(),
                    error = %e,
                    "could not read bookmarks document; starting empty"
                );
                return store;
            }
        };

        let records = match codec::from_json(&text) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %store.backend.document_path().display(),
                    error = %e,
                    "bookmarks document is not valid; starting empty"
                );
                return store;
            }
        };

        store.files = merge_entries(codec::deserialize(records, &store.root));
        store.reindex();
        if let Err(e) = store.check_invariants() {
            tracing::warn!(error = %e, "bookmarks document failed consistency check");
        }
        tracing::info!(
            files = store.files.len(),
            bookmarks = store.bookmark_count(),
            "loaded bookmarks"
        );
        store
    }

    /// Text shown for bookmarks whose file cannot be read.
    pub fn with_unavailable_label(mut self, label: impl Into<String>) -> Self {
        self.unavailable_label = label.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Looks a file up by path. `.` and `..` segments are folded first, so
    /// two spellings of one path find the same entry.
    pub fn get_file(&self, path: &Path) -> Option<&FileEntry> {
        self.position(path).map(|index| &self.files[index])
    }

    pub fn contains(&self, node: &Node) -> bool {
        match node {
            Node::File { path } => self.get_file(path).is_some(),
            Node::Bookmark { path, line } => {
                self.get_file(path).is_some_and(|f| f.has_line(*line))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn bookmark_count(&self) -> usize {
        self.files.iter().map(|f| f.bookmarks.len()).sum()
    }

    /// Every bookmark in file order, then line order.
    pub fn bookmarks(&self) -> impl Iterator<Item = Node> + '_ {
        self.files.iter().flat_map(|f| f.bookmark_nodes())
    }

    /// Adds a bookmark at `line` of `path` and persists the store.
    pub fn add_bookmark(&mut self, path: &Path, line: u32) -> Result<AddOutcome> {
        if line == 0 {
            return Err(MarkzError::InvalidLine(line));
        }
        let path = normalize(path);
        let path = path.as_path();

        let outcome = match self.position(path) {
            Some(index) => {
                if self.files[index].insert_line(line) {
                    AddOutcome::Added
                } else {
                    AddOutcome::Exists
                }
            }
            None => {
                let mut file = FileEntry::new(path);
                file.insert_line(line);
                self.files.push(file);
                self.files.sort_by(|a, b| a.path.cmp(&b.path));
                self.reindex();
                AddOutcome::CreatedFile
            }
        };

        if outcome == AddOutcome::Exists {
            return Ok(outcome);
        }

        tracing::debug!(path = %path.display(), line, ?outcome, "added bookmark");
        self.invalidate_labels(path);
        self.debug_check();
        self.save()?;
        Ok(outcome)
    }

    /// Removes a file (with all its bookmarks) or a single bookmark, then
    /// persists the store. Unknown nodes are ignored.
    pub fn remove(&mut self, node: &Node) -> Result<Removal> {
        let removal = match (node, self.position(node.path())) {
            (_, None) => Removal::nothing(),
            (Node::File { .. }, Some(index)) => {
                let removed = self.files.remove(index);
                self.reindex();
                Removal {
                    reload: Reload::All,
                    removed_file: Some(removed.path),
                }
            }
            (Node::Bookmark { line, .. }, Some(index)) => {
                let file = &mut self.files[index];
                if !file.remove_line(*line) {
                    Removal::nothing()
                } else if file.bookmarks.is_empty() {
                    let removed = self.files.remove(index);
                    self.reindex();
                    Removal {
                        reload: Reload::All,
                        removed_file: Some(removed.path),
                    }
                } else {
                    Removal {
                        reload: Reload::File {
                            path: file.path.clone(),
                        },
                        removed_file: None,
                    }
                }
            }
        };

        if removal.reload != Reload::None {
            tracing::debug!(node = %node, "removed");
            self.invalidate_labels(node.path());
        }
        self.debug_check();
        self.save()?;
        Ok(removal)
    }

    /// Returns true if a file entry for `path` exists.
    pub fn set_collapsed(&mut self, path: &Path, collapsed: bool) -> bool {
        match self.position(path) {
            Some(index) => {
                self.files[index].collapsed = collapsed;
                true
            }
            None => false,
        }
    }

    /// Label for the bookmark at `line` of `path`.
    pub fn label(&self, path: &Path, line: u32) -> String {
        let path = normalize(path);
        let path = path.as_path();
        let key = (path.to_path_buf(), line);
        if let Some(label) = self.labels.borrow().get(&key) {
            return label.clone();
        }

        match self.backend.read_line(path, line) {
            Ok(text) => {
                let label = format!("#{}: {}", line, text);
                self.labels.borrow_mut().insert(key, label.clone());
                label
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), line, error = %e, "label unavailable");
                format!("#{}: {}", line, self.unavailable_label)
            }
        }
    }

    pub fn invalidate_labels(&self, path: &Path) {
        let path = normalize(path);
        self.labels.borrow_mut().retain(|(p, _), _| *p != path);
    }

    pub fn invalidate_all_labels(&self) {
        self.labels.borrow_mut().clear();
    }

    /// Writes the whole store through the backend.
    pub fn save(&self) -> Result<()> {
        let records = codec::serialize(&self.files, &self.root);
        let json = codec::to_json(&records)?;
        self.backend.save_document(&json)?;
        tracing::info!(
            files = records.len(),
            path = %self.backend.document_path().display(),
            "saved bookmarks"
        );
        Ok(())
    }

    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.files.len());
        for file in &self.files {
            if !seen.insert(normalize(&file.path)) {
                return Err(MarkzError::DuplicateFileEntry(file.path.clone()));
            }
        }
        for (i, file) in self.files.iter().enumerate() {
            if self.index.get(&normalize(&file.path)) != Some(&i) {
                return Err(MarkzError::Invariant(format!(
                    "path index is stale for {}",
                    file.path.display()
                )));
            }
            if file.bookmarks.is_empty() {
                return Err(MarkzError::Invariant(format!(
                    "file {} has no bookmarks",
                    file.path.display()
                )));
            }
            if file.bookmarks.windows(2).any(|w| w[0] >= w[1]) {
                return Err(MarkzError::Invariant(format!(
                    "bookmarks of {} are not strictly ascending",
                    file.path.display()
                )));
            }
        }
        Ok(())
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.index.get(&normalize(path)).copied()
    }

    /// Rebuilds the path index after `files` changed shape. The first entry
    /// wins for a duplicated path; `check_invariants` reports the rest.
    fn reindex(&mut self) {
        self.index.clear();
        for (i, file) in self.files.iter().enumerate() {
            self.index.entry(normalize(&file.path)).or_insert(i);
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "store invariant broken: {:?}",
            self.check_invariants()
        );
    }
}

impl Removal {
    fn nothing() -> Self {
        Self {
            reload: Reload::None,
            removed_file: None,
        }
    }
}

/// Repairs a freshly decoded document: sorts lines, merges duplicate paths
/// into their first occurrence and drops files left without bookmarks.
fn merge_entries(entries: Vec<FileEntry>) -> Vec<FileEntry> {
    let mut merged: Vec<FileEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged.iter_mut().find(|f| f.path == entry.path) {
            Some(existing) => {
                tracing::warn!(
                    path = %entry.path.display(),
                    "duplicate file record in bookmarks document; merging"
                );
                existing.bookmarks.extend(entry.bookmarks);
            }
            None => merged.push(entry),
        }
    }
    for file in &mut merged {
        file.sort_and_dedup();
    }
    merged.retain(|f| {
        if f.bookmarks.is_empty() {
            tracing::warn!(path = %f.path.display(), "dropping file record without bookmarks");
        }
        !f.bookmarks.is_empty()
    });
    merged
}
