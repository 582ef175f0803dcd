use crate::error::Result;
use std::path::{Path, PathBuf};

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while BookmarkStore handles the "what" (invariants, ordering, labels).
pub trait StorageBackend {
    // --- Document Operations ---

    /// Load the raw bookmarks document.
    /// Returns Ok(None) when nothing has been saved yet.
    fn load_document(&self) -> Result<Option<String>>;

    /// Replace the bookmarks document.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a
    /// partial snapshot. Failures surface as `PersistenceWriteFailure`.
    fn save_document(&self, contents: &str) -> Result<()>;

    /// Where the document lives. For MemBackend, a virtual path.
    fn document_path(&self) -> PathBuf;

    // --- Content Operations ---

    /// Trimmed text of a 1-based line of a bookmarked file, clamped to the
    /// file's last line. Returns `FileUnavailable` if the file cannot be read.
    fn read_line(&self, path: &Path, line: u32) -> Result<String>;
}
