use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkzError {
    /// The line content behind a bookmark label could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is outside the workspace: {}", .0.display())]
    PathOutsideWorkspace(PathBuf),

    /// Store invariant violation: two file entries share a path.
    #[error("Duplicate file entry for {}", .0.display())]
    DuplicateFileEntry(PathBuf),

    /// The store changed in memory but the document on disk was not updated.
    #[error("Failed to write bookmarks to {}: {source}", path.display())]
    PersistenceWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The document has no path (it is remote or unsaved)")]
    NoDocumentPath,

    #[error("Invalid line number: {0} (lines start at 1)")]
    InvalidLine(u32),

    #[error("Store invariant violated: {0}")]
    Invariant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, MarkzError>;
