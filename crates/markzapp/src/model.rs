use crate::paths::normalize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A marked line inside a tracked file.
///
/// A bookmark has no identity beyond its owning file and line number; the label
/// shown in the tree is derived from the file content and never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bookmark {
    pub line_number: u32,
}

impl Bookmark {
    pub fn new(line_number: u32) -> Self {
        Self { line_number }
    }
}

/// The grouping node for all bookmarks of one file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Strictly ascending by line number.
    pub bookmarks: Vec<Bookmark>,
    /// UI-only expansion state, never persisted.
    pub collapsed: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bookmarks: Vec::new(),
            collapsed: false,
        }
    }

    pub fn has_line(&self, line: u32) -> bool {
        self.bookmarks
            .binary_search_by_key(&line, |b| b.line_number)
            .is_ok()
    }

    /// Inserts keeping ascending order. Returns false if the line was present.
    pub fn insert_line(&mut self, line: u32) -> bool {
        match self
            .bookmarks
            .binary_search_by_key(&line, |b| b.line_number)
        {
            Ok(_) => false,
            Err(pos) => {
                self.bookmarks.insert(pos, Bookmark::new(line));
                true
            }
        }
    }

    /// Returns true if the line was present.
    pub fn remove_line(&mut self, line: u32) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.line_number != line);
        self.bookmarks.len() != before
    }

    /// Restores the ordering invariant after a bulk load.
    pub fn sort_and_dedup(&mut self) {
        self.bookmarks.sort();
        self.bookmarks.dedup();
    }

    pub fn lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.bookmarks.iter().map(|b| b.line_number)
    }

    pub fn node(&self) -> Node {
        Node::file(&self.path)
    }

    pub fn bookmark_nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.lines().map(|line| Node::bookmark(&self.path, line))
    }
}

/// A handle to an element of the bookmark tree.
///
/// Nodes refer to store contents by key (path, and line for bookmarks) rather
/// than by reference, so a stale selection is simply a node the store no longer
/// knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    File { path: PathBuf },
    Bookmark { path: PathBuf, line: u32 },
}

impl Node {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Node::File {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn bookmark(path: impl AsRef<Path>, line: u32) -> Self {
        Node::Bookmark {
            path: path.as_ref().to_path_buf(),
            line,
        }
    }

    /// The file this node belongs to (itself for file nodes).
    pub fn path(&self) -> &Path {
        match self {
            Node::File { path } | Node::Bookmark { path, .. } => path,
        }
    }

    /// The same node with `.` and `..` folded out of its path.
    pub fn normalized(&self) -> Node {
        match self {
            Node::File { path } => Node::File {
                path: normalize(path),
            },
            Node::Bookmark { path, line } => Node::Bookmark {
                path: normalize(path),
                line: *line,
            },
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            Node::File { .. } => None,
            Node::Bookmark { line, .. } => Some(*line),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::File { path } => write!(f, "{}", path.display()),
            Node::Bookmark { path, line } => write!(f, "{}:{}", path.display(), line),
        }
    }
}

/// What part of the tree a host UI should redraw after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum Reload {
    /// Nothing changed.
    None,
    /// The set of files changed; redraw everything.
    All,
    /// Only the subtree rooted at this file changed.
    File { path: PathBuf },
    /// Individual items whose labels were recomputed.
    Items { nodes: Vec<Node> },
}
