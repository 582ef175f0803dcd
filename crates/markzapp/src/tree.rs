//! Tree protocol for host UIs.
//!
//! Roots are file nodes, their children are bookmark nodes, bookmarks are
//! leaves. Answers come straight from the store; only labels touch file
//! content, and those are cached.

use crate::model::Node;
use crate::paths::display_name;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use serde::Serialize;
use std::path::PathBuf;

pub const BOOKMARK_ICON: &str = "__symbol.bookmark";
pub const OPEN_COMMAND: &str = "bookmarks.doubleClick";
pub const FILE_CONTEXT: &str = "file";
pub const BOOKMARK_CONTEXT: &str = "bookmark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expansion {
    Expanded,
    Collapsed,
}

/// How a node should be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub label: String,
    /// `None` for leaves.
    pub expansion: Option<Expansion>,
    pub icon: Option<&'static str>,
    /// Command the host runs when the item is activated.
    pub command: Option<&'static str>,
    pub context: &'static str,
    pub path: PathBuf,
}

impl<B: StorageBackend> BookmarkStore<B> {
    pub fn get_children(&self, node: Option<&Node>) -> Vec<Node> {
        match node {
            None => self.files().iter().map(|f| f.node()).collect(),
            Some(Node::File { path }) => self
                .get_file(path)
                .map(|f| f.bookmark_nodes().collect())
                .unwrap_or_default(),
            Some(Node::Bookmark { .. }) => Vec::new(),
        }
    }

    pub fn get_parent(&self, node: &Node) -> Option<Node> {
        match node {
            Node::File { .. } => None,
            Node::Bookmark { path, .. } => self.get_file(path).map(|f| f.node()),
        }
    }

    /// Returns `None` when the store no longer holds `node`.
    pub fn display_item(&self, node: &Node) -> Option<DisplayItem> {
        match node {
            Node::File { path } => {
                let file = self.get_file(path)?;
                Some(DisplayItem {
                    label: display_name(&file.path),
                    expansion: Some(if file.collapsed {
                        Expansion::Collapsed
                    } else {
                        Expansion::Expanded
                    }),
                    icon: None,
                    command: None,
                    context: FILE_CONTEXT,
                    path: file.path.clone(),
                })
            }
            Node::Bookmark { path, line } => {
                if !self.contains(node) {
                    return None;
                }
                Some(DisplayItem {
                    label: self.label(path, *line),
                    expansion: None,
                    icon: Some(BOOKMARK_ICON),
                    command: Some(OPEN_COMMAND),
                    context: BOOKMARK_CONTEXT,
                    path: path.clone(),
                })
            }
        }
    }
}
