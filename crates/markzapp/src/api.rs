//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all markz operations, whatever host is driving it (the CLI,
//! the file watcher, an editor plugin).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the session state**: the [`BookmarkStore`] and the
//!   [`ChangeNotifier`] live here and nowhere else
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g. parsing `file:line` items into [`Node`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//!
//! ## Item Grammar
//!
//! Hosts without a tree selection (the CLI) name items as text:
//!
//! - `path/to/file`: the file node
//! - `path/to/file:N`: the bookmark at line `N` (1-based)
//!
//! Relative paths resolve against a caller-supplied base directory.
//!
//! ## Event Loop
//!
//! Every method takes `&self` or `&mut self`, so events are applied one at a
//! time. A method returns only after the store has been saved.
//!
//! ## Generic Over StorageBackend
//!
//! `MarkzApi<B: StorageBackend>` runs on disk in production (`FsBackend`) and
//! in memory for tests (`MemBackend`).

use crate::commands::{self, CmdResult};
use crate::error::{MarkzError, Result};
use crate::lines::line_at_offset;
use crate::model::Node;
use crate::notifier::{ChangeNotifier, EditorEvent, EditorId};
use crate::paths::absolutize;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use crate::tree::DisplayItem;
use std::path::{Path, PathBuf};

/// The application context for one workspace session.
pub struct MarkzApi<B: StorageBackend> {
    store: BookmarkStore<B>,
    notifier: ChangeNotifier,
}

impl<B: StorageBackend> MarkzApi<B> {
    pub fn new(store: BookmarkStore<B>) -> Self {
        Self {
            store,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn add_bookmark(
        &mut self,
        path: Option<&Path>,
        line: u32,
        editor: Option<EditorId>,
    ) -> Result<CmdResult> {
        commands::add::run(&mut self.store, &mut self.notifier, path, line, editor)
    }

    /// Bookmarks the line holding the cursor at character `offset` of `text`.
    pub fn add_bookmark_at_offset(
        &mut self,
        path: Option<&Path>,
        text: &str,
        offset: usize,
        editor: Option<EditorId>,
    ) -> Result<CmdResult> {
        let line = line_at_offset(text, offset);
        self.add_bookmark(path, line, editor)
    }

    pub fn remove(&mut self, nodes: &[Node]) -> Result<CmdResult> {
        commands::remove::run(&mut self.store, &mut self.notifier, nodes)
    }

    pub fn remove_items<I: AsRef<str>>(&mut self, items: &[I], base: &Path) -> Result<CmdResult> {
        let nodes = parse_items(items, base)?;
        self.remove(&nodes)
    }

    pub fn refresh_all(&self) -> Result<CmdResult> {
        Ok(commands::refresh::run_all(&self.store))
    }

    pub fn refresh_file(&self, path: &Path) -> Result<CmdResult> {
        Ok(commands::refresh::run_file(&self.store, path))
    }

    pub fn open(&self, node: &Node) -> Result<CmdResult> {
        Ok(commands::open::open(&self.store, node))
    }

    pub fn reveal(&self, node: &Node) -> Result<CmdResult> {
        Ok(commands::open::reveal(&self.store, node))
    }

    pub fn list(&self) -> Result<CmdResult> {
        Ok(commands::list::run(&self.store))
    }

    pub fn set_collapsed(&mut self, path: &Path, collapsed: bool) -> Result<CmdResult> {
        Ok(commands::collapse::run(&mut self.store, path, collapsed))
    }

    pub fn handle_event(&mut self, event: &EditorEvent) -> Result<CmdResult> {
        Ok(commands::events::handle(
            &self.store,
            &mut self.notifier,
            event,
        ))
    }

    pub fn children(&self, node: Option<&Node>) -> Vec<Node> {
        self.store.get_children(node)
    }

    pub fn parent(&self, node: &Node) -> Option<Node> {
        self.store.get_parent(node)
    }

    pub fn display_item(&self, node: &Node) -> Option<DisplayItem> {
        self.store.display_item(node)
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn document_path(&self) -> PathBuf {
        self.store.backend().document_path()
    }

    pub fn store(&self) -> &BookmarkStore<B> {
        &self.store
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

/// Parses `file` or `file:N` into a node, resolving `file` against `base`.
pub fn parse_item(input: &str, base: &Path) -> Result<Node> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MarkzError::Api("Empty item".to_string()));
    }

    if let Some((file, line)) = input.rsplit_once(':') {
        if let Ok(line) = line.parse::<u32>() {
            if line == 0 {
                return Err(MarkzError::InvalidLine(line));
            }
            if file.is_empty() {
                return Err(MarkzError::Api(format!("Missing file in '{}'", input)));
            }
            return Ok(Node::bookmark(absolutize(Path::new(file), base), line));
        }
    }
    Ok(Node::file(absolutize(Path::new(input), base)))
}

/// Parses every item, dropping repeats while keeping order.
pub fn parse_items<I: AsRef<str>>(items: &[I], base: &Path) -> Result<Vec<Node>> {
    let mut nodes: Vec<Node> = Vec::with_capacity(items.len());
    for item in items {
        let node = parse_item(item.as_ref(), base)?;
        if !nodes.contains(&node) {
            nodes.push(node);
        }
    }
    Ok(nodes)
}
