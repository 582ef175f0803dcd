use crate::commands::{shown_path, CmdMessage, CmdResult, OpenTarget};
use crate::model::Node;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;

/// Resolves a bookmark to the location a host should navigate to.
/// File nodes resolve to nothing; activating them only toggles expansion.
pub fn open<B: StorageBackend>(store: &BookmarkStore<B>, node: &Node) -> CmdResult {
    let mut result = CmdResult::default();
    if !store.contains(node) {
        result.add_message(not_found(store, node));
        return result;
    }
    if let Node::Bookmark { path, line } = node {
        result.open_target = Some(OpenTarget {
            path: path.clone(),
            line: *line,
        });
    }
    result
}

/// Resolves the absolute path of the file behind `node`, for showing it in
/// the system file manager.
pub fn reveal<B: StorageBackend>(store: &BookmarkStore<B>, node: &Node) -> CmdResult {
    let mut result = CmdResult::default();
    if !store.contains(node) {
        result.add_message(not_found(store, node));
        return result;
    }
    result.revealed = Some(node.path().to_path_buf());
    result
}

fn not_found<B: StorageBackend>(store: &BookmarkStore<B>, node: &Node) -> CmdMessage {
    let shown = shown_path(store.root(), node.path());
    match node.line() {
        Some(line) => CmdMessage::warning(format!("Not bookmarked: {}:{}", shown, line)),
        None => CmdMessage::warning(format!("Not bookmarked: {}", shown)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::InMemoryStore;
    use std::path::{Path, PathBuf};

    fn make_store() -> InMemoryStore {
        let mut store = BookmarkStore::with_backend(MemBackend::new(), "/ws");
        store.add_bookmark(Path::new("/ws/a.txt"), 3).unwrap();
        store
    }

    #[test]
    fn open_bookmark_yields_target() {
        let store = make_store();
        let result = open(&store, &Node::bookmark("/ws/a.txt", 3));
        assert_eq!(
            result.open_target,
            Some(OpenTarget {
                path: PathBuf::from("/ws/a.txt"),
                line: 3
            })
        );
    }

    #[test]
    fn open_file_node_yields_nothing() {
        let store = make_store();
        let result = open(&store, &Node::file("/ws/a.txt"));
        assert!(result.open_target.is_none());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn open_stale_bookmark_warns() {
        let store = make_store();
        let result = open(&store, &Node::bookmark("/ws/a.txt", 4));
        assert!(result.open_target.is_none());
        assert_eq!(result.messages[0].content, "Not bookmarked: a.txt:4");
    }

    #[test]
    fn reveal_returns_absolute_path() {
        let store = make_store();
        let result = reveal(&store, &Node::bookmark("/ws/a.txt", 3));
        assert_eq!(result.revealed, Some(PathBuf::from("/ws/a.txt")));
        let result = reveal(&store, &Node::file("/ws/a.txt"));
        assert_eq!(result.revealed, Some(PathBuf::from("/ws/a.txt")));
    }
}
