use crate::commands::{CmdMessage, CmdResult};
use crate::model::Reload;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use std::path::Path;

/// Drops every cached label so the next draw rereads file content.
pub fn run_all<B: StorageBackend>(store: &BookmarkStore<B>) -> CmdResult {
    store.invalidate_all_labels();
    let mut result = CmdResult::default();
    result.push_reload(Reload::All);
    result.add_message(CmdMessage::info(format!(
        "Refreshed {} bookmark(s) in {} file(s)",
        store.bookmark_count(),
        store.files().len()
    )));
    result
}

/// Recomputes the labels of one file's bookmarks. Untracked paths are ignored.
pub fn run_file<B: StorageBackend>(store: &BookmarkStore<B>, path: &Path) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(file) = store.get_file(path) else {
        return result;
    };

    store.invalidate_labels(path);
    result.push_reload(Reload::Items {
        nodes: file.bookmark_nodes().collect(),
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::store::mem_backend::MemBackend;
    use crate::store::InMemoryStore;

    fn make_store() -> InMemoryStore {
        let backend = MemBackend::new();
        backend.write_file("/ws/a.txt", "alpha\nbeta\n");
        let mut store = BookmarkStore::with_backend(backend, "/ws");
        store.add_bookmark(Path::new("/ws/a.txt"), 1).unwrap();
        store.add_bookmark(Path::new("/ws/a.txt"), 2).unwrap();
        store
    }

    #[test]
    fn refresh_file_rereads_labels() {
        let store = make_store();
        let path = Path::new("/ws/a.txt");
        assert_eq!(store.label(path, 2), "#2: beta");

        store.backend.write_file(path, "alpha\ngamma\n");
        let result = run_file(&store, path);

        assert_eq!(
            result.reloads,
            vec![Reload::Items {
                nodes: vec![Node::bookmark(path, 1), Node::bookmark(path, 2)]
            }]
        );
        assert_eq!(store.label(path, 2), "#2: gamma");
    }

    #[test]
    fn refresh_unknown_file_is_empty() {
        let store = make_store();
        let result = run_file(&store, Path::new("/ws/other.txt"));
        assert!(result.reloads.is_empty());
    }

    #[test]
    fn refresh_all_reloads_everything() {
        let store = make_store();
        let path = Path::new("/ws/a.txt");
        assert_eq!(store.label(path, 1), "#1: alpha");
        store.backend.write_file(path, "ALPHA\n");

        let result = run_all(&store);
        assert_eq!(result.reloads, vec![Reload::All]);
        assert_eq!(result.messages[0].content, "Refreshed 2 bookmark(s) in 1 file(s)");
        assert_eq!(store.label(path, 1), "#1: ALPHA");
    }
}
