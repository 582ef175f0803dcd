use crate::commands::{shown_path, CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use std::path::Path;

/// Records the expansion state of a file node. Not persisted.
pub fn run<B: StorageBackend>(
    store: &mut BookmarkStore<B>,
    path: &Path,
    collapsed: bool,
) -> CmdResult {
    let mut result = CmdResult::default();
    if !store.set_collapsed(path, collapsed) {
        result.add_message(CmdMessage::warning(format!(
            "Not bookmarked: {}",
            shown_path(store.root(), path)
        )));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn collapse_and_expand_round() {
        let mut store = BookmarkStore::with_backend(MemBackend::new(), "/ws");
        let path = Path::new("/ws/a.txt");
        store.add_bookmark(path, 1).unwrap();
        let saves = store.backend.save_count();

        run(&mut store, path, true);
        assert!(store.get_file(path).unwrap().collapsed);
        run(&mut store, path, false);
        assert!(!store.get_file(path).unwrap().collapsed);
        assert_eq!(store.backend.save_count(), saves);
    }

    #[test]
    fn unknown_file_warns() {
        let mut store = BookmarkStore::with_backend(MemBackend::new(), "/ws");
        let result = run(&mut store, Path::new("/ws/a.txt"), true);
        assert_eq!(result.messages.len(), 1);
    }
}
