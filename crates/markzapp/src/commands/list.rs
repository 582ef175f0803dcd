use crate::commands::{CmdResult, ListedBookmark, ListedFile};
use crate::paths::relative_path;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;

/// Every file in store order, each with its labelled bookmarks.
pub fn run<B: StorageBackend>(store: &BookmarkStore<B>) -> CmdResult {
    let files = store
        .files()
        .iter()
        .map(|file| ListedFile {
            path: file.path.clone(),
            relative_path: relative_path(&file.path, store.root()),
            collapsed: file.collapsed,
            bookmarks: file
                .lines()
                .map(|line| ListedBookmark {
                    line,
                    label: store.label(&file.path, line),
                })
                .collect(),
        })
        .collect();

    CmdResult::default().with_listed_files(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::path::Path;

    #[test]
    fn lists_files_with_labels() {
        let backend = MemBackend::new();
        backend.write_file("/ws/src/lib.rs", "mod a;\nmod b;\n");
        let mut store = BookmarkStore::with_backend(backend, "/ws");
        store.add_bookmark(Path::new("/ws/src/lib.rs"), 2).unwrap();
        store.add_bookmark(Path::new("/ws/gone.txt"), 7).unwrap();
        store.add_bookmark(Path::new("/outside/x.txt"), 1).unwrap();

        let result = run(&store);
        let files = &result.listed_files;
        assert_eq!(files.len(), 3);

        assert_eq!(files[0].relative_path, None);
        assert_eq!(files[1].relative_path.as_deref(), Some("gone.txt"));
        assert_eq!(files[1].bookmarks[0].label, "#7: (unavailable)");
        assert_eq!(files[2].relative_path.as_deref(), Some("src/lib.rs"));
        assert_eq!(
            files[2].bookmarks,
            vec![ListedBookmark {
                line: 2,
                label: "#2: mod b;".to_string()
            }]
        );
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = BookmarkStore::with_backend(MemBackend::new(), "/ws");
        assert!(run(&store).listed_files.is_empty());
    }
}
