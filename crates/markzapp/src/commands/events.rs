use crate::commands::{refresh, CmdResult};
use crate::notifier::{ChangeNotifier, EditorEvent};
use crate::paths::normalize;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;

/// Applies an editor lifecycle event.
///
/// - `Opened` on a bookmarked path (re)binds the file to the new editor and
///   refreshes its labels, which may have gone stale while unwatched.
/// - `Settled` refreshes every file bound to the editor.
/// - `Destroyed` releases the editor's bindings. Files stay in the store.
pub fn handle<B: StorageBackend>(
    store: &BookmarkStore<B>,
    notifier: &mut ChangeNotifier,
    event: &EditorEvent,
) -> CmdResult {
    let mut result = CmdResult::default();
    match event {
        EditorEvent::Opened { editor, path } => {
            let Some(path) = path.as_deref().map(normalize) else {
                return result;
            };
            let path = path.as_path();
            if store.get_file(path).is_some() {
                notifier.track(path, *editor);
                result.merge(refresh::run_file(store, path));
            }
        }
        EditorEvent::Settled { editor } => {
            for path in notifier.settled(*editor) {
                result.merge(refresh::run_file(store, &path));
            }
        }
        EditorEvent::Destroyed { editor } => {
            notifier.editor_destroyed(*editor);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Reload};
    use crate::notifier::EditorId;
    use crate::store::mem_backend::MemBackend;
    use crate::store::InMemoryStore;
    use std::path::{Path, PathBuf};

    fn make_store() -> InMemoryStore {
        let backend = MemBackend::new();
        backend.write_file("/ws/a.txt", "one\ntwo\n");
        let mut store = BookmarkStore::with_backend(backend, "/ws");
        store.add_bookmark(Path::new("/ws/a.txt"), 2).unwrap();
        store
    }

    fn opened(editor: u64, path: &str) -> EditorEvent {
        EditorEvent::Opened {
            editor: EditorId(editor),
            path: Some(PathBuf::from(path)),
        }
    }

    #[test]
    fn settle_refreshes_tracked_file() {
        let store = make_store();
        let mut notifier = ChangeNotifier::new();
        handle(&store, &mut notifier, &opened(1, "/ws/a.txt"));
        assert_eq!(store.label(Path::new("/ws/a.txt"), 2), "#2: two");

        store.backend.write_file("/ws/a.txt", "one\nTWO\n");
        let result = handle(
            &store,
            &mut notifier,
            &EditorEvent::Settled {
                editor: EditorId(1),
            },
        );
        assert_eq!(
            result.reloads,
            vec![Reload::Items {
                nodes: vec![Node::bookmark("/ws/a.txt", 2)]
            }]
        );
        assert_eq!(store.label(Path::new("/ws/a.txt"), 2), "#2: TWO");
    }

    #[test]
    fn labels_freeze_after_destroy_until_reopen() {
        let store = make_store();
        let mut notifier = ChangeNotifier::new();
        handle(&store, &mut notifier, &opened(1, "/ws/a.txt"));
        assert_eq!(store.label(Path::new("/ws/a.txt"), 2), "#2: two");

        handle(
            &store,
            &mut notifier,
            &EditorEvent::Destroyed {
                editor: EditorId(1),
            },
        );
        assert!(store.get_file(Path::new("/ws/a.txt")).is_some());
        assert!(notifier.is_empty());

        store.backend.write_file("/ws/a.txt", "one\nchanged\n");
        let result = handle(
            &store,
            &mut notifier,
            &EditorEvent::Settled {
                editor: EditorId(1),
            },
        );
        assert!(result.reloads.is_empty());
        assert_eq!(store.label(Path::new("/ws/a.txt"), 2), "#2: two");

        handle(&store, &mut notifier, &opened(2, "/ws/a.txt"));
        assert_eq!(notifier.editor_for(Path::new("/ws/a.txt")), Some(EditorId(2)));
        assert_eq!(store.label(Path::new("/ws/a.txt"), 2), "#2: changed");
    }

    #[test]
    fn opening_unrelated_or_pathless_documents_does_nothing() {
        let store = make_store();
        let mut notifier = ChangeNotifier::new();
        handle(&store, &mut notifier, &opened(1, "/ws/b.txt"));
        handle(
            &store,
            &mut notifier,
            &EditorEvent::Opened {
                editor: EditorId(2),
                path: None,
            },
        );
        assert!(notifier.is_empty());
    }
}
