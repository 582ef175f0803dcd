use crate::commands::{shown_path, CmdMessage, CmdResult};
use crate::error::{MarkzError, Result};
use crate::notifier::{ChangeNotifier, EditorId};
use crate::paths::normalize;
use crate::store::backend::StorageBackend;
use crate::store::{AddOutcome, BookmarkStore};
use std::path::Path;

/// Bookmarks `line` of the document at `path`.
///
/// `path` is `None` for documents that have no file behind them; that is
/// reported as an error message, not a failure. When `editor` is given and the
/// file has no listener yet, the file is tracked against it.
pub fn run<B: StorageBackend>(
    store: &mut BookmarkStore<B>,
    notifier: &mut ChangeNotifier,
    path: Option<&Path>,
    line: u32,
    editor: Option<EditorId>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(path) = path else {
        result.add_message(CmdMessage::error(format!(
            "Cannot add the bookmark: {}",
            no_path_reason()
        )));
        return Ok(result);
    };

    let path = normalize(path);
    let path = path.as_path();
    let outcome = store.add_bookmark(path, line);

    // Track from memory, even if the save failed.
    if let Some(editor) = editor {
        if store.get_file(path).is_some() && !notifier.is_tracked(path) {
            notifier.track(path, editor);
        }
    }

    let outcome = outcome?;
    result.push_reload(outcome.reload(path));
    let shown = shown_path(store.root(), path);
    match outcome {
        AddOutcome::CreatedFile | AddOutcome::Added => {
            result.add_message(CmdMessage::success(format!("Bookmarked {}:{}", shown, line)));
        }
        AddOutcome::Exists => {
            result.add_message(CmdMessage::info(format!(
                "Already bookmarked {}:{}",
                shown, line
            )));
        }
    }
    Ok(result)
}

fn no_path_reason() -> String {
    let reason = MarkzError::NoDocumentPath.to_string();
    let mut chars = reason.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Reload;
    use crate::store::mem_backend::MemBackend;
    use crate::store::InMemoryStore;
    use std::path::PathBuf;

    fn setup() -> (InMemoryStore, ChangeNotifier) {
        (
            BookmarkStore::with_backend(MemBackend::new(), "/ws"),
            ChangeNotifier::new(),
        )
    }

    #[test]
    fn first_add_creates_file_and_tracks_editor() {
        let (mut store, mut notifier) = setup();
        let path = PathBuf::from("/ws/a.txt");
        let result = run(&mut store, &mut notifier, Some(&path), 5, Some(EditorId(7))).unwrap();

        assert_eq!(result.reloads, vec![Reload::All]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "Bookmarked a.txt:5");
        assert_eq!(notifier.editor_for(&path), Some(EditorId(7)));
    }

    #[test]
    fn second_add_reloads_only_the_file() {
        let (mut store, mut notifier) = setup();
        let path = PathBuf::from("/ws/a.txt");
        run(&mut store, &mut notifier, Some(&path), 5, None).unwrap();
        let result = run(&mut store, &mut notifier, Some(&path), 2, None).unwrap();

        assert_eq!(result.reloads, vec![Reload::File { path: path.clone() }]);
        assert!(notifier.is_empty());
    }

    #[test]
    fn existing_listener_is_kept() {
        let (mut store, mut notifier) = setup();
        let path = PathBuf::from("/ws/a.txt");
        run(&mut store, &mut notifier, Some(&path), 1, Some(EditorId(1))).unwrap();
        run(&mut store, &mut notifier, Some(&path), 2, Some(EditorId(2))).unwrap();
        assert_eq!(notifier.editor_for(&path), Some(EditorId(1)));
    }

    #[test]
    fn duplicate_add_reports_info_without_reload() {
        let (mut store, mut notifier) = setup();
        let path = PathBuf::from("/ws/a.txt");
        run(&mut store, &mut notifier, Some(&path), 3, None).unwrap();
        let result = run(&mut store, &mut notifier, Some(&path), 3, None).unwrap();

        assert!(result.reloads.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn missing_document_path_is_a_user_message() {
        let (mut store, mut notifier) = setup();
        let result = run(&mut store, &mut notifier, None, 3, Some(EditorId(1))).unwrap();

        assert!(store.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(
            result.messages[0].content,
            "Cannot add the bookmark: the document has no path (it is remote or unsaved)"
        );
    }

    #[test]
    fn write_failure_still_tracks() {
        let (mut store, mut notifier) = setup();
        store.backend.set_simulate_write_error(true);
        let path = PathBuf::from("/ws/a.txt");

        let result = run(&mut store, &mut notifier, Some(&path), 4, Some(EditorId(3)));
        assert!(matches!(
            result,
            Err(MarkzError::PersistenceWriteFailure { .. })
        ));
        assert!(store.get_file(&path).is_some());
        assert!(notifier.is_tracked(&path));
    }
}
