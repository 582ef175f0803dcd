use crate::commands::{shown_path, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Node, Reload};
use crate::notifier::ChangeNotifier;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;

/// Removes each selected node. Files that leave the store, directly or because
/// their last bookmark went, are untracked.
pub fn run<B: StorageBackend>(
    store: &mut BookmarkStore<B>,
    notifier: &mut ChangeNotifier,
    nodes: &[Node],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for node in nodes {
        let node = &node.normalized();
        let removal = store.remove(node);
        if store.get_file(node.path()).is_none() {
            notifier.untrack(node.path());
        }
        let removal = removal?;

        let shown = shown_path(store.root(), node.path());
        if removal.reload == Reload::None {
            result.add_message(CmdMessage::warning(format!(
                "Not bookmarked: {}",
                describe(node, &shown)
            )));
            continue;
        }
        result.push_reload(removal.reload);
        result.add_message(CmdMessage::success(format!(
            "Removed {}",
            describe(node, &shown)
        )));
        if let (Node::Bookmark { .. }, Some(_)) = (node, removal.removed_file) {
            result.add_message(CmdMessage::info(format!("{} has no bookmarks left", shown)));
        }
    }

    Ok(result)
}

fn describe(node: &Node, shown: &str) -> String {
    match node.line() {
        Some(line) => format!("{}:{}", shown, line),
        None => shown.to_string(),
    }
}
