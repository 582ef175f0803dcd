//! # Change Notifier
//!
//! Tracks which editor is watching each bookmarked file, so that a settle event
//! on that editor refreshes the file's labels.
//!
//! Registrations are plain data in a map keyed by path. There are exactly two
//! ways a registration ends:
//!
//! - the file leaves the store ([`ChangeNotifier::untrack`]);
//! - the editor holding it is destroyed ([`ChangeNotifier::editor_destroyed`]).
//!
//! A destroyed editor leaves its files in the store with no listener. Their
//! labels stay frozen until the file is opened again (which re-registers it),
//! refreshed explicitly, or mutated.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque handle for an editor instance, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EditorId(pub u64);

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor#{}", self.0)
    }
}

/// Events a host delivers as editors come and go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// An editor was opened, possibly on a document without a path.
    Opened {
        editor: EditorId,
        path: Option<PathBuf>,
    },
    /// Editing paused or the document was saved.
    Settled { editor: EditorId },
    Destroyed { editor: EditorId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub editor: EditorId,
}

#[derive(Debug, Default)]
pub struct ChangeNotifier {
    listeners: HashMap<PathBuf, Listener>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `path` to `editor`, replacing any previous binding for `path`.
    pub fn track(&mut self, path: &Path, editor: EditorId) -> Option<Listener> {
        tracing::debug!(path = %path.display(), %editor, "tracking file");
        self.listeners
            .insert(path.to_path_buf(), Listener { editor })
    }

    pub fn untrack(&mut self, path: &Path) -> Option<Listener> {
        let released = self.listeners.remove(path);
        if let Some(listener) = released {
            tracing::debug!(path = %path.display(), editor = %listener.editor, "untracked file");
        }
        released
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.listeners.contains_key(path)
    }

    pub fn editor_for(&self, path: &Path) -> Option<EditorId> {
        self.listeners.get(path).map(|l| l.editor)
    }

    /// Paths bound to `editor`, sorted.
    pub fn settled(&self, editor: EditorId) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .listeners
            .iter()
            .filter(|(_, l)| l.editor == editor)
            .map(|(p, _)| p.clone())
            .collect();
        paths.sort();
        paths
    }

    /// Releases every registration held by `editor` and returns their paths.
    /// Registrations since rebound to another editor are left alone.
    pub fn editor_destroyed(&mut self, editor: EditorId) -> Vec<PathBuf> {
        let released = self.settled(editor);
        for path in &released {
            self.listeners.remove(path);
        }
        if !released.is_empty() {
            tracing::debug!(%editor, count = released.len(), "editor destroyed; listeners released");
        }
        released
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
