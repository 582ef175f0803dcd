//! # Command Layer
//!
//! This module contains the **core business logic** of markz. Each command lives in
//! its own submodule as plain functions over a [`BookmarkStore`] (and, where editor
//! state matters, the [`ChangeNotifier`](crate::notifier::ChangeNotifier)).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Mutate or query the store
//! - Keep listener registrations in step with the store
//! - Return a structured [`CmdResult`]: reload requests, messages, listings
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Navigation**: `open` returns an [`OpenTarget`]; the host moves the cursor
//!
//! ## Reloads
//!
//! Every mutation reports which part of the tree a host should redraw, as
//! [`Reload`] values in [`CmdResult::reloads`]. [`CmdResult::push_reload`]
//! folds them so a `Reload::All` swallows everything else.
//!
//! ## Errors
//!
//! A failed save returns `Err(PersistenceWriteFailure)` after the in-memory
//! change (and its listener bookkeeping) has been applied. Hosts should redraw
//! the whole tree after any error.
//!
//! ## Testing Strategy
//!
//! Command tests use [`InMemoryStore`](crate::store::InMemoryStore) with a
//! `MemBackend`, so file content and write failures are simulated in memory.
//!
//! ## Command Modules
//!
//! - [`add`]: Bookmark a line
//! - [`remove`]: Remove bookmarks or whole files
//! - [`refresh`]: Recompute labels
//! - [`open`]: Resolve navigation and reveal targets
//! - [`list`]: Flatten the tree for display
//! - [`collapse`]: Expand/collapse file nodes
//! - [`events`]: Editor lifecycle events

use crate::model::Reload;
use crate::paths::relative_path;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[cfg(doc)]
use crate::store::BookmarkStore;

pub mod add;
pub mod collapse;
pub mod events;
pub mod list;
pub mod open;
pub mod refresh;
pub mod remove;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A bookmark as listed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedBookmark {
    pub line: u32,
    pub label: String,
}

/// A file with its bookmarks, as listed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedFile {
    pub path: PathBuf,
    /// `None` when the file lives outside the workspace.
    pub relative_path: Option<String>,
    pub collapsed: bool,
    pub bookmarks: Vec<ListedBookmark>,
}

/// Where a host should navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenTarget {
    pub path: PathBuf,
    pub line: u32,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub reloads: Vec<Reload>,
    pub messages: Vec<CmdMessage>,
    pub listed_files: Vec<ListedFile>,
    pub open_target: Option<OpenTarget>,
    pub revealed: Option<PathBuf>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn push_reload(&mut self, reload: Reload) {
        match reload {
            Reload::None => {}
            Reload::All => self.reloads = vec![Reload::All],
            other => {
                if !self.reloads.contains(&Reload::All) && !self.reloads.contains(&other) {
                    self.reloads.push(other);
                }
            }
        }
    }

    pub fn with_listed_files(mut self, files: Vec<ListedFile>) -> Self {
        self.listed_files = files;
        self
    }

    pub fn merge(&mut self, other: CmdResult) {
        for reload in other.reloads {
            self.push_reload(reload);
        }
        self.messages.extend(other.messages);
        self.listed_files.extend(other.listed_files);
        if other.open_target.is_some() {
            self.open_target = other.open_target;
        }
        if other.revealed.is_some() {
            self.revealed = other.revealed;
        }
    }
}

/// Workspace-relative form of `path` for messages, or the full path.
pub(crate) fn shown_path(root: &Path, path: &Path) -> String {
    relative_path(path, root).unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_all_swallows_narrower_reloads() {
        let mut result = CmdResult::default();
        result.push_reload(Reload::File {
            path: PathBuf::from("/ws/a.txt"),
        });
        result.push_reload(Reload::File {
            path: PathBuf::from("/ws/a.txt"),
        });
        assert_eq!(result.reloads.len(), 1);

        result.push_reload(Reload::All);
        result.push_reload(Reload::File {
            path: PathBuf::from("/ws/b.txt"),
        });
        result.push_reload(Reload::None);
        assert_eq!(result.reloads, vec![Reload::All]);
    }

    #[test]
    fn shown_path_prefers_relative() {
        let root = Path::new("/ws");
        assert_eq!(shown_path(root, Path::new("/ws/src/a.rs")), "src/a.rs");
        assert_eq!(shown_path(root, Path::new("/tmp/x")), "/tmp/x");
    }
}
