//! # Workspace Discovery
//!
//! Bookmarks belong to a workspace: a root directory whose relative paths are
//! what gets persisted. This module finds that root and builds the session
//! context ([`MarkzContext`]) around it.
//!
//! ## Root Detection Algorithm
//!
//! [`find_workspace_root`]:
//!
//! 1. Start at `CWD`.
//! 2. Check: does this directory hold `.git` or a `.markz` settings directory?
//! 3. **Match**: this is the workspace root.
//! 4. **No Match**: move to the parent directory.
//! 5. **Stop**: at `HOME` or the filesystem root, return `None`.
//!
//! The innermost match wins, so a nested repository is its own workspace.
//!
//! ## Resolution Order
//!
//! [`resolve_root`] picks, in order:
//! 1. An explicit override (`--root`), relative to `CWD` if needed.
//! 2. The `MARKZ_ROOT` environment variable.
//! 3. [`find_workspace_root`].
//! 4. `CWD` itself.
//!
//! ## Session Lifetime
//!
//! [`initialize`] loads configuration, then the store, and hands both to a
//! fresh [`MarkzApi`]. Dropping the context ends the session; the store is
//! already saved after every mutation, so nothing is flushed on drop.

use crate::api::MarkzApi;
use crate::config::MarkzConfig;
use crate::error::Result;
use crate::paths::absolutize;
use crate::store::fs_backend::{FsBackend, DEFAULT_SETTINGS_DIR};
use crate::store::{BookmarkStore, FileStore};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "MARKZ_ROOT";

pub struct MarkzContext {
    pub api: MarkzApi<FsBackend>,
    pub root: PathBuf,
    pub config: MarkzConfig,
}

/// Walks up from `cwd` to the nearest directory holding `.git` or `.markz`.
/// Returns None if nothing matches before reaching home or root.
pub fn find_workspace_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(".git").exists() || current.join(DEFAULT_SETTINGS_DIR).is_dir() {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Picks the workspace root for a session started in `cwd`.
pub fn resolve_root(cwd: &Path, root_override: Option<&Path>) -> PathBuf {
    if let Some(root) = root_override {
        return absolutize(root, cwd);
    }
    if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
        return absolutize(Path::new(&root), cwd);
    }
    find_workspace_root(cwd).unwrap_or_else(|| absolutize(cwd, cwd))
}

/// Builds the session context: root, configuration, then the loaded store.
pub fn initialize(cwd: &Path, root_override: Option<&Path>) -> Result<MarkzContext> {
    let root = resolve_root(cwd, root_override);
    let config = MarkzConfig::load(&root)?;
    tracing::debug!(root = %root.display(), ?config, "initializing workspace");

    let backend = FsBackend::new(&root).with_location(&config.settings_dir, &config.namespace);
    let store: FileStore = BookmarkStore::load(backend, &root)
        .with_unavailable_label(config.unavailable_label.clone());
    let api = MarkzApi::new(store);

    Ok(MarkzContext { api, root, config })
}
