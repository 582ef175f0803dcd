//! `markz watch`: a filesystem-backed host for editor events.
//!
//! Each bookmarked file is treated as if an editor had it open, with its own
//! [`EditorId`]. File system events are mapped onto editor events:
//!
//! - modified (or replaced through a rename) becomes `Settled`
//! - removed (or renamed away) becomes `Destroyed`; the bookmarks stay, their
//!   labels freeze
//! - created again becomes `Opened` under a fresh id, which re-tracks the file
//!
//! Parent directories are watched rather than the files themselves, so files
//! that editors save by writing a temp file and renaming it keep being seen.
//! Bursts of events are folded into one batch before being applied.

use super::render::{render_file, render_messages, terminal_width};
use anyhow::{Context, Result};
use markzapp::api::MarkzApi;
use markzapp::notifier::{EditorEvent, EditorId};
use markzapp::store::backend::StorageBackend;
use notify::event::{EventKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

const SETTLE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    Modified,
    Removed,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub change: FileChange,
}

pub fn run<B: StorageBackend>(api: &mut MarkzApi<B>) -> Result<()> {
    let paths: Vec<PathBuf> = api.store().files().iter().map(|f| f.path.clone()).collect();
    if paths.is_empty() {
        println!("No bookmarks to watch.");
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| match res {
            Ok(event) => {
                for mapped in map_event(event) {
                    let _ = tx.send(mapped);
                }
            }
            Err(e) => tracing::warn!(error = %e, "watch error"),
        },
        Config::default(),
    )
    .context("could not start file watcher")?;

    let mut session = WatchSession::default();
    let dirs: BTreeSet<&Path> = paths.iter().filter_map(|p| p.parent()).collect();
    for dir in dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot watch directory");
        }
    }
    for path in &paths {
        let event = session.open(path);
        api.handle_event(&event)?;
    }

    println!(
        "Watching {} file(s) under {}. Press Ctrl-C to stop.",
        api.notifier().len(),
        api.root().display()
    );

    while let Some(batch) = next_batch(&rx) {
        for file_event in batch {
            let Some(event) = session.translate(&file_event) else {
                continue;
            };
            tracing::debug!(?event, path = %file_event.path.display(), "editor event");
            let result = api.handle_event(&event)?;
            print!("{}", render_messages(&result.messages));

            match file_event.change {
                FileChange::Removed => {
                    println!("{} was removed; labels frozen", file_event.path.display());
                }
                FileChange::Modified | FileChange::Created => {
                    let listing = api.list()?;
                    if let Some(file) = listing
                        .listed_files
                        .iter()
                        .find(|f| f.path == file_event.path)
                    {
                        print!("{}", render_file(file, terminal_width()));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Blocks for one event, then gathers whatever follows within the settle
/// delay. Duplicates are dropped, order kept. `None` once the watcher is gone.
fn next_batch(rx: &Receiver<FileEvent>) -> Option<Vec<FileEvent>> {
    let first = rx.recv().ok()?;
    let mut batch = vec![first];
    loop {
        match rx.recv_timeout(SETTLE_DELAY) {
            Ok(event) => {
                if !batch.contains(&event) {
                    batch.push(event);
                }
            }
            Err(RecvTimeoutError::Timeout) => return Some(batch),
            Err(RecvTimeoutError::Disconnected) => return Some(batch),
        }
    }
}

/// Editor ids handed out to watched files. Paths whose file went away are
/// remembered so that a file coming back is opened again.
#[derive(Debug, Default)]
struct WatchSession {
    editors: HashMap<PathBuf, EditorId>,
    closed: HashSet<PathBuf>,
    next_id: u64,
}

impl WatchSession {
    fn open(&mut self, path: &Path) -> EditorEvent {
        self.next_id += 1;
        let editor = EditorId(self.next_id);
        self.closed.remove(path);
        self.editors.insert(path.to_path_buf(), editor);
        EditorEvent::Opened {
            editor,
            path: Some(path.to_path_buf()),
        }
    }

    /// Events for paths that were never bookmarked are ignored.
    fn translate(&mut self, event: &FileEvent) -> Option<EditorEvent> {
        match event.change {
            FileChange::Removed => {
                let editor = self.editors.remove(&event.path)?;
                self.closed.insert(event.path.clone());
                Some(EditorEvent::Destroyed { editor })
            }
            FileChange::Modified | FileChange::Created => {
                if let Some(editor) = self.editors.get(&event.path) {
                    return Some(EditorEvent::Settled { editor: *editor });
                }
                if self.closed.contains(&event.path) {
                    return Some(self.open(&event.path));
                }
                None
            }
        }
    }
}

fn map_event(event: notify::Event) -> Vec<FileEvent> {
    let change = match event.kind {
        EventKind::Modify(ModifyKind::Name(mode)) => return map_rename(mode, event.paths),
        EventKind::Modify(_) => FileChange::Modified,
        EventKind::Create(_) => FileChange::Created,
        EventKind::Remove(RemoveKind::File) | EventKind::Remove(RemoveKind::Any) => {
            FileChange::Removed
        }
        _ => return Vec::new(),
    };
    event
        .paths
        .into_iter()
        .map(|path| FileEvent { path, change })
        .collect()
}

/// A rename takes content away from its source and puts new content at its
/// target. When the backend cannot tell which side a path is on, the file
/// system is asked.
fn map_rename(mode: RenameMode, paths: Vec<PathBuf>) -> Vec<FileEvent> {
    let changes: Vec<FileChange> = match mode {
        RenameMode::From => vec![FileChange::Removed; paths.len()],
        RenameMode::To => vec![FileChange::Modified; paths.len()],
        RenameMode::Both if paths.len() == 2 => vec![FileChange::Removed, FileChange::Modified],
        _ => paths
            .iter()
            .map(|path| {
                if path.exists() {
                    FileChange::Modified
                } else {
                    FileChange::Removed
                }
            })
            .collect(),
    };
    paths
        .into_iter()
        .zip(changes)
        .map(|(path, change)| FileEvent { path, change })
        .collect()
}
