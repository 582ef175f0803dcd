//! # Markz Architecture
//!
//! Markz keeps line bookmarks, grouped by file, for a workspace. It is a
//! **UI-agnostic library**: the tree a user sees, the commands they run and the
//! editor events that keep labels fresh all go through plain Rust calls that
//! return plain Rust data. The `markz` binary is one host; an editor plugin
//! would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (markz CLI, watcher, editor plugin)                   │
//! │  - Draws the tree, navigates, owns stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ commands + EditorEvents
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Session context: owns the store and the notifier         │
//! │  - Parses `file:line` items into tree nodes                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult with Reload requests   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BookmarkStore aggregate + JSON codec                     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tree Model
//!
//! The tree is two levels deep: files, then bookmarks. Both are addressed by a
//! [`model::Node`], which names its target by key (path, and line for
//! bookmarks). A bookmark reaches its file through that key, never through a
//! pointer, so a stale node is simply one the store doesn't know about.
//!
//! ## Key Principle: No Terminal I/O in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. It logs through `tracing`; the host decides where that goes.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and session context
//! - [`commands`]: Business logic for each command
//! - [`store`]: The bookmark store, its codec and storage backends
//! - [`tree`]: Children/parent/display queries for host UIs
//! - [`notifier`]: Which editor watches which file
//! - [`model`]: Core data types (`FileEntry`, `Bookmark`, `Node`, `Reload`)
//! - [`paths`]: Workspace-relative path mapping
//! - [`lines`]: Line lookups behind bookmark labels
//! - [`config`]: Configuration management
//! - [`init`]: Workspace discovery and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod lines;
pub mod model;
pub mod notifier;
pub mod paths;
pub mod store;
pub mod tree;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
