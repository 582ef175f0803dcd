//! # Markz CLI Architecture
//!
//! markz keeps line bookmarks for a workspace, grouped by file and saved as a
//! small JSON document under `<root>/.markz/`. This binary is intentionally
//! thin: the CLI lives in `src/cli/`, while this file only invokes `cli::run()`
//! and handles process termination.
//!
//! ## Workspace Structure
//!
//! markz is organized as a Cargo workspace with two crates:
//! - `crates/markzapp/`: core library with UI-agnostic bookmark logic
//! - `crates/markz/`: this CLI, a host built on the `markzapp` API
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/markz/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering with console (render.rs, styles.rs)   │
//! │  - File watching with notify (watch.rs)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/markzapp/src/api.rs)                     │
//! │  - Parses FILE / FILE:LINE items into tree nodes            │
//! │  - Owns the store and the change notifier                   │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/markzapp/src/commands/*)             │
//! │  - Business logic over the bookmark store                   │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Editors and `watch`
//!
//! The library models editors as ids that open, settle and get destroyed.
//! `markz watch` plays that role for files on disk: a save settles the file's
//! editor and its labels are re-read, a deletion destroys it and the labels
//! freeze until the file comes back.
//!
//! ## Testing Approach
//!
//! - **Command layer**: unit tests against the in-memory backend.
//! - **API layer**: item parsing and dispatch.
//! - **CLI layer**: argument parsing and rendering unit tests, plus end-to-end
//!   runs of the binary in `tests/` against temporary workspaces.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
