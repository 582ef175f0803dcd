//! # CLI Layer
//!
//! This module is **one possible host** for markz, not the application itself.
//! The library in `markzapp` knows nothing of terminals or processes; this
//! layer is the only place that:
//! - Parses arguments
//! - Sets up logging
//! - Writes to stdout and stderr
//! - Turns failures into exit codes (via `main`)
//!
//! ## Flow
//!
//! 1. Parse the command line ([`Cli`]).
//! 2. Start `tracing`, filtered by `MARKZ_LOG` or the `-v` flag.
//! 3. Find the workspace and load the store ([`initialize`]).
//! 4. Dispatch to a handler, which calls the API and prints the rendered
//!    [`CmdResult`](markzapp::commands::CmdResult).
//!
//! A naked `markz` lists bookmarks.

use super::render::{render_json, render_list, render_messages, terminal_width};
use super::setup::{Cli, Commands};
use super::watch;
use anyhow::{bail, Context, Result};
use clap::Parser;
use markzapp::api::{parse_item, MarkzApi};
use markzapp::commands::{CmdMessage, MessageLevel};
use markzapp::init::{initialize, MarkzContext};
use markzapp::model::Node;
use markzapp::paths::absolutize;
use markzapp::store::fs_backend::FsBackend;
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MARKZ_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    let MarkzContext { mut api, root, .. } = initialize(&cwd, cli.root.as_deref())?;
    tracing::debug!(root = %root.display(), command = ?cli.command, "dispatching");

    match cli.command {
        None => handle_list(&api, false),
        Some(Commands::Add { file, line }) => handle_add(&mut api, &cwd, &file, line),
        Some(Commands::Remove { items }) => handle_remove(&mut api, &cwd, &items),
        Some(Commands::List { json }) => handle_list(&api, json),
        Some(Commands::Refresh) => handle_refresh(&api),
        Some(Commands::Open { item }) => handle_open(&api, &cwd, &item),
        Some(Commands::Reveal { item }) => handle_reveal(&api, &cwd, &item),
        Some(Commands::Path) => {
            println!("{}", api.document_path().display());
            Ok(())
        }
        Some(Commands::Watch) => watch::run(&mut api),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_add(api: &mut MarkzApi<FsBackend>, cwd: &Path, file: &Path, line: u32) -> Result<()> {
    let path = absolutize(file, cwd);
    if !path.is_file() {
        bail!("No such file: {}", file.display());
    }
    let result = api
        .add_bookmark(Some(&path), line, None)
        .with_context(|| format!("failed to bookmark {}:{}", file.display(), line))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(api: &mut MarkzApi<FsBackend>, cwd: &Path, items: &[String]) -> Result<()> {
    let result = api.remove_items(items, cwd)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &MarkzApi<FsBackend>, json: bool) -> Result<()> {
    let result = api.list()?;
    if json {
        print!("{}", render_json(&result.listed_files)?);
    } else {
        print!("{}", render_list(&result.listed_files, terminal_width()));
    }
    Ok(())
}

fn handle_refresh(api: &MarkzApi<FsBackend>) -> Result<()> {
    let refreshed = api.refresh_all()?;
    let listing = api.list()?;
    print!("{}", render_list(&listing.listed_files, terminal_width()));
    print_messages(&refreshed.messages);
    Ok(())
}

fn handle_open(api: &MarkzApi<FsBackend>, cwd: &Path, item: &str) -> Result<()> {
    let node = parse_item(item, cwd)?;
    let result = api.open(&node)?;
    fail_on_warning(&result.messages)?;
    match (&result.open_target, &node) {
        (Some(target), _) => println!("{}:{}", target.path.display(), target.line),
        (None, Node::File { path }) => println!("{}", path.display()),
        (None, Node::Bookmark { .. }) => {}
    }
    Ok(())
}

fn handle_reveal(api: &MarkzApi<FsBackend>, cwd: &Path, item: &str) -> Result<()> {
    let node = parse_item(item, cwd)?;
    let result = api.reveal(&node)?;
    fail_on_warning(&result.messages)?;
    if let Some(path) = result.revealed {
        println!("{}", path.display());
    }
    Ok(())
}

/// Errors and warnings go to stderr, the rest to stdout.
fn print_messages(messages: &[CmdMessage]) {
    let (problems, notes): (Vec<CmdMessage>, Vec<CmdMessage>) = messages
        .iter()
        .cloned()
        .partition(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error));
    print!("{}", render_messages(&notes));
    eprint!("{}", render_messages(&problems));
}

/// Lookups that found nothing exit non-zero with the message as the error.
fn fail_on_warning(messages: &[CmdMessage]) -> Result<()> {
    match messages
        .iter()
        .find(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    {
        Some(message) => bail!("{}", message.content),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_become_errors() {
        let messages = vec![
            CmdMessage::info("fine"),
            CmdMessage::warning("Not bookmarked: a.txt:3"),
        ];
        let err = fail_on_warning(&messages).unwrap_err();
        assert_eq!(err.to_string(), "Not bookmarked: a.txt:3");
    }

    #[test]
    fn info_only_is_ok() {
        assert!(fail_on_warning(&[CmdMessage::success("done")]).is_ok());
        assert!(fail_on_warning(&[]).is_ok());
    }
}
