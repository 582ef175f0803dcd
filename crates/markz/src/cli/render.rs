//! # Rendering Module
//!
//! Turns `CmdResult` data into terminal text. Functions here return strings;
//! printing is left to the command handlers so rendering stays testable.
//!
//! Layout math (truncation to the terminal width) is Unicode-aware via
//! `unicode-width`: a label full of wide characters still fits one row.

use super::styles::{names, style};
use markzapp::commands::{CmdMessage, ListedFile, MessageLevel};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width used when stdout is not a terminal.
pub const LINE_WIDTH: usize = 100;
const INDENT: &str = "  ";
const EMPTY_MESSAGE: &str = "No bookmarks yet. Add one with: markz add <file> <line>";

pub fn terminal_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .filter(|cols| *cols > 0)
        .unwrap_or(LINE_WIDTH)
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let name = match message.level {
            MessageLevel::Info => names::INFO,
            MessageLevel::Success => names::SUCCESS,
            MessageLevel::Warning => names::WARNING,
            MessageLevel::Error => names::ERROR,
        };
        out.push_str(&style(name).apply_to(&message.content).to_string());
        out.push('\n');
    }
    out
}

pub fn render_list(files: &[ListedFile], width: usize) -> String {
    if files.is_empty() {
        return format!("{}\n", style(names::MUTED).apply_to(EMPTY_MESSAGE));
    }
    let mut out = String::new();
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_file(file, width));
    }
    out
}

/// A file header followed by one indented row per bookmark.
pub fn render_file(file: &ListedFile, width: usize) -> String {
    let mut out = String::new();
    let header = match &file.relative_path {
        Some(relative) => style(names::FILE).apply_to(relative.clone()),
        None => style(names::FILE_OUTSIDE).apply_to(format!(
            "{} (outside workspace, not saved)",
            file.path.display()
        )),
    };
    out.push_str(&header.to_string());
    out.push('\n');

    let available = width.saturating_sub(INDENT.width());
    for bookmark in &file.bookmarks {
        let label = truncate_to_width(&bookmark.label, available);
        let row = match label.split_once(": ") {
            Some((number, "")) => format!(
                "{}{}",
                INDENT,
                style(names::LINE_NUMBER).apply_to(format!("{}:", number))
            ),
            Some((number, text)) => format!(
                "{}{} {}",
                INDENT,
                style(names::LINE_NUMBER).apply_to(format!("{}:", number)),
                style(names::LABEL).apply_to(text)
            ),
            None => format!(
                "{}{}",
                INDENT,
                style(names::LINE_NUMBER).apply_to(label.trim_end_matches(':'))
            ),
        };
        out.push_str(&row);
        out.push('\n');
    }
    out
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use markzapp::commands::ListedBookmark;
    use std::path::PathBuf;

    fn plain() {
        console::set_colors_enabled(false);
    }

    fn listed(relative: Option<&str>, bookmarks: &[(u32, &str)]) -> ListedFile {
        ListedFile {
            path: PathBuf::from("/ws/a.txt"),
            relative_path: relative.map(str::to_string),
            collapsed: false,
            bookmarks: bookmarks
                .iter()
                .map(|(line, text)| ListedBookmark {
                    line: *line,
                    label: format!("#{}: {}", line, text),
                })
                .collect(),
        }
    }

    #[test]
    fn renders_files_and_bookmarks() {
        plain();
        let out = render_list(
            &[
                listed(Some("a.txt"), &[(2, "fn main() {"), (9, "}")]),
                listed(Some("b.txt"), &[(1, "")]),
            ],
            80,
        );
        assert_eq!(
            out,
            "a.txt\n  #2: fn main() {\n  #9: }\n\nb.txt\n  #1:\n"
        );
    }

    #[test]
    fn empty_list_has_hint() {
        plain();
        assert!(render_list(&[], 80).contains("markz add"));
    }

    #[test]
    fn outside_files_are_flagged() {
        plain();
        let out = render_file(&listed(None, &[(1, "x")]), 80);
        assert!(out.starts_with("/ws/a.txt (outside workspace, not saved)\n"));
    }

    #[test]
    fn long_labels_are_truncated_to_width() {
        plain();
        let long = "x".repeat(200);
        let out = render_file(&listed(Some("a.txt"), &[(1, &long)]), 40);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row.width(), 40);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn truncation_counts_wide_chars() {
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn messages_one_per_line() {
        plain();
        let out = render_messages(&[CmdMessage::success("ok"), CmdMessage::error("bad")]);
        assert_eq!(out, "ok\nbad\n");
    }
}
