//! Line lookups used to build bookmark labels.
//!
//! Requests past the end of a file clamp to its last line: a bookmark keeps
//! showing something useful after the file shrinks.

use crate::error::{MarkzError, Result};
use std::fs;
use std::path::Path;

/// Reads `path` and returns the trimmed text of the 1-based `line`, clamped to
/// the last line of the file.
pub fn read_line(path: &Path, line: u32) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| MarkzError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(line_at(&text, line))
}

/// Trimmed text of the 1-based `line` in `text`. Line 0 reads as line 1 and an
/// empty text yields an empty string.
pub fn line_at(text: &str, line: u32) -> String {
    let total = text.lines().count();
    if total == 0 {
        return String::new();
    }
    let wanted = (line.max(1) as usize).min(total);
    text.lines()
        .nth(wanted - 1)
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}

/// 1-based line containing the character at `offset`, e.g. a cursor position.
/// `\r\n`, `\r` and `\n` each count as a single break. `offset` counts
/// `char`s, and a cursor at column 0 belongs to the line it sits on.
pub fn line_at_offset(text: &str, offset: usize) -> u32 {
    let mut line = 1;
    let mut chars = text.chars().take(offset).peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
            }
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ten_lines() -> String {
        (1..=10).map(|i| format!("  line {}  \n", i)).collect()
    }

    #[test]
    fn returns_trimmed_line() {
        assert_eq!(line_at(&ten_lines(), 3), "line 3");
    }

    #[test]
    fn clamps_to_last_line() {
        assert_eq!(line_at(&ten_lines(), 999), "line 10");
    }

    #[test]
    fn line_zero_reads_first_line() {
        assert_eq!(line_at(&ten_lines(), 0), "line 1");
    }

    #[test]
    fn empty_text_yields_empty_label() {
        assert_eq!(line_at("", 4), "");
    }

    #[test]
    fn crlf_endings_are_stripped() {
        assert_eq!(line_at("a\r\nb\r\n", 2), "b");
    }

    #[test]
    fn read_line_from_disk_clamps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ten_lines().as_bytes()).unwrap();
        assert_eq!(read_line(file.path(), 999).unwrap(), "line 10");
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_line(&dir.path().join("gone.txt"), 1).unwrap_err();
        assert!(matches!(err, MarkzError::FileUnavailable { .. }));
    }

    #[test]
    fn offset_to_line() {
        let text = "one\ntwo\r\nthree\rfour";
        assert_eq!(line_at_offset(text, 0), 1);
        assert_eq!(line_at_offset(text, 3), 1);
        assert_eq!(line_at_offset(text, 4), 2);
        assert_eq!(line_at_offset(text, 9), 3);
        assert_eq!(line_at_offset(text, 15), 4);
        assert_eq!(line_at_offset(text, 1000), 4);
    }

    #[test]
    fn cursor_at_column_zero_stays_on_its_line() {
        let text = "fn a() {}\nfn b() {}\n";
        assert_eq!(line_at_offset(text, 10), 2);
        assert_eq!(line_at_offset(text, 9), 1);
    }

    #[test]
    fn offset_counts_chars_not_bytes() {
        let text = "héllo wörld\nsecond";
        assert_eq!(line_at_offset(text, 11), 1);
        assert_eq!(line_at_offset(text, 12), 2);
    }
}
