//! # Persisted Document Format
//!
//! The store is saved as a single JSON array, one record per file:
//!
//! ```text
//! [
//!     {
//!         "relativePath": "src/main.rs",
//!         "children": [
//!             { "lineNumber": 12 },
//!             { "lineNumber": 40 }
//!         ]
//!     }
//! ]
//! ```
//!
//! There is no version field. Unknown fields are ignored on read, so the format
//! can only grow additively; anything else needs a migration on load.
//!
//! Files that cannot be expressed relative to the workspace root are dropped
//! from the document (and logged), since the document has no way to carry
//! an absolute path.

use crate::error::{MarkzError, Result};
use crate::model::{Bookmark, FileEntry};
use crate::paths::{join_absolute, relative_path};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub relative_path: String,
    #[serde(default)]
    pub children: Vec<BookmarkRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub line_number: u32,
}

/// Builds the document records for `files`, in their current order.
pub fn serialize(files: &[FileEntry], root: &Path) -> Vec<FileRecord> {
    files
        .iter()
        .filter_map(|file| match relative_path(&file.path, root) {
            Some(relative_path) => Some(FileRecord {
                relative_path,
                children: file
                    .lines()
                    .map(|line_number| BookmarkRecord { line_number })
                    .collect(),
            }),
            None => {
                let error = MarkzError::PathOutsideWorkspace(file.path.clone());
                tracing::warn!(%error, root = %root.display(), "skipping file on save");
                None
            }
        })
        .collect()
}

/// Rebuilds file entries from document records. Ordering and duplicates are
/// left for the store to repair.
pub fn deserialize(records: Vec<FileRecord>, root: &Path) -> Vec<FileEntry> {
    records
        .into_iter()
        .map(|record| {
            let mut file = FileEntry::new(join_absolute(root, &record.relative_path));
            file.bookmarks = record
                .children
                .into_iter()
                .filter(|child| {
                    if child.line_number == 0 {
                        tracing::warn!(
                            path = %record.relative_path,
                            "dropping bookmark with line number 0"
                        );
                        return false;
                    }
                    true
                })
                .map(|child| Bookmark::new(child.line_number))
                .collect();
            file
        })
        .collect()
}

/// Renders records with four-space indentation.
pub fn to_json(records: &[FileRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn from_json(text: &str) -> Result<Vec<FileRecord>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(path: &str, lines: &[u32]) -> FileEntry {
        let mut entry = FileEntry::new(path);
        for line in lines {
            entry.insert_line(*line);
        }
        entry
    }

    #[test]
    fn serializes_relative_paths_in_order() {
        let files = vec![file("/ws/b.txt", &[1]), file("/ws/src/a.rs", &[3, 8])];
        let records = serialize(&files, Path::new("/ws"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].relative_path, "b.txt");
        assert_eq!(records[1].relative_path, "src/a.rs");
        assert_eq!(
            records[1].children,
            vec![
                BookmarkRecord { line_number: 3 },
                BookmarkRecord { line_number: 8 }
            ]
        );
    }

    #[test]
    fn files_outside_root_are_excluded() {
        let files = vec![file("/elsewhere/x.txt", &[1]), file("/ws/a.txt", &[2])];
        let records = serialize(&files, Path::new("/ws"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_path, "a.txt");
    }

    #[test]
    fn json_layout_matches_document_schema() {
        let records = serialize(&[file("/ws/a.txt", &[5])], Path::new("/ws"));
        let json = to_json(&records).unwrap();
        let compact: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            compact.to_string(),
            r#"[{"relativePath":"a.txt","children":[{"lineNumber":5}]}]"#
        );
        assert!(json.contains("\n    {"), "expected four-space indent: {json}");
    }

    #[test]
    fn round_trip_preserves_pairs() {
        let root = Path::new("/ws");
        let files = vec![file("/ws/a.txt", &[2, 5]), file("/ws/lib/b.rs", &[10])];
        let json = to_json(&serialize(&files, root)).unwrap();
        let restored = deserialize(from_json(&json).unwrap(), root);
        assert_eq!(restored, files);
    }

    #[test]
    fn unknown_fields_and_missing_children_are_tolerated() {
        let text = r#"[{"relativePath":"a.txt","note":"x"},{"relativePath":"b.txt","children":[{"lineNumber":0},{"lineNumber":4}]}]"#;
        let restored = deserialize(from_json(text).unwrap(), Path::new("/ws"));
        assert_eq!(restored[0].path, PathBuf::from("/ws/a.txt"));
        assert!(restored[0].bookmarks.is_empty());
        assert_eq!(restored[1].lines().collect::<Vec<_>>(), vec![4]);
    }
}
