//! # Path Resolution
//!
//! Bookmarked files are held in memory by absolute path, but persisted relative
//! to the workspace root so a checkout can move on disk without losing its
//! bookmarks.
//!
//! ## Segment-Aware Matching
//!
//! [`relative_path`] compares whole path components: `/ws/abc/x.rs` is **not**
//! under `/ws/ab`. Earlier versions of the bookmark format were produced by a
//! raw character-prefix test, which did treat it as a child.
//!
//! Relative paths always use `/` as separator in the persisted document.

use std::path::{Component, Path, PathBuf};

/// Returns `child` expressed relative to `root`, or `None` if `child` does not
/// live under `root`.
pub fn relative_path(child: &Path, root: &Path) -> Option<String> {
    let child = normalize(child);
    let root = normalize(root);
    let rest = child.strip_prefix(&root).ok()?;

    let mut segments = Vec::new();
    for component in rest.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?.to_string()),
            _ => return None,
        }
    }

    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

/// Resolves a persisted relative path back against the workspace root.
pub fn join_absolute(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    normalize(&path)
}

/// Lexically removes `.` components and folds `..` into its parent.
/// Does not touch the filesystem, so symlinks are left alone.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Makes `path` absolute against `base` when it is relative.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// The label used for a file node: its final component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root_and_separator() {
        let rel = relative_path(Path::new("/ws/src/a.txt"), Path::new("/ws"));
        assert_eq!(rel.as_deref(), Some("src/a.txt"));
    }

    #[test]
    fn relative_path_tolerates_trailing_separator_on_root() {
        let rel = relative_path(Path::new("/ws/a.txt"), Path::new("/ws/"));
        assert_eq!(rel.as_deref(), Some("a.txt"));
    }

    #[test]
    fn relative_path_outside_root_is_none() {
        assert_eq!(relative_path(Path::new("/other/a.txt"), Path::new("/ws")), None);
    }

    #[test]
    fn relative_path_is_segment_aware() {
        assert_eq!(relative_path(Path::new("/ws/abc/x.rs"), Path::new("/ws/ab")), None);
    }

    #[test]
    fn root_itself_has_no_relative_path() {
        assert_eq!(relative_path(Path::new("/ws"), Path::new("/ws")), None);
    }

    #[test]
    fn join_absolute_inverts_relative_path() {
        let root = Path::new("/ws");
        let abs = Path::new("/ws/src/deep/mod.rs");
        let rel = relative_path(abs, root).unwrap();
        assert_eq!(join_absolute(root, &rel), abs);
    }

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(
            normalize(Path::new("/ws/./src/../a.txt")),
            PathBuf::from("/ws/a.txt")
        );
    }

    #[test]
    fn absolutize_joins_relative_paths() {
        assert_eq!(
            absolutize(Path::new("src/a.rs"), Path::new("/ws")),
            PathBuf::from("/ws/src/a.rs")
        );
        assert_eq!(
            absolutize(Path::new("/abs/b.rs"), Path::new("/ws")),
            PathBuf::from("/abs/b.rs")
        );
    }

    #[test]
    fn display_name_is_basename() {
        assert_eq!(display_name(Path::new("/ws/src/a.txt")), "a.txt");
    }
}
