//! File enumerator: resolves a root path into the ordered sequence of
//! regular files to scan.
//!
//! Ordering is deterministic so repeated runs over the same tree print
//! results in the same order: depth-first, entries sorted by file name
//! within each directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enumerate the regular files under `root`.
///
/// A plain file yields just itself; a directory yields its regular files,
/// descending into subdirectories only when `recursive` is set. Symlinks and
/// other non-regular entries are skipped without following. A missing or
/// inaccessible root yields an empty list; the caller decides how to report
/// that.
pub fn files_to_search(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    if !root.is_dir() {
        tracing::warn!(path = %root.display(), "path does not exist or is not a file or directory");
        return Vec::new();
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Unreadable subdirectory or similar; skip and keep walking.
                tracing::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files
}
