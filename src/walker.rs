//! Depth-first traversal that prunes ignored directories before descending.

use crate::ignore::IgnoreFilter;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A file selected for the amalgamation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
}

/// Collect every file under `root` that is not excluded by `filter`.
///
/// Within each directory, files come before subdirectories; otherwise the order is
/// the one reported by the filesystem, or by file name when `sort` is set.
pub fn collect_files(root: &Path, filter: &IgnoreFilter, sort: bool) -> Result<Vec<FileRecord>> {
    let root = std::path::absolute(root)?;
    let root = root.as_path();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by(move |a, b| {
            let files_first = is_directory(a).cmp(&is_directory(b));
            if sort {
                files_first.then_with(|| a.file_name().cmp(b.file_name()))
            } else {
                files_first
            }
        });

    let mut files = Vec::new();
    let entries = walker.into_iter().filter_entry(|entry| {
        let relative = relative_to(root, entry.path());
        let is_dir = entry.file_type().is_dir();
        let excluded = filter.matches(relative, is_dir);
        if excluded {
            tracing::debug!(
                "Pruning {} {}",
                if is_dir { "directory" } else { "file" },
                relative.display()
            );
        }
        !excluded
    });

    for entry in entries {
        let entry = entry?;
        if is_directory(&entry) {
            continue;
        }
        let relative_path = relative_to(root, entry.path()).to_path_buf();
        files.push(FileRecord {
            absolute_path: entry.into_path(),
            relative_path,
        });
    }

    tracing::info!("Collected {} files under {}", files.len(), root.display());
    Ok(files)
}

/// Directories and symlinks to directories. The latter are never descended into.
fn is_directory(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}

fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
