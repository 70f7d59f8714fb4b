//! Pruned, top-down directory traversal

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::ignore::IgnoreRules;

/// A file that survived the name-based ignore rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path as reached from the traversal root
    pub path: PathBuf,
    /// Path relative to the traversal root
    pub relative: PathBuf,
}

/// Item produced by [`walk_files`]
#[derive(Debug)]
pub enum WalkEvent {
    /// A file to read
    File(Candidate),
    /// An entry that could not be listed
    Unreadable { path: PathBuf, reason: String },
}

/// Walk `root` and yield files not excluded by `rules`
///
/// Ignored directories are pruned before descent, so nothing beneath them
/// is ever listed. The root itself is never pruned. Symbolic links to
/// directories are not followed; links to files are yielded like files.
///
/// Every file of a directory is yielded before any of its subdirectories
/// is entered. Within a directory, entries keep the order the filesystem
/// lists them in.
pub fn walk_files<'a>(
    root: &'a Path,
    rules: &'a IgnoreRules,
) -> impl Iterator<Item = WalkEvent> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, rules))
        .filter_map(move |result| match result {
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                Some(WalkEvent::Unreadable {
                    path,
                    reason: e.to_string(),
                })
            }
            Ok(entry) => {
                if !is_file_like(&entry) {
                    return None;
                }
                let name = entry.file_name().to_string_lossy();
                if rules.skips_file(&name) {
                    trace!("Ignoring {}", entry.path().display());
                    return None;
                }
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                Some(WalkEvent::File(Candidate {
                    path: entry.into_path(),
                    relative,
                }))
            }
        })
}

fn is_pruned(entry: &DirEntry, rules: &IgnoreRules) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && rules.is_ignored_dir(&entry.file_name().to_string_lossy())
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    if file_type.is_symlink() {
        // Dangling links stay in so the read failure is reported.
        return !std::fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);
    }
    true
}
