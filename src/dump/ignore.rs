//! Fixed ignore rules for project dumps

use std::collections::BTreeSet;
use std::path::Path;

/// Directory names never descended into
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".firebase",
    "dist",
    ".vscode",
    "logs",
    "build",
    "coverage",
    "__pycache__",
    ".gemini",
    "tmp",
];

/// File names never dumped: lockfiles, earlier dumps, OS metadata
pub const IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "project_dump.json",
    ".DS_Store",
    "project_context.json",
];

/// Extensions (lower-case, with the dot) treated as binary
pub const BINARY_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff", ".woff2", ".ttf", ".eot", ".mp4",
    ".webm", ".mp3", ".wav", ".pdf", ".zip", ".tar", ".gz", ".pyc", ".exe", ".dll", ".so",
    ".dylib",
];

/// Name-based exclusion sets applied during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    /// Directory names pruned before descent
    pub dirs: BTreeSet<String>,
    /// Exact file names skipped
    pub files: BTreeSet<String>,
    /// Lower-case extensions, including the leading dot
    pub binary_extensions: BTreeSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            dirs: to_set(IGNORED_DIRS),
            files: to_set(IGNORED_FILES),
            binary_extensions: to_set(BINARY_EXTENSIONS),
        }
    }
}

impl IgnoreRules {
    /// Rules that exclude nothing
    pub fn empty() -> Self {
        Self {
            dirs: BTreeSet::new(),
            files: BTreeSet::new(),
            binary_extensions: BTreeSet::new(),
        }
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Whether `name` carries a binary extension, ignoring case
    ///
    /// Only the final extension counts, and a leading dot alone (as in
    /// `.gitignore`) is not an extension.
    pub fn is_binary(&self, name: &str) -> bool {
        match Path::new(name).extension() {
            Some(ext) => {
                let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
                self.binary_extensions.contains(&ext)
            }
            None => false,
        }
    }

    /// Whether a file called `name` should be left out of the dump
    pub fn skips_file(&self, name: &str) -> bool {
        self.is_ignored_file(name) || self.is_binary(name)
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
