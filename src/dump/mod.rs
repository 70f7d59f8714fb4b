//! Project Serializer
//!
//! Walks a project tree and writes every text file into one JSON document:
//!
//! ```json
//! {
//!   "project_name": "my-app",
//!   "files": [
//!     { "path": "README.md", "content": "hello" }
//!   ]
//! }
//! ```
//!
//! Ignored directories are pruned during traversal, lockfiles and binary
//! extensions are skipped by name, and the running program never dumps its
//! own executable. Files that cannot be read are reported and skipped.

pub mod decode;
pub mod ignore;
pub mod walker;

pub use decode::{decode_text, TextEncoding};
pub use ignore::{IgnoreRules, BINARY_EXTENSIONS, IGNORED_DIRS, IGNORED_FILES};
pub use walker::{walk_files, Candidate, WalkEvent};

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default name of the dump file, written into the project root
pub const DEFAULT_OUTPUT_NAME: &str = "project_dump.json";

/// One dumped file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path relative to the project root, with native separators
    pub path: String,
    /// Full decoded text
    pub content: String,
    #[serde(skip)]
    pub encoding: TextEncoding,
}

/// The complete dump document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDump {
    pub project_name: String,
    pub files: Vec<FileRecord>,
}

/// A file left out because it could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a dump run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpReport {
    /// Number of records in the document
    pub files_written: usize,
    /// Records that needed the Latin-1 fallback
    pub latin1_files: usize,
    /// Files and directories that could not be read
    pub skipped: Vec<SkippedFile>,
}

/// Builds and writes project dumps
#[derive(Debug, Clone, Default)]
pub struct ProjectSerializer {
    rules: IgnoreRules,
    excluded: Vec<PathBuf>,
}

impl ProjectSerializer {
    pub fn new(rules: IgnoreRules) -> Self {
        Self {
            rules,
            excluded: Vec::new(),
        }
    }

    /// Never dump the file at `path`, wherever it sits under the root
    pub fn exclude_path(mut self, path: impl AsRef<Path>) -> Self {
        self.excluded.push(normalize_path(path.as_ref()));
        self
    }

    /// Never dump the running executable
    pub fn exclude_current_exe(self) -> Self {
        match std::env::current_exe() {
            Ok(exe) => self.exclude_path(exe),
            Err(e) => {
                debug!("Cannot resolve current executable: {}", e);
                self
            }
        }
    }

    /// Walk `root` and build the document in memory
    pub fn collect(&self, root: &Path) -> Result<(ProjectDump, DumpReport)> {
        let absolute = fs::canonicalize(root).map_err(|source| Error::RootNotFound {
            path: root.to_path_buf(),
            source,
        })?;
        if !absolute.is_dir() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
                source: std::io::Error::other("not a directory"),
            });
        }

        let project_name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut dump = ProjectDump {
            project_name,
            files: Vec::new(),
        };
        let mut report = DumpReport::default();

        for event in walk_files(root, &self.rules) {
            match event {
                WalkEvent::Unreadable { path, reason } => {
                    warn!("Skipping {}: {}", path.display(), reason);
                    report.skipped.push(SkippedFile { path, reason });
                }
                WalkEvent::File(candidate) => {
                    if self.is_excluded(&candidate.path) {
                        debug!("Skipping excluded file {}", candidate.relative.display());
                        continue;
                    }
                    match fs::read(&candidate.path) {
                        Ok(bytes) => {
                            let (content, encoding) = decode_text(bytes);
                            if encoding == TextEncoding::Latin1 {
                                debug!("Decoded {} as Latin-1", candidate.relative.display());
                                report.latin1_files += 1;
                            }
                            dump.files.push(FileRecord {
                                path: candidate.relative.to_string_lossy().into_owned(),
                                content,
                                encoding,
                            });
                        }
                        Err(e) => {
                            warn!("Skipping file {}: {}", candidate.relative.display(), e);
                            report.skipped.push(SkippedFile {
                                path: candidate.relative,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        report.files_written = dump.files.len();
        Ok((dump, report))
    }

    /// Walk `root` and write the document to `output`
    pub fn serialize(&self, root: &Path, output: &Path) -> Result<DumpReport> {
        info!("Starting serialization from {}", root.display());
        let serializer = self.clone().exclude_path(output);
        let (dump, report) = serializer.collect(root)?;

        info!("Writing to {}...", output.display());
        write_dump(&dump, output)?;

        info!("Project serialized to {}", output.display());
        info!("Total files: {}", report.files_written);
        if !report.skipped.is_empty() {
            warn!("Skipped {} unreadable entries", report.skipped.len());
        }
        Ok(report)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        let name = path.file_name();
        if !self.excluded.iter().any(|excluded| excluded.file_name() == name) {
            return false;
        }
        let normalized = normalize_path(path);
        self.excluded.iter().any(|excluded| *excluded == normalized)
    }
}

/// Dump `root` into `output` with the default rules, excluding the running
/// executable
pub fn serialize(root: &Path, output: &Path) -> Result<DumpReport> {
    ProjectSerializer::default()
        .exclude_current_exe()
        .serialize(root, output)
}

/// Write `dump` as indented JSON, keeping non-ASCII text unescaped
pub fn write_dump(dump: &ProjectDump, output: &Path) -> Result<()> {
    let file = File::create(output).map_err(|source| Error::OutputWriteFailed {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dump).map_err(|e| {
        if e.is_io() {
            Error::OutputWriteFailed {
                path: output.to_path_buf(),
                source: e.into(),
            }
        } else {
            Error::Serde(e)
        }
    })?;
    writer.flush().map_err(|source| Error::OutputWriteFailed {
        path: output.to_path_buf(),
        source,
    })
}

/// Directory of the manifest this crate was built from
const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Project root used when none is given
///
/// This is the project the program was built from. When that checkout is
/// gone, fall back to the parent of the directory holding the executable.
pub fn default_root() -> Result<PathBuf> {
    let manifest = Path::new(MANIFEST_DIR);
    if manifest.is_dir() {
        return Ok(fs::canonicalize(manifest).unwrap_or_else(|_| manifest.to_path_buf()));
    }

    let exe = std::env::current_exe()?;
    let exe = fs::canonicalize(&exe).unwrap_or(exe);
    debug!("Build directory {} is gone, using {}", MANIFEST_DIR, exe.display());
    root_for_executable(&exe).ok_or(Error::NoDefaultRoot { exe })
}

/// Parent of the directory that holds `exe`
pub fn root_for_executable(exe: &Path) -> Option<PathBuf> {
    exe.parent().and_then(Path::parent).map(Path::to_path_buf)
}

/// Resolve symlinks where the path exists; otherwise resolve the parent
/// and keep the final component
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            fs::canonicalize(parent)
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
