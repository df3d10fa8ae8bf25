//! Session log sources.
//!
//! The agent runtime appends one JSONL file per session. While a session is
//! being written the runtime keeps a `<name>.lock` sentinel next to it; those
//! sentinels are never treated as logs.

use crate::error::{MissionError, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

pub const LOCK_SUFFIX: &str = ".lock";
const LOG_EXTENSION: &str = ".jsonl";

/// A session log as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// File name, e.g. `3f2a.jsonl`
    pub name: String,
    /// Path below the source root without the extension, e.g. `agent-a/3f2a`
    pub session_id: String,
    pub modified: SystemTime,
    pub path: PathBuf,
}

impl LogFile {
    /// A log whose session id is just its file stem.
    pub fn new(path: PathBuf, modified: SystemTime) -> Self {
        let name = file_name(&path);
        let session_id = session_id_from_name(&name);
        Self {
            name,
            session_id,
            modified,
            path,
        }
    }

    /// A log found under `root`. Nested logs keep their directories in the
    /// session id so same-named files in sibling folders stay distinct.
    pub fn under_root(root: &Path, path: PathBuf, modified: SystemTime) -> Self {
        let name = file_name(&path);
        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let session_id = session_id_from_name(&relative);
        Self {
            name,
            session_id,
            modified,
            path,
        }
    }
}

pub fn is_lock_file(name: &str) -> bool {
    name.ends_with(LOCK_SUFFIX)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn session_id_from_name(name: &str) -> String {
    name.strip_suffix(LOG_EXTENSION).unwrap_or(name).to_string()
}

/// Read-only access to session logs.
///
/// Implementors should:
/// - Fail `list_files` only when the source as a whole is unavailable
/// - Leave lock filtering and ordering to the aggregator
pub trait LogSource: Send + Sync {
    fn list_files(&self) -> Result<Vec<LogFile>>;

    fn read_file(&self, file: &LogFile) -> Result<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Filesystem
// ─────────────────────────────────────────────────────────────────────────────

/// Reads `*.jsonl` files under a sessions directory.
#[derive(Debug, Clone)]
pub struct DirLogSource {
    root: PathBuf,
    max_depth: usize,
}

impl DirLogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: 1,
        }
    }

    /// Also picks up logs in nested directories (e.g. one folder per agent).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LogSource for DirLogSource {
    fn list_files(&self) -> Result<Vec<LogFile>> {
        let metadata = fs::metadata(&self.root).map_err(|err| MissionError::LogDirUnavailable {
            path: self.root.clone(),
            source: err,
        })?;
        if !metadata.is_dir() {
            return Err(MissionError::LogDirUnavailable {
                path: self.root.clone(),
                source: std::io::Error::other("not a directory"),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.max_depth)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, root = %self.root.display(), "Skipping unreadable session log entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if is_lock_file(&name) || !name.ends_with(LOG_EXTENSION) {
                continue;
            }

            let modified = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
                Some(modified) => modified,
                None => {
                    debug!(path = %entry.path().display(), "Skipping session log without mtime");
                    continue;
                }
            };

            files.push(LogFile::under_root(&self.root, entry.into_path(), modified));
        }

        Ok(files)
    }

    fn read_file(&self, file: &LogFile) -> Result<String> {
        fs::read_to_string(&file.path).map_err(|err| MissionError::LogFileRead {
            path: file.path.clone(),
            source: err,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory
// ─────────────────────────────────────────────────────────────────────────────

/// Fixture-backed log source for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSource {
    files: Vec<(LogFile, Option<String>)>,
    unavailable: bool,
}

impl MemoryLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose enumeration always fails.
    pub fn unavailable() -> Self {
        Self {
            files: Vec::new(),
            unavailable: true,
        }
    }

    /// `name` may include folders (`agent-a/main.jsonl`), as under a real root.
    pub fn with_file(mut self, name: &str, modified: SystemTime, body: impl Into<String>) -> Self {
        self.files.push((memory_file(name, modified), Some(body.into())));
        self
    }

    /// Listed but unreadable, like a log that vanished between list and read.
    pub fn with_missing_file(mut self, name: &str, modified: SystemTime) -> Self {
        self.files.push((memory_file(name, modified), None));
        self
    }
}

fn memory_file(name: &str, modified: SystemTime) -> LogFile {
    LogFile::under_root(Path::new(""), PathBuf::from(name), modified)
}

impl LogSource for MemoryLogSource {
    fn list_files(&self) -> Result<Vec<LogFile>> {
        if self.unavailable {
            return Err(MissionError::LogDirUnavailable {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("log source unavailable"),
            });
        }
        Ok(self.files.iter().map(|(file, _)| file.clone()).collect())
    }

    fn read_file(&self, file: &LogFile) -> Result<String> {
        self.files
            .iter()
            .find(|(candidate, _)| candidate.path == file.path)
            .and_then(|(_, body)| body.clone())
            .ok_or_else(|| MissionError::LogFileMissing(file.path.display().to_string()))
    }
}
