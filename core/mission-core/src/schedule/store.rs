//! Job store access.
//!
//! Unlike session logs, a job store that can't be read or parsed is a hard
//! failure: it means the scheduler config is broken and the user has to fix it.

use super::job::JobStoreDocument;
use crate::error::{MissionError, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};

pub trait JobStore: Send + Sync {
    fn read_document(&self) -> Result<JobStoreDocument>;
}

/// The scheduler's `jobs.json` on disk.
#[derive(Debug, Clone)]
pub struct FileJobStore {
    path: PathBuf,
}

impl FileJobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobStore for FileJobStore {
    fn read_document(&self) -> Result<JobStoreDocument> {
        let content = fs::read_to_string(&self.path).map_err(|err| MissionError::JobStoreRead {
            path: self.path.clone(),
            source: err,
        })?;
        parse_document(&content, &self.path)
    }
}

/// Raw JSON held in memory; parsed on every read like the file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryJobStore {
    json: Option<String>,
}

impl MemoryJobStore {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
        }
    }

    /// A store whose document is missing.
    pub fn unavailable() -> Self {
        Self { json: None }
    }
}

impl JobStore for MemoryJobStore {
    fn read_document(&self) -> Result<JobStoreDocument> {
        let path = Path::new("<memory>");
        match &self.json {
            Some(json) => parse_document(json, path),
            None => Err(MissionError::JobStoreRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "job store missing"),
            }),
        }
    }
}

fn parse_document(content: &str, path: &Path) -> Result<JobStoreDocument> {
    serde_json::from_str(content).map_err(|err| MissionError::JobStoreParse {
        path: path.to_path_buf(),
        source: err,
    })
}
