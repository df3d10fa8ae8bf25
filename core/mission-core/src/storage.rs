//! Storage configuration and path management for Mission Control.
//!
//! `StorageConfig` centralizes every default path the service reads from, so
//! tests can inject temp directories instead of touching the real home dir.
//!
//! Two namespaces are involved:
//!
//! - **Mission Control** (`~/.mission-control/`): our own config and logs.
//! - **Agent runtime** (`~/.openclaw/`): session logs and the cron job store.
//!   We read from here but never write; the runtime owns this data.

use std::path::{Path, PathBuf};

/// Central configuration for all Mission Control storage paths.
///
/// Production code uses `StorageConfig::default()`.
/// Tests use `StorageConfig::with_roots(app, runtime)` for isolation.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for Mission Control data (default: ~/.mission-control)
    root: PathBuf,
    /// Root directory for agent runtime data (default: ~/.openclaw)
    runtime_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: home.join(".mission-control"),
            runtime_root: home.join(".openclaw"),
        }
    }
}

impl StorageConfig {
    /// Creates a StorageConfig with both roots supplied.
    /// Used for testing with temp directories.
    pub fn with_roots(root: PathBuf, runtime_root: PathBuf) -> Self {
        Self { root, runtime_root }
    }

    /// Returns the root directory for Mission Control data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the root directory for agent runtime data.
    pub fn runtime_root(&self) -> &Path {
        &self.runtime_root
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mission Control Paths
    // ─────────────────────────────────────────────────────────────────────────────

    /// Path to config.toml (service configuration).
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to logs/ directory (rolling service logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Agent Runtime Paths (Read-Only)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Path to the main agent's session log directory (JSONL transcripts).
    pub fn sessions_dir(&self) -> PathBuf {
        self.runtime_root.join("agents").join("main").join("sessions")
    }

    /// Path to the scheduler's job store document.
    pub fn jobs_file(&self) -> PathBuf {
        self.runtime_root.join("cron").join("jobs.json")
    }
}
