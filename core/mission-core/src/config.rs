//! Configuration loading for Mission Control.
//!
//! The config file is TOML with every section optional:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1"
//! port = 3001
//!
//! [activity]
//! sessions_dir = "/home/me/.openclaw/agents/main/sessions"
//! max_files = 10
//! max_items = 50
//!
//! [cron]
//! jobs_file = "/home/me/.openclaw/cron/jobs.json"
//!
//! [display]
//! timezone = "America/New_York"
//!
//! [logging]
//! file = true
//! ```
//!
//! A missing file yields defaults. A malformed file is an error so that a
//! typo never silently points the service at the wrong directories.

use crate::activity::AggregateOptions;
use crate::error::{MissionError, Result};
use crate::storage::StorageConfig;
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MissionConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
    #[serde(default)]
    pub cron: CronConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub sessions_dir: Option<PathBuf>,
    /// How deep to walk below `sessions_dir`. 1 means direct children only.
    pub max_depth: usize,
    pub max_files: usize,
    pub max_items: usize,
    pub include_thinking: bool,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        let options = AggregateOptions::default();
        Self {
            sessions_dir: None,
            max_depth: 1,
            max_files: options.max_files,
            max_items: options.max_items,
            include_thinking: options.include_thinking,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CronConfig {
    pub jobs_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    /// IANA zone name used for localized timestamps. Defaults to UTC.
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a daily rolling file
    pub file: bool,
    /// Directory for the rolling file; implies `file = true`
    pub dir: Option<PathBuf>,
}

impl MissionConfig {
    pub fn sessions_dir(&self, storage: &StorageConfig) -> PathBuf {
        self.activity
            .sessions_dir
            .clone()
            .unwrap_or_else(|| storage.sessions_dir())
    }

    pub fn jobs_file(&self, storage: &StorageConfig) -> PathBuf {
        self.cron
            .jobs_file
            .clone()
            .unwrap_or_else(|| storage.jobs_file())
    }

    /// Rolling log directory, or `None` when file logging is off.
    pub fn log_dir(&self, storage: &StorageConfig) -> Option<PathBuf> {
        match &self.logging.dir {
            Some(dir) => Some(dir.clone()),
            None if self.logging.file => Some(storage.logs_dir()),
            None => None,
        }
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            max_files: self.activity.max_files,
            max_items: self.activity.max_items,
            include_thinking: self.activity.include_thinking,
        }
    }

    pub fn display_timezone(&self) -> Result<Tz> {
        match self.display.timezone.as_deref() {
            None => Ok(Tz::UTC),
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| MissionError::UnknownTimezone(name.to_string())),
        }
    }
}

/// Loads the config file at `path`, returning defaults if it doesn't exist.
pub fn load_config(path: &Path) -> Result<MissionConfig> {
    if !path.exists() {
        return Ok(MissionConfig::default());
    }

    let content = fs_err::read_to_string(path).map_err(|err| MissionError::Io {
        context: format!("reading config {}", path.display()),
        source: err,
    })?;
    toml::from_str::<MissionConfig>(&content).map_err(|err| MissionError::ConfigMalformed {
        path: path.to_path_buf(),
        details: err.to_string(),
    })
}
