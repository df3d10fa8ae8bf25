//! # mission-core
//!
//! Core library for Mission Control, providing the read-path logic behind the
//! dashboard's activity feed and cron pages.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. The server wraps calls on its blocking pool.
//! - **Stateless**: Every call re-reads its collaborator; nothing is cached between calls.
//! - **Graceful degradation**: Malformed log lines and unreadable log files are skipped, not errors.
//! - **Injected collaborators**: Log files and the job store sit behind traits so tests run on fixtures.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mission_core::{aggregate, AggregateOptions, DirLogSource};
//!
//! let source = DirLogSource::new("/home/me/.openclaw/agents/main/sessions");
//! let items = aggregate(&source, &AggregateOptions::default())?;
//! ```

pub mod activity;
pub mod config;
pub mod error;
pub mod patterns;
pub mod relative;
pub mod schedule;
pub mod storage;

pub use activity::{
    aggregate, classify_record, ActivityFilter, ActivityItem, ActivityKind, AggregateOptions,
    DirLogSource, LogFile, LogRecord, LogSource, MemoryLogSource,
};
pub use config::{load_config, MissionConfig};
pub use error::{MissionError, Result};
pub use relative::{relative_time, time_ago};
pub use schedule::{
    calendar_jobs, list_jobs, normalize, normalize_for_calendar, CalendarJob, DisplayContext,
    FileJobStore, FormattedJob, JobDescriptor, JobFilter, JobStore, JobStoreDocument,
    MemoryJobStore, Schedule,
};
pub use storage::StorageConfig;
