//! Shared handler state: the two collaborators plus display settings.

use chrono_tz::Tz;
use mission_core::{
    AggregateOptions, DirLogSource, FileJobStore, JobStore, LogSource, MissionConfig,
    StorageConfig,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub logs: Arc<dyn LogSource>,
    pub jobs: Arc<dyn JobStore>,
    pub options: AggregateOptions,
    pub timezone: Tz,
}

impl AppState {
    pub fn new(
        logs: Arc<dyn LogSource>,
        jobs: Arc<dyn JobStore>,
        options: AggregateOptions,
        timezone: Tz,
    ) -> Self {
        Self {
            logs,
            jobs,
            options,
            timezone,
        }
    }

    /// Filesystem-backed state. Paths aren't checked here; a missing sessions
    /// dir or job store surfaces per request.
    pub fn from_config(config: &MissionConfig, storage: &StorageConfig) -> Result<Self, String> {
        let timezone = config.display_timezone()?;
        let logs = DirLogSource::new(config.sessions_dir(storage))
            .with_max_depth(config.activity.max_depth);
        let jobs = FileJobStore::new(config.jobs_file(storage));

        info!(
            sessions_dir = %logs.root().display(),
            jobs_file = %jobs.path().display(),
            %timezone,
            "Resolved data sources"
        );

        Ok(Self::new(
            Arc::new(logs),
            Arc::new(jobs),
            config.aggregate_options(),
            timezone,
        ))
    }
}
