//! Cron job presentation: schedule strings, run times, calendar placement.
//!
//! Each call reads the job store fresh and projects it; nothing is cached.

mod calendar;
mod color;
mod format;
mod job;
mod projection;
mod store;

pub use calendar::{matches_day, time_field, CronPlacement};
pub use color::{color_for, JobColor};
pub use format::{human_schedule, listing_order, sort_jobs};
pub use job::{Delivery, JobDescriptor, JobState, JobStoreDocument, Schedule, ScheduleKind};
pub use projection::{
    normalize, normalize_for_calendar, CalendarJob, DisplayContext, FormattedJob,
};
pub use store::{FileJobStore, JobStore, MemoryJobStore};

use crate::error::Result;

/// Post-filters for the job list. Unknown values match nothing.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub enabled: Option<bool>,
    pub kind: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &FormattedJob) -> bool {
        if let Some(enabled) = self.enabled {
            if job.enabled != enabled {
                return false;
            }
        }
        match self.kind.as_deref() {
            Some(kind) => ScheduleKind::from_name(kind) == Some(job.kind),
            None => true,
        }
    }
}

/// All jobs, enabled first then soonest next run.
pub fn list_jobs(
    store: &dyn JobStore,
    ctx: &DisplayContext,
    filter: &JobFilter,
) -> Result<Vec<FormattedJob>> {
    let mut jobs = store.read_document()?.jobs;
    sort_jobs(&mut jobs);
    Ok(jobs
        .iter()
        .map(|job| normalize(job, ctx))
        .filter(|job| filter.matches(job))
        .collect())
}

/// Enabled jobs only, soonest next run first.
pub fn calendar_jobs(store: &dyn JobStore, ctx: &DisplayContext) -> Result<Vec<CalendarJob>> {
    let mut jobs = store.read_document()?.jobs;
    jobs.retain(|job| job.enabled);
    sort_jobs(&mut jobs);
    Ok(jobs
        .iter()
        .map(|job| normalize_for_calendar(job, ctx))
        .collect())
}
