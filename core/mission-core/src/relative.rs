//! Relative and localized time labels shared by the activity feed and the
//! cron views.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;

/// Formats `target` relative to `now`: "just now", "5m ago", "in 3h", "in 2d".
///
/// Deltas of a week or more render as a calendar date in `tz` ("Oct 3").
/// Under a minute, past instants read "just now" and future ones "<1m".
pub fn relative_time(target: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let delta = target.signed_duration_since(now);
    let future = delta > Duration::zero();
    let abs = if future { delta } else { -delta };

    let minutes = abs.num_minutes();
    if minutes < 1 {
        return if future { "<1m" } else { "just now" }.to_string();
    }

    let magnitude = if minutes < 60 {
        format!("{}m", minutes)
    } else if abs.num_hours() < 24 {
        format!("{}h", abs.num_hours())
    } else if abs.num_days() < 7 {
        format!("{}d", abs.num_days())
    } else {
        return calendar_date(target, tz);
    };

    if future {
        format!("in {}", magnitude)
    } else {
        format!("{} ago", magnitude)
    }
}

/// Past-facing variant for the activity feed. Clock skew that puts an event
/// slightly in the future still reads "just now".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    if timestamp > now {
        return "just now".to_string();
    }
    relative_time(timestamp, now, tz)
}

/// Short localized date, e.g. "Oct 3".
pub fn calendar_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d").to_string()
}

/// Full localized timestamp, e.g. "Oct 3, 2026, 9:05 AM".
pub fn localized_timestamp(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%b %-d, %Y, %-I:%M %p")
        .to_string()
}

pub fn from_epoch_ms(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
