//! HTTP routes.
//!
//! Collaborator failures become a 500 with an empty list and an `error`
//! string, so the dashboard can always render the envelope.

use crate::api;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mission_core::{ActivityFilter, ActivityItem, CalendarJob, FormattedJob, JobFilter};
use mission_protocol::{
    ActivityQuery, ActivityResponse, CronQuery, HealthResponse, JobsResponse, ROUTE_ACTIVITY,
    ROUTE_CALENDAR, ROUTE_CRON, ROUTE_HEALTH,
};
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROUTE_ACTIVITY, get(activity))
        .route(ROUTE_CRON, get(cron))
        .route(ROUTE_CALENDAR, get(calendar))
        .route(ROUTE_HEALTH, get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Unparseable query strings fall back to "no filter" rather than a 400.

async fn activity(
    State(state): State<AppState>,
    query: Result<Query<ActivityQuery>, QueryRejection>,
) -> (StatusCode, Json<ActivityResponse<ActivityItem>>) {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let filter = ActivityFilter {
        kind: query.kind,
        session: query.session,
        limit: query.limit,
    };

    let result = tokio::task::spawn_blocking(move || api::activity_feed(&state, &filter)).await;
    match flatten(result) {
        Ok(items) => (StatusCode::OK, Json(ActivityResponse::ok(items))),
        Err(message) => {
            warn!(error = %message, "Activity feed unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActivityResponse::error(message)),
            )
        }
    }
}

async fn cron(
    State(state): State<AppState>,
    query: Result<Query<CronQuery>, QueryRejection>,
) -> (StatusCode, Json<JobsResponse<FormattedJob>>) {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let filter = JobFilter {
        enabled: query.enabled,
        kind: query.kind,
    };

    let result = tokio::task::spawn_blocking(move || api::cron_jobs(&state, &filter)).await;
    jobs_response(flatten(result))
}

async fn calendar(State(state): State<AppState>) -> (StatusCode, Json<JobsResponse<CalendarJob>>) {
    let result = tokio::task::spawn_blocking(move || api::calendar(&state)).await;
    jobs_response(flatten(result))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new(env!("CARGO_PKG_VERSION")))
}

fn jobs_response<T>(result: Result<Vec<T>, String>) -> (StatusCode, Json<JobsResponse<T>>) {
    match result {
        Ok(jobs) => (StatusCode::OK, Json(JobsResponse::ok(jobs))),
        Err(message) => {
            warn!(error = %message, "Job store unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JobsResponse::error(message)),
            )
        }
    }
}

fn flatten<T>(result: Result<mission_core::Result<T>, JoinError>) -> Result<T, String> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(err) => Err(format!("Worker task failed: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono_tz::Tz;
    use mission_core::{AggregateOptions, MemoryJobStore, MemoryLogSource};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::{Duration, SystemTime};
    use tower::ServiceExt;

    const JOBS: &str = r#"{"jobs": [
        {"id": "j-off", "name": "Evening review", "enabled": false,
         "schedule": {"kind": "cron", "expr": "0 21 * * *"}},
        {"id": "j-hourly", "name": "Inbox digest",
         "schedule": {"kind": "every", "everyMs": 3600000}},
        {"id": "j-morning", "name": "Morning planning",
         "schedule": {"kind": "cron", "expr": "0 9 * * 1-5", "tz": "America/New_York"}}
    ]}"#;

    fn session_log() -> String {
        [
            json!({"type": "session", "id": "s1", "timestamp": "2026-10-15T09:00:00.000Z", "cwd": "/repo"}),
            json!({"type": "message", "id": "m1", "timestamp": "2026-10-15T09:00:03.000Z",
                   "message": {"role": "assistant", "content": [
                       {"type": "tool_use", "name": "search_web", "input": {"q": "axum"}}
                   ]}}),
        ]
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
    }

    fn state(logs: MemoryLogSource, jobs: MemoryJobStore) -> AppState {
        AppState::new(
            Arc::new(logs),
            Arc::new(jobs),
            AggregateOptions::default(),
            Tz::UTC,
        )
    }

    fn healthy_state() -> AppState {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_792_000_000);
        state(
            MemoryLogSource::new().with_file("abc.jsonl", modified, session_log()),
            MemoryJobStore::new(JOBS),
        )
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn activity_returns_items_with_relative_time() {
        let (status, body) = get_json(healthy_state(), "/activity").await;

        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "tool_call");
        assert_eq!(items[0]["summary"], "Tool: search_web");
        assert_eq!(items[0]["sessionId"], "abc");
        assert!(items[0]["relativeTime"].is_string());
        assert_eq!(items[1]["type"], "session_start");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn activity_query_filters() {
        let (_, body) = get_json(healthy_state(), "/activity?type=session_start").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let (_, body) = get_json(healthy_state(), "/activity?limit=1").await;
        assert_eq!(body["items"][0]["type"], "tool_call");
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let (_, body) = get_json(healthy_state(), "/activity?session=other").await;
        assert!(body["items"].as_array().unwrap().is_empty());

        let (status, body) = get_json(healthy_state(), "/activity?limit=lots").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn activity_failure_is_500_with_empty_items() {
        let state = state(MemoryLogSource::unavailable(), MemoryJobStore::new(JOBS));
        let (status, body) = get_json(state, "/activity").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["items"], json!([]));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn cron_lists_jobs_in_listing_order() {
        let (status, body) = get_json(healthy_state(), "/cron").await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|job| job["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["j-hourly", "j-morning", "j-off"]);
        assert_eq!(body["jobs"][0]["schedule"], "Every 1h");
        assert_eq!(body["jobs"][1]["schedule"], "0 9 * * 1-5 (America/New_York)");
        assert!(body["jobs"][0]["nextRun"].is_null());
    }

    #[tokio::test]
    async fn cron_query_filters() {
        let (_, body) = get_json(healthy_state(), "/cron?enabled=false").await;
        assert_eq!(body["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(body["jobs"][0]["id"], "j-off");

        let (_, body) = get_json(healthy_state(), "/cron?kind=every").await;
        assert_eq!(body["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(body["jobs"][0]["kind"], "every");
    }

    #[tokio::test]
    async fn calendar_excludes_disabled_jobs() {
        let (status, body) = get_json(healthy_state(), "/calendar").await;

        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        let morning = jobs.iter().find(|job| job["id"] == "j-morning").unwrap();
        assert_eq!(morning["color"], "yellow");
        assert_eq!(morning["days"], json!([1, 2, 3, 4, 5]));
        assert_eq!(morning["hour"], 9);
        assert_eq!(morning["minute"], 0);
    }

    #[tokio::test]
    async fn job_store_failure_is_500_with_empty_jobs() {
        let broken = state(MemoryLogSource::new(), MemoryJobStore::new("{\"jobs\": ["));
        let (status, body) = get_json(broken.clone(), "/cron").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["jobs"], json!([]));
        assert!(body["error"].as_str().unwrap().contains("Job store malformed"));

        let (status, body) = get_json(broken, "/calendar").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["jobs"], json!([]));
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (status, body) = get_json(healthy_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "version": env!("CARGO_PKG_VERSION")}));
    }
}
