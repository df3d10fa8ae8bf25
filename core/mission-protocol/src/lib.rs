//! HTTP wire types for the Mission Control API.
//!
//! Shared by the server and its clients to prevent schema drift. Payload item
//! types live in `mission-core`; this crate only fixes the envelopes and query
//! parameters around them.

use serde::{Deserialize, Serialize};

pub const ROUTE_ACTIVITY: &str = "/activity";
pub const ROUTE_CRON: &str = "/cron";
pub const ROUTE_CALENDAR: &str = "/calendar";
pub const ROUTE_HEALTH: &str = "/health";

/// `GET /activity` body. On failure `items` is empty and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActivityResponse<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// `GET /cron` and `GET /calendar` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse<T> {
    pub jobs: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> JobsResponse<T> {
    pub fn ok(jobs: Vec<T>) -> Self {
        Self { jobs, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            jobs: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}

impl HealthResponse {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            ok: true,
            version: version.into(),
        }
    }
}

/// Query string for `GET /activity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityQuery {
    /// Activity kind name, e.g. `tool_call`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query string for `GET /cron`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CronQuery {
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Schedule kind: `cron`, `every`, `at`
    #[serde(default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelopes_are_empty_with_message() {
        let body = serde_json::to_value(ActivityResponse::<u8>::error("sessions dir missing")).unwrap();
        assert_eq!(body, json!({"items": [], "error": "sessions dir missing"}));

        let body = serde_json::to_value(JobsResponse::<u8>::error("jobs.json corrupt")).unwrap();
        assert_eq!(body, json!({"jobs": [], "error": "jobs.json corrupt"}));
    }

    #[test]
    fn ok_envelopes_omit_error() {
        let body = serde_json::to_value(JobsResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body, json!({"jobs": [1, 2]}));
    }

    #[test]
    fn health_body() {
        let body = serde_json::to_value(HealthResponse::new("0.1.0")).unwrap();
        assert_eq!(body, json!({"ok": true, "version": "0.1.0"}));
    }

    #[test]
    fn activity_query_uses_type_key() {
        let query: ActivityQuery =
            serde_json::from_value(json!({"type": "tool_call", "limit": 5})).unwrap();
        assert_eq!(query.kind.as_deref(), Some("tool_call"));
        assert_eq!(query.limit, Some(5));
        assert!(query.session.is_none());
    }
}
