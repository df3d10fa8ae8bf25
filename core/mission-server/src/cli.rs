//! One-shot subcommands: print the same JSON body the HTTP route would return.

use crate::api;
use crate::state::AppState;
use mission_core::{ActivityFilter, ActivityItem, JobFilter};
use mission_protocol::{ActivityResponse, JobsResponse};
use serde::Serialize;

pub fn activity(state: &AppState, filter: &ActivityFilter) -> Result<(), String> {
    match api::activity_feed(state, filter) {
        Ok(items) => print_json(&ActivityResponse::ok(items)),
        Err(err) => {
            print_json(&ActivityResponse::<ActivityItem>::error(err.to_string()))?;
            Err(err.into())
        }
    }
}

pub fn cron(state: &AppState, filter: &JobFilter) -> Result<(), String> {
    print_jobs(api::cron_jobs(state, filter))
}

pub fn calendar(state: &AppState) -> Result<(), String> {
    print_jobs(api::calendar(state))
}

fn print_jobs<T: Serialize>(result: mission_core::Result<Vec<T>>) -> Result<(), String> {
    match result {
        Ok(jobs) => print_json(&JobsResponse::ok(jobs)),
        Err(err) => {
            print_json(&JobsResponse::<T>::error(err.to_string()))?;
            Err(err.into())
        }
    }
}

fn print_json<T: Serialize>(body: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(body)
        .map_err(|err| format!("Failed to serialize response: {}", err))?;
    println!("{}", text);
    Ok(())
}
