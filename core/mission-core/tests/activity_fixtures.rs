use filetime::{set_file_mtime, FileTime};
use mission_core::activity::{select_files, LogSource};
use mission_core::{aggregate, ActivityKind, AggregateOptions, DirLogSource};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BASE_MTIME: i64 = 1_792_000_000;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sessions")
        .join(name)
}

/// Copies a fixture directory into a temp dir and pins file mtimes, since
/// checkout order says nothing about which log is "most recent".
fn staged_fixture(name: &str, mtimes: &[(&str, i64)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for entry in fs::read_dir(fixture_path(name)).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), temp.path().join(entry.file_name())).unwrap();
    }
    for (file, offset) in mtimes {
        pin_mtime(&temp.path().join(file), *offset);
    }
    temp
}

fn pin_mtime(path: &Path, offset: i64) {
    set_file_mtime(path, FileTime::from_unix_time(BASE_MTIME + offset, 0)).unwrap();
}

fn mixed_fixture() -> TempDir {
    staged_fixture(
        "mixed",
        &[
            ("c3.jsonl", 0),
            ("a1.jsonl", 100),
            ("b2.jsonl", 200),
            ("b2.jsonl.lock", 300),
            ("notes.txt", 400),
        ],
    )
}

#[test]
fn test_session_with_search_web_yields_two_items() {
    let temp = staged_fixture("search-web", &[("5f1c0e2a.jsonl", 0)]);
    let source = DirLogSource::new(temp.path());

    let items = aggregate(&source, &AggregateOptions::default()).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, ActivityKind::ToolCall);
    assert_eq!(items[0].summary, "Tool: search_web");
    assert_eq!(items[0].id, "5f1c0e2a:m-1:tool-0");
    assert_eq!(
        items[0].details.as_deref(),
        Some(r#"{"query":"rust 2024 edition changes"}"#)
    );
    assert_eq!(items[1].kind, ActivityKind::SessionStart);
    assert_eq!(items[1].session_id, "5f1c0e2a");
    assert_eq!(items[1].details.as_deref(), Some("/home/me/projects/atlas"));
}

#[test]
fn test_mixed_sessions_merge_newest_first() {
    let temp = mixed_fixture();
    let source = DirLogSource::new(temp.path());

    let items = aggregate(&source, &AggregateOptions::default()).unwrap();
    let ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();

    assert_eq!(
        ids,
        vec![
            "b2:line-2",
            "b2:s-b2",
            "a1:m-4:text-0",
            "a1:m-3:result-0",
            "a1:m-2:tool-1",
            "a1:m-1",
            "a1:s-a1",
            "c3:s-c3",
        ]
    );

    let cron = items.iter().find(|item| item.id == "a1:m-1").unwrap();
    assert_eq!(cron.kind, ActivityKind::Message);
    assert_eq!(cron.summary, "Cron: Morning briefing");

    let result = items.iter().find(|item| item.id == "a1:m-3:result-0").unwrap();
    assert_eq!(result.summary, "Tool result: 3 events: standup, dentist, 1:1");

    let plain = &items[0];
    assert_eq!(plain.summary, "Can you rename the config loader?");
    assert_eq!(plain.timestamp, "2026-10-15T10:30:05.000Z");
}

#[test]
fn test_thinking_is_opt_in() {
    let temp = mixed_fixture();
    let source = DirLogSource::new(temp.path());

    let default_items = aggregate(&source, &AggregateOptions::default()).unwrap();
    assert!(default_items
        .iter()
        .all(|item| item.kind != ActivityKind::Thinking));

    let options = AggregateOptions {
        include_thinking: true,
        ..AggregateOptions::default()
    };
    let items = aggregate(&source, &options).unwrap();
    let thinking: Vec<_> = items
        .iter()
        .filter(|item| item.kind == ActivityKind::Thinking)
        .collect();
    assert_eq!(thinking.len(), 1);
    assert_eq!(thinking[0].id, "a1:m-2:thinking-0");
}

#[test]
fn test_only_most_recent_files_are_read() {
    let temp = mixed_fixture();
    let source = DirLogSource::new(temp.path());

    let listed = source.list_files().unwrap();
    assert_eq!(listed.len(), 3, "lock files and non-jsonl files are not listed");

    let selected = select_files(listed, 2);
    let names: Vec<_> = selected.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, vec!["b2.jsonl", "a1.jsonl"]);

    let options = AggregateOptions {
        max_files: 2,
        ..AggregateOptions::default()
    };
    let items = aggregate(&source, &options).unwrap();
    assert_eq!(items.len(), 7);
    assert!(items.iter().all(|item| item.session_id != "c3"));
}

#[test]
fn test_item_cap_keeps_newest() {
    let temp = mixed_fixture();
    let source = DirLogSource::new(temp.path());
    let options = AggregateOptions {
        max_items: 3,
        ..AggregateOptions::default()
    };

    let items = aggregate(&source, &options).unwrap();
    let ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["b2:line-2", "b2:s-b2", "a1:m-4:text-0"]);
}

#[test]
fn test_unreadable_file_does_not_fail_feed() {
    let temp = mixed_fixture();
    fs::write(temp.path().join("d4.jsonl"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
    pin_mtime(&temp.path().join("d4.jsonl"), 500);

    let items = aggregate(&DirLogSource::new(temp.path()), &AggregateOptions::default()).unwrap();
    assert_eq!(items.len(), 8);
}

#[test]
fn test_missing_directory_is_an_error() {
    let temp = TempDir::new().unwrap();
    let source = DirLogSource::new(temp.path().join("sessions"));
    assert!(aggregate(&source, &AggregateOptions::default()).is_err());
}

#[test]
fn test_nested_logs_need_deeper_walk() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("archive");
    fs::create_dir(&nested).unwrap();
    fs::copy(
        fixture_path("search-web").join("5f1c0e2a.jsonl"),
        nested.join("5f1c0e2a.jsonl"),
    )
    .unwrap();

    let shallow = DirLogSource::new(temp.path());
    assert!(aggregate(&shallow, &AggregateOptions::default())
        .unwrap()
        .is_empty());

    let deep = DirLogSource::new(temp.path()).with_max_depth(2);
    assert_eq!(
        aggregate(&deep, &AggregateOptions::default()).unwrap().len(),
        2
    );
}

#[test]
fn test_ids_stay_unique_across_agent_folders() {
    let temp = TempDir::new().unwrap();
    let session = r#"{"type":"session","timestamp":"2026-10-15T09:00:00.000Z","cwd":"/srv"}"#;
    for agent in ["agent-a", "agent-b"] {
        let dir = temp.path().join(agent);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("main.jsonl"), session).unwrap();
    }

    let source = DirLogSource::new(temp.path()).with_max_depth(2);
    let items = aggregate(&source, &AggregateOptions::default()).unwrap();

    let mut ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["agent-a/main:line-1", "agent-b/main:line-1"]);

    let mut sessions: Vec<_> = items.iter().map(|item| item.session_id.as_str()).collect();
    sessions.sort();
    sessions.dedup();
    assert_eq!(sessions, vec!["agent-a/main", "agent-b/main"]);
}

#[test]
fn test_mixed_fixture_ids_are_unique() {
    let temp = mixed_fixture();
    let items = aggregate(&DirLogSource::new(temp.path()), &AggregateOptions::default()).unwrap();

    let mut ids: Vec<_> = items.iter().map(|item| item.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), items.len());
}
