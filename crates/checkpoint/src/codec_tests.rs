// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::snapshot::{JobSnapshot, TaskBody};
use tempfile::tempdir;

fn sample() -> SchedulerSnapshot {
    SchedulerSnapshot {
        active: vec![JobSnapshot {
            id: "job-1".to_string(),
            type_tag: "empty_job".to_string(),
            task_body: TaskBody {
                start_at: None,
                max_working_time: -1,
                tries: 0,
                dependencies: vec![],
                payload: serde_json::json!({}),
            },
        }],
        waiting: vec![],
    }
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scheduler.lock");

    write_checkpoint(&path, &sample()).unwrap();
    let back = read_checkpoint(&path).unwrap();

    assert_eq!(back.active.len(), 1);
    assert_eq!(back.active[0].type_tag, "empty_job");
}

#[test]
fn missing_file_reads_as_empty_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does-not-exist.lock");

    let snapshot = read_checkpoint(&path).unwrap();
    assert!(snapshot.active.is_empty());
    assert!(snapshot.waiting.is_empty());
}

#[test]
fn write_does_not_leave_a_temp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scheduler.lock");
    write_checkpoint(&path, &sample()).unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn overwrite_replaces_previous_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scheduler.lock");

    write_checkpoint(&path, &sample()).unwrap();
    write_checkpoint(&path, &SchedulerSnapshot::default()).unwrap();

    let back = read_checkpoint(&path).unwrap();
    assert!(back.active.is_empty());
}
