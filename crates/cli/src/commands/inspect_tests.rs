// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use oj_checkpoint::{write_checkpoint, JobSnapshot, SchedulerSnapshot, TaskBody};
use tempfile::tempdir;

fn sample_entry(id: &str) -> JobSnapshot {
    JobSnapshot {
        id: id.to_string(),
        type_tag: "infinite_job".to_string(),
        task_body: TaskBody {
            start_at: None,
            max_working_time: -1,
            tries: 0,
            dependencies: Vec::new(),
            payload: serde_json::json!({}),
        },
    }
}

#[test]
fn inspect_missing_lockfile_is_not_an_error() {
    let dir = tempdir().unwrap();
    let lockfile = dir.path().join("scheduler.lock");

    let result = inspect(InspectArgs { lockfile, json: false });
    assert!(result.is_ok());
}

#[test]
fn inspect_summarizes_a_written_checkpoint() {
    let dir = tempdir().unwrap();
    let lockfile = dir.path().join("scheduler.lock");
    let snapshot = SchedulerSnapshot {
        active: vec![sample_entry("job-aaaaaaaaaaaaaaaaaaa")],
        waiting: vec![sample_entry("job-bbbbbbbbbbbbbbbbbbb"), sample_entry("job-ccccccccccccccccccc")],
    };
    write_checkpoint(&lockfile, &snapshot).unwrap();

    assert!(inspect(InspectArgs { lockfile: lockfile.clone(), json: false }).is_ok());
    assert!(inspect(InspectArgs { lockfile, json: true }).is_ok());
}
