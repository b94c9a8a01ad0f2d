// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable document shape: an "active"/"waiting" document of job
//! entries, each carrying its type tag and a flattened task body.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One job's durable record. Dependencies are nested inline so a restart
/// can rebuild the whole dependency subtree from a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Stable identity, used on restart to reconnect a dependency that is
    /// shared by more than one job to a single rehydrated instance instead
    /// of duplicating it once per referring job.
    ///
    /// Not part of spec.md §6.3's documented wire shape (`{type, task_body}`
    /// only) — added deliberately so shared-dependency identity survives a
    /// stop/restart round trip (spec.md §9 "Dependency graph"). A reader
    /// written strictly against §6.3 can ignore this field.
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub task_body: TaskBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub max_working_time: i64,
    #[serde(default)]
    pub tries: u32,
    #[serde(default)]
    pub dependencies: Vec<JobSnapshot>,
    /// Variant-specific payload fields, flattened alongside the common
    /// ones above.
    #[serde(flatten)]
    pub payload: serde_json::Value,
}

/// The whole scheduler's durable state: the active pool and the waiting
/// backlog, each a flat list of job entries in scheduler order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    #[serde(default)]
    pub active: Vec<JobSnapshot>,
    #[serde(default)]
    pub waiting: Vec<JobSnapshot>,
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
