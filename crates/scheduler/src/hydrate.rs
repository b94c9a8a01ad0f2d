// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns a [`SchedulerSnapshot`] back into live [`JobRuntime`]s via the
//! job registry, preserving shared-dependency identity across the
//! round-trip (spec.md §9 "Dependency graph").

use std::collections::HashMap;
use std::sync::Arc;

use oj_checkpoint::{JobSnapshot, SchedulerSnapshot};
use oj_core::{Clock, SchedulerError};
use oj_registry::{JobRegistry, RegistryError};
use parking_lot::Mutex;

use crate::id::JobId;
use crate::runtime::JobRuntime;

type JobHandle = Arc<Mutex<JobRuntime>>;

/// Rehydrates every entry in `snapshot`, returning `(active, waiting)` in
/// saved order. Two entries anywhere in the document that share an `id`
/// are rebuilt as a single shared [`JobRuntime`] instance, matching
/// whatever sharing existed before the checkpoint was written.
pub(crate) fn hydrate_snapshot<C: Clock>(
    snapshot: &SchedulerSnapshot,
    registry: &JobRegistry,
    clock: &C,
) -> Result<(Vec<JobHandle>, Vec<JobHandle>), SchedulerError> {
    let mut built: HashMap<String, JobHandle> = HashMap::new();

    let active = snapshot
        .active
        .iter()
        .map(|entry| hydrate_one(entry, registry, clock, &mut built))
        .collect::<Result<Vec<_>, _>>()?;
    let waiting = snapshot
        .waiting
        .iter()
        .map(|entry| hydrate_one(entry, registry, clock, &mut built))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((active, waiting))
}

fn hydrate_one<C: Clock>(
    entry: &JobSnapshot,
    registry: &JobRegistry,
    clock: &C,
    built: &mut HashMap<String, JobHandle>,
) -> Result<JobHandle, SchedulerError> {
    if let Some(existing) = built.get(&entry.id) {
        return Ok(existing.clone());
    }

    let dependencies = entry
        .task_body
        .dependencies
        .iter()
        .map(|dep| hydrate_one(dep, registry, clock, built))
        .collect::<Result<Vec<_>, _>>()?;

    let job = registry.build(&entry.type_tag, &entry.task_body.payload).map_err(|err| match err {
        RegistryError::Unknown(type_tag) => SchedulerError::UnknownJobType { type_tag },
        RegistryError::MalformedPayload { type_tag, source } => {
            SchedulerError::Checkpoint(format!("malformed payload for {type_tag:?}: {source}"))
        }
    })?;

    let runtime = JobRuntime::from_snapshot(
        JobId::from_string(&entry.id),
        job,
        &entry.task_body,
        dependencies,
        clock,
    );
    let handle = Arc::new(Mutex::new(runtime));
    built.insert(entry.id.clone(), handle.clone());
    Ok(handle)
}

#[cfg(test)]
#[path = "hydrate_tests.rs"]
mod tests;
