// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle wrapper around a [`Job`]: timing, dependency/timeout
//! checks, retries, and soft reset — independent of how the scheduler
//! decides *when* to call [`JobRuntime::tick`].

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset};
use oj_checkpoint::{JobSnapshot, TaskBody};
use oj_core::Clock;
use oj_jobs::{Cursor, Job, StepOutcome};
use parking_lot::Mutex;

use crate::id::JobId;

/// Construction-time parameters every job carries, independent of its
/// concrete kind.
pub struct JobDefaults {
    pub start_at: Option<DateTime<FixedOffset>>,
    pub max_working_time: i64,
    pub tries: u32,
    pub dependencies: Vec<Arc<Mutex<JobRuntime>>>,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self { start_at: None, max_working_time: -1, tries: 0, dependencies: Vec::new() }
    }
}

/// What happened on one call to [`JobRuntime::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// `start_at` hasn't arrived yet, or a dependency isn't finished.
    NotReady,
    /// The step budget was exceeded, or the step itself asked to retry;
    /// a try was consumed and the job was soft-reset.
    SoftReset,
    /// The job ran out of steps, ran out of retries, or was already
    /// finished.
    Finished,
    /// One step ran successfully.
    Advanced,
}

pub struct JobRuntime {
    id: JobId,
    job: Box<dyn Job>,
    cursor: Box<dyn Cursor>,
    start_at: Option<DateTime<FixedOffset>>,
    max_working_time: i64,
    tries: u32,
    tries_left: u32,
    dependencies: Vec<Arc<Mutex<JobRuntime>>>,
    time_start: DateTime<FixedOffset>,
    time_since_start: f64,
    time_timeout: DateTime<FixedOffset>,
    is_finished: bool,
}

impl JobRuntime {
    pub fn new<C: Clock>(job: Box<dyn Job>, defaults: JobDefaults, clock: &C) -> Self {
        let time_start = defaults.start_at.unwrap_or_else(|| clock.now());
        let time_timeout = time_start + Duration::seconds(defaults.max_working_time);
        let cursor = job.new_cursor();
        Self {
            id: JobId::new(),
            job,
            cursor,
            start_at: defaults.start_at,
            max_working_time: defaults.max_working_time,
            tries: defaults.tries,
            tries_left: defaults.tries,
            dependencies: defaults.dependencies,
            time_start,
            time_since_start: 0.0,
            time_timeout,
            is_finished: false,
        }
    }

    /// Rebuild a runtime from a checkpoint entry. `tries_left` always
    /// restarts at `tries` — the reference never persists the remaining
    /// budget, only the original allowance.
    pub fn from_snapshot<C: Clock>(
        id: JobId,
        job: Box<dyn Job>,
        task_body: &TaskBody,
        dependencies: Vec<Arc<Mutex<JobRuntime>>>,
        clock: &C,
    ) -> Self {
        let mut runtime = Self::new(
            job,
            JobDefaults {
                start_at: task_body.start_at,
                max_working_time: task_body.max_working_time,
                tries: task_body.tries,
                dependencies,
            },
            clock,
        );
        runtime.id = id;
        runtime
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn tries_left(&self) -> u32 {
        self.tries_left
    }

    pub fn type_tag(&self) -> &'static str {
        self.job.type_tag()
    }

    /// The dependencies wired in at construction, in the order they must
    /// finish before this job becomes ready.
    pub fn dependencies(&self) -> &[Arc<Mutex<JobRuntime>>] {
        &self.dependencies
    }

    /// `timeit ∘ check_start_ready ∘ check_timeout ∘ advance`, collapsed
    /// into one method: ready/dependency and timeout checks run first and
    /// are not timed, then only the actual step call is timed and its
    /// elapsed seconds folded into `time_since_start`.
    pub fn tick<C: Clock>(&mut self, clock: &C) -> TickOutcome {
        if self.is_finished {
            return TickOutcome::Finished;
        }
        if !self.is_ready(clock) {
            return TickOutcome::NotReady;
        }
        if self.is_timed_out() {
            tracing::info!(job_id = %self.id, "execution time exceeded");
            return self.retry(clock);
        }

        let started = std::time::Instant::now();
        let outcome = self.cursor.advance();
        self.time_since_start += started.elapsed().as_secs_f64();

        match outcome {
            StepOutcome::Yielded => TickOutcome::Advanced,
            StepOutcome::Exhausted => {
                self.is_finished = true;
                TickOutcome::Finished
            }
            StepOutcome::RetryRequested => self.retry(clock),
        }
    }

    fn is_ready<C: Clock>(&self, clock: &C) -> bool {
        clock.now() >= self.time_start
            && self.dependencies.iter().all(|dep| dep.lock().is_finished())
    }

    fn is_timed_out(&self) -> bool {
        if self.max_working_time <= 0 {
            return false;
        }
        let used = Duration::nanoseconds((self.time_since_start * 1_000_000_000.0).round() as i64);
        self.time_start + used > self.time_timeout
    }

    fn retry<C: Clock>(&mut self, clock: &C) -> TickOutcome {
        if self.tries_left > 0 {
            self.tries_left -= 1;
            tracing::info!(job_id = %self.id, tries_left = self.tries_left, "soft reset");
            self.soft_reset(clock);
            TickOutcome::SoftReset
        } else {
            self.is_finished = true;
            TickOutcome::Finished
        }
    }

    fn soft_reset<C: Clock>(&mut self, clock: &C) {
        self.cursor = self.job.new_cursor();
        self.time_start = self.start_at.unwrap_or_else(|| clock.now());
        self.time_since_start = 0.0;
        self.time_timeout = self.time_start + Duration::seconds(self.max_working_time);
        self.is_finished = false;
    }

    /// A caller-initiated hard stop: mark finished without running the
    /// retry policy.
    pub fn stop(&mut self) {
        self.is_finished = true;
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            id: self.id.to_string(),
            type_tag: self.job.type_tag().to_string(),
            task_body: TaskBody {
                start_at: self.start_at,
                max_working_time: self.max_working_time,
                tries: self.tries,
                dependencies: self.dependencies.iter().map(|dep| dep.lock().snapshot()).collect(),
                payload: self.job.payload(),
            },
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
