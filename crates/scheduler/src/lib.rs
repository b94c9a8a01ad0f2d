// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oj-scheduler: the event loop that drives jobs round-robin, the public
//! `schedule`/`run`/`pause`/`stop`/`restart`/`join` API, and the glue that
//! rehydrates a checkpoint through the job registry.

pub mod gate;
mod hydrate;
pub mod id;
pub mod runtime;

pub use gate::Gate;
pub use id::JobId;
pub use runtime::{JobDefaults, JobRuntime, TickOutcome};

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration as StdDuration;

use oj_checkpoint::{read_checkpoint, write_checkpoint, SchedulerSnapshot};
use oj_core::{Clock, ConfigError, SchedulerError, SystemClock};
use oj_registry::JobRegistry;
use parking_lot::Mutex;

/// Idle-poll period, join-poll period, and worker tick cadence — one
/// tunable constant shared by all three (spec: reference value 0.5s).
pub const TICK_INTERVAL: StdDuration = StdDuration::from_millis(500);

type JobHandle = Arc<Mutex<JobRuntime>>;
type JobList = Mutex<VecDeque<JobHandle>>;

/// Holds the active/waiting pools and drives the round-robin loop.
///
/// Generic over [`Clock`] so tests can swap in a [`oj_core::FakeClock`];
/// production code goes through [`Scheduler::instance`], which is pinned
/// to [`SystemClock`] and enforces the process-wide singleton spec.md §3.3
/// asks for. [`Scheduler::with_clock`] builds an independent instance that
/// bypasses the singleton — the escape hatch tests need to run more than
/// one scheduler in one process (see DESIGN.md).
pub struct Scheduler<C: Clock = SystemClock> {
    pool_size: usize,
    lockfile_path: PathBuf,
    clock: C,
    registry: JobRegistry,
    active: JobList,
    waiting: JobList,
    cursor: Mutex<usize>,
    gate: Gate,
    loop_running: AtomicBool,
    worker: Mutex<Option<std::thread::JoinHandle<()>>>,
    self_ref: Weak<Scheduler<C>>,
}

impl Scheduler<SystemClock> {
    /// The process-wide singleton. The first call wins: later calls with
    /// different arguments still return the instance already running
    /// (spec.md §3.3).
    pub fn instance(
        pool_size: usize,
        lockfile_path: impl Into<PathBuf>,
    ) -> Result<Arc<Self>, ConfigError> {
        static SINGLETON: OnceLock<Arc<Scheduler<SystemClock>>> = OnceLock::new();
        if let Some(existing) = SINGLETON.get() {
            return Ok(existing.clone());
        }
        let candidate = Self::with_clock(pool_size, lockfile_path.into(), SystemClock::default())?;
        Ok(SINGLETON.get_or_init(|| candidate).clone())
    }
}

impl<C: Clock + 'static> Scheduler<C> {
    /// Build an independent scheduler bound to `clock`, registered with
    /// the built-in job kinds. Does not participate in the singleton.
    pub fn with_clock(
        pool_size: usize,
        lockfile_path: PathBuf,
        clock: C,
    ) -> Result<Arc<Self>, ConfigError> {
        Self::with_clock_and_registry(pool_size, lockfile_path, clock, JobRegistry::with_builtins())
    }

    /// Same as [`Scheduler::with_clock`] but with a caller-supplied
    /// registry — useful for a CLI binary that only wants to link in a
    /// subset of job kinds, or registers its own.
    pub fn with_clock_and_registry(
        pool_size: usize,
        lockfile_path: PathBuf,
        clock: C,
        registry: JobRegistry,
    ) -> Result<Arc<Self>, ConfigError> {
        if pool_size == 0 {
            return Err(ConfigError::NonPositivePoolSize(0));
        }
        Ok(Arc::new_cyclic(|self_ref| Self {
            pool_size,
            lockfile_path,
            clock,
            registry,
            active: Mutex::new(VecDeque::new()),
            waiting: Mutex::new(VecDeque::new()),
            cursor: Mutex::new(0),
            gate: Gate::new(),
            loop_running: AtomicBool::new(false),
            worker: Mutex::new(None),
            self_ref: self_ref.clone(),
        }))
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn lockfile_path(&self) -> &std::path::Path {
        &self.lockfile_path
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn active_len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting.lock().len()
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Construct a [`JobRuntime`] from a job kind and its defaults, ready
    /// to pass to [`Scheduler::schedule`].
    pub fn build_job(&self, job: Box<dyn oj_jobs::Job>, defaults: JobDefaults) -> JobHandle {
        Arc::new(Mutex::new(JobRuntime::new(job, defaults, &self.clock)))
    }

    /// Pauses the loop, places `job` (and any dependencies it carries)
    /// onto `active` if there's strictly enough headroom for both, else
    /// onto `waiting`; resumes the loop.
    ///
    /// The `<` (not `<=`) capacity check is preserved from the reference
    /// byte-for-byte (spec.md §9 Open Questions #1): a job that would
    /// exactly fill the pool is routed to waiting, not active.
    pub fn schedule(&self, job: JobHandle) -> Result<(), ConfigError> {
        reject_cycles(&job)?;

        self.gate.pause();
        let dependencies = job.lock().dependencies().to_vec();
        {
            let mut active = self.active.lock();
            if active.len() + dependencies.len() < self.pool_size {
                active.extend(dependencies);
                active.push_back(job);
            } else {
                drop(active);
                let mut waiting = self.waiting.lock();
                waiting.extend(dependencies);
                waiting.push_back(job);
            }
        }
        self.gate.resume();
        Ok(())
    }

    /// Starts the worker thread if it isn't already running, then
    /// releases the pause gate.
    pub fn run(&self) {
        if !self.loop_running.swap(true, Ordering::SeqCst) {
            match self.self_ref.upgrade() {
                Some(scheduler) => {
                    let spawned =
                        std::thread::Builder::new().name("oj-scheduler".to_string()).spawn(move || {
                            scheduler.run_loop();
                        });
                    match spawned {
                        Ok(handle) => *self.worker.lock() = Some(handle),
                        Err(err) => {
                            tracing::error!(%err, "failed to spawn scheduler worker thread");
                            self.loop_running.store(false, Ordering::SeqCst);
                        }
                    }
                }
                None => {
                    tracing::error!("scheduler has no surviving Arc handle to hand its worker thread");
                    self.loop_running.store(false, Ordering::SeqCst);
                }
            }
        }
        self.gate.resume();
    }

    /// Acquires the pause gate; idempotent.
    pub fn pause(&self) {
        self.gate.pause();
    }

    /// Pauses, stops every active job, writes a checkpoint (waiting
    /// entries snapshotted before active ones, per spec.md §4.4), then
    /// clears both lists.
    pub fn stop(&self) -> Result<(), SchedulerError> {
        self.gate.pause();

        let mut active = self.active.lock();
        for job in active.iter() {
            job.lock().stop();
        }

        let waiting = self.waiting.lock();
        let waiting_snapshots = waiting.iter().map(|job| job.lock().snapshot()).collect();
        let active_snapshots = active.iter().map(|job| job.lock().snapshot()).collect();
        let snapshot = SchedulerSnapshot { active: active_snapshots, waiting: waiting_snapshots };

        write_checkpoint(&self.lockfile_path, &snapshot)
            .map_err(|err| SchedulerError::Checkpoint(err.to_string()))?;

        drop(waiting);
        active.clear();
        self.waiting.lock().clear();
        Ok(())
    }

    /// Reads the checkpoint, rehydrates every entry through the job
    /// registry, and re-sorts the saved `active` list across the pool
    /// boundary: the first `pool_size` entries become active, the rest —
    /// plus all saved `waiting` entries — become waiting, order preserved
    /// (spec.md §6.3).
    pub fn restart(&self) -> Result<(), SchedulerError> {
        let snapshot = read_checkpoint(&self.lockfile_path)
            .map_err(|err| SchedulerError::Checkpoint(err.to_string()))?;

        self.gate.pause();

        let (saved_active, saved_waiting) =
            hydrate::hydrate_snapshot(&snapshot, &self.registry, &self.clock)?;

        let mut active = self.active.lock();
        let mut waiting = self.waiting.lock();
        active.clear();
        waiting.clear();

        let mut overflow = VecDeque::from(saved_active);
        for job in overflow.drain(..self.pool_size.min(overflow.len())) {
            active.push_back(job);
        }
        waiting.extend(overflow);
        waiting.extend(saved_waiting);

        drop(active);
        drop(waiting);
        *self.cursor.lock() = 0;
        self.gate.resume();
        Ok(())
    }

    /// Blocks the caller until both lists are empty, polling under lock
    /// at the tick cadence.
    pub fn join(&self) {
        loop {
            let empty = {
                let active = self.active.lock();
                let waiting = self.waiting.lock();
                active.is_empty() && waiting.is_empty()
            };
            if empty {
                return;
            }
            std::thread::sleep(TICK_INTERVAL);
        }
    }

    fn run_loop(self: Arc<Self>) {
        loop {
            self.gate.wait_if_paused();

            let current = {
                let active = self.active.lock();
                if active.is_empty() {
                    None
                } else {
                    let idx = *self.cursor.lock() % active.len();
                    Some(active[idx].clone())
                }
            };

            let Some(job) = current else {
                std::thread::sleep(TICK_INTERVAL);
                continue;
            };

            if job.lock().is_finished() {
                let mut active = self.active.lock();
                if let Some(pos) = active.iter().position(|candidate| Arc::ptr_eq(candidate, &job))
                {
                    active.remove(pos);
                }
                if active.len() < self.pool_size {
                    // Promotion pops the waiting list's tail — LIFO against
                    // insertion order. Preserved from the reference even
                    // though it looks backwards (spec.md §9 Open Questions #3).
                    if let Some(promoted) = self.waiting.lock().pop_back() {
                        active.push_back(promoted);
                    }
                }
            } else {
                job.lock().tick(&self.clock);
            }

            let mut cursor = self.cursor.lock();
            let active_len = self.active.lock().len();
            *cursor = if active_len == 0 { 0 } else { (*cursor + 1) % active_len };
        }
    }
}

/// DFS over the dependency closure of a not-yet-scheduled job, checking
/// for a cycle via `Arc` pointer identity. Dependencies are only ever
/// wired in at `JobRuntime` construction time and never mutated after, so
/// a job cannot structurally reference itself — this check exists to
/// surface `ConfigError::CyclicDependency` the moment that invariant is
/// ever violated rather than stack-overflowing somewhere downstream.
fn reject_cycles(job: &JobHandle) -> Result<(), ConfigError> {
    fn visit(root: *const Mutex<JobRuntime>, node: &JobHandle, seen: &mut Vec<*const Mutex<JobRuntime>>) -> bool {
        let ptr = Arc::as_ptr(node);
        if ptr == root {
            return true;
        }
        if seen.contains(&ptr) {
            return false;
        }
        seen.push(ptr);
        node.lock().dependencies().iter().any(|dep| visit(root, dep, seen))
    }

    let root = Arc::as_ptr(job);
    let mut seen = Vec::new();
    let cyclic = job.lock().dependencies().iter().any(|dep| visit(root, dep, &mut seen));
    if cyclic {
        let job_id = job.lock().id().to_string();
        return Err(ConfigError::CyclicDependency { job_id });
    }
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
