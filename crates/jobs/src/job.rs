// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job contract: what a job *is*, independent of how the runtime steps it.

/// What happened when a cursor was asked to advance one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran; more steps may follow.
    Yielded,
    /// The job's work is complete; no more steps will be produced.
    Exhausted,
    /// The step's own body hit a recoverable failure and is asking to
    /// consume a retry, the same as a timeout would (ported from the
    /// web variant's `except HTTPError: self.retry()`).
    RetryRequested,
}

/// A single resumable run through a job's steps.
///
/// A cursor owns whatever state it needs to keep iterating (a cloned
/// action list and an index, typically) rather than borrowing the `Job`
/// that created it — that keeps soft reset a matter of dropping the old
/// cursor and asking for a fresh one, with no lifetime entanglement across
/// suspended steps.
pub trait Cursor: Send {
    fn advance(&mut self) -> StepOutcome;
}

/// The work a scheduled job performs, decoupled from scheduling concerns
/// (timing, retries, dependencies) which live on the runtime wrapper.
pub trait Job: Send + Sync {
    /// Stable tag used to rehydrate this job from a checkpoint via the
    /// job registry.
    fn type_tag(&self) -> &'static str;

    /// Start a fresh run through this job's steps.
    fn new_cursor(&self) -> Box<dyn Cursor>;

    /// Variant-specific fields to include in a checkpoint snapshot. Must
    /// not use the reserved common field names (`start_at`,
    /// `max_working_time`, `tries`, `dependencies`).
    fn payload(&self) -> serde_json::Value;
}
