// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event loop's pause/resume primitive.
//!
//! A bare mutex held for the loop's whole duration is fragile: any other
//! call that also needs the lock (inspecting state for `stop()`, say)
//! blocks behind an arbitrarily long pause. This gate instead exposes an
//! atomic flag the loop polls between ticks, plus a condition variable so
//! `pause()`/`resume()` don't have to busy-wait.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Condvar, Mutex};

pub struct Gate {
    paused: AtomicBool,
    lock: Mutex<()>,
    condvar: Condvar,
}

impl Gate {
    pub fn new() -> Self {
        Self { paused: AtomicBool::new(false), lock: Mutex::new(()), condvar: Condvar::new() }
    }

    /// Idempotent: pausing an already-paused gate is a no-op.
    pub fn pause(&self) {
        let _guard = self.lock.lock();
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Idempotent: resuming an already-running gate is a no-op, and any
    /// thread currently blocked in [`Gate::wait_if_paused`] wakes up.
    ///
    /// The flag flip happens under `lock` so it synchronizes with a waiter
    /// parked in `wait_if_paused` — otherwise a `notify_all` landing between
    /// the waiter's `load` and its `condvar.wait` call is lost, and the
    /// worker sleeps past this resume until some later pause/resume cycle.
    pub fn resume(&self) {
        let _guard = self.lock.lock();
        self.paused.store(false, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Blocks the calling thread while the gate is paused. Returns
    /// immediately if it isn't.
    pub fn wait_if_paused(&self) {
        let mut guard = self.lock.lock();
        while self.paused.load(Ordering::SeqCst) {
            self.condvar.wait(&mut guard);
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
