// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! spec.md §8.4 scenario 4: two jobs with a 1s working-time budget and no
//! retries both terminate once their timeout is hit.

use std::time::Duration as StdDuration;

use oj_core::FakeClock;
use oj_jobs::{Cursor, Job, StepOutcome};
use oj_scheduler::{JobDefaults, Scheduler};
use tempfile::tempdir;

/// Sleeps past the working-time budget on every step, so a single
/// `advance()` call is enough to trip `check_timeout` on the tick after —
/// unlike an instant-step job, which would need real wall-clock seconds'
/// worth of busy-looping ticks to accumulate the same `time_since_start`.
struct SleepyCursor {
    sleep: StdDuration,
}
impl Cursor for SleepyCursor {
    fn advance(&mut self) -> StepOutcome {
        std::thread::sleep(self.sleep);
        StepOutcome::Yielded
    }
}
struct SleepyJob {
    sleep: StdDuration,
}
impl Job for SleepyJob {
    fn type_tag(&self) -> &'static str {
        "test_sleepy_job"
    }
    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(SleepyCursor { sleep: self.sleep })
    }
    fn payload(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

#[test]
fn exhausted_timeout_with_no_retries_finishes_both_jobs() {
    let dir = tempdir().unwrap();
    let lockfile = dir.path().join("timeout.lock");

    let scheduler = Scheduler::with_clock(2, lockfile, FakeClock::new()).unwrap();

    let defaults = || JobDefaults { max_working_time: 1, tries: 0, ..JobDefaults::default() };
    let sleepy = || Box::new(SleepyJob { sleep: StdDuration::from_millis(1100) });
    scheduler.schedule(scheduler.build_job(sleepy(), defaults())).unwrap();
    scheduler.schedule(scheduler.build_job(sleepy(), defaults())).unwrap();

    scheduler.run();
    scheduler.join();

    assert_eq!(scheduler.active_len(), 0);
}
