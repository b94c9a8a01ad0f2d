// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A job that never finishes on its own — useful for exercising capacity
//! and timeout behavior, where the scheduler (not the job) decides when
//! the job stops occupying a pool slot.

use crate::job::{Cursor, Job, StepOutcome};

pub struct InfiniteJob;

impl Job for InfiniteJob {
    fn type_tag(&self) -> &'static str {
        "infinite_job"
    }

    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(InfiniteCursor)
    }

    fn payload(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

struct InfiniteCursor;

impl Cursor for InfiniteCursor {
    fn advance(&mut self) -> StepOutcome {
        StepOutcome::Yielded
    }
}

#[cfg(test)]
#[path = "infinite_tests.rs"]
mod tests;
