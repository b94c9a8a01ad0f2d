// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A job with no work: one step, then done.

use crate::job::{Cursor, Job, StepOutcome};

pub struct EmptyJob;

impl Job for EmptyJob {
    fn type_tag(&self) -> &'static str {
        "empty_job"
    }

    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(EmptyCursor { done: false })
    }

    fn payload(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

struct EmptyCursor {
    done: bool,
}

impl Cursor for EmptyCursor {
    fn advance(&mut self) -> StepOutcome {
        if self.done {
            StepOutcome::Exhausted
        } else {
            self.done = true;
            StepOutcome::Yielded
        }
    }
}

#[cfg(test)]
#[path = "empty_tests.rs"]
mod tests;
