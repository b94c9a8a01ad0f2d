// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end: three jobs chained by two in-memory queues converge to a
//! correct result under pure round-robin stepping, with no explicit
//! signaling between stages (spec.md §8.4 scenario 5).

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::sync::Arc;

use oj_core::FakeClock;
use oj_jobs::{Cursor, Job, StepOutcome};
use oj_scheduler::{JobDefaults, Scheduler};
use parking_lot::Mutex;
use tempfile::tempdir;

type Queue = Arc<Mutex<VecDeque<i64>>>;

struct ProducerCursor {
    next: i64,
    limit: i64,
    out: Queue,
}
impl Cursor for ProducerCursor {
    fn advance(&mut self) -> StepOutcome {
        if self.next >= self.limit {
            return StepOutcome::Exhausted;
        }
        self.out.lock().push_back(self.next);
        self.next += 1;
        StepOutcome::Yielded
    }
}
struct ProducerJob {
    limit: i64,
    out: Queue,
}
impl Job for ProducerJob {
    fn type_tag(&self) -> &'static str {
        "test_producer"
    }
    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(ProducerCursor { next: 0, limit: self.limit, out: self.out.clone() })
    }
    fn payload(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

struct SquareCursor {
    produced: i64,
    limit: i64,
    input: Queue,
    output: Queue,
}
impl Cursor for SquareCursor {
    fn advance(&mut self) -> StepOutcome {
        if self.produced >= self.limit {
            return StepOutcome::Exhausted;
        }
        if let Some(value) = self.input.lock().pop_front() {
            self.output.lock().push_back(value * value);
            self.produced += 1;
        }
        StepOutcome::Yielded
    }
}
struct SquareJob {
    limit: i64,
    input: Queue,
    output: Queue,
}
impl Job for SquareJob {
    fn type_tag(&self) -> &'static str {
        "test_square"
    }
    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(SquareCursor {
            produced: 0,
            limit: self.limit,
            input: self.input.clone(),
            output: self.output.clone(),
        })
    }
    fn payload(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

struct SinkCursor {
    written: i64,
    limit: i64,
    input: Queue,
    path: std::path::PathBuf,
}
impl Cursor for SinkCursor {
    fn advance(&mut self) -> StepOutcome {
        if self.written >= self.limit {
            return StepOutcome::Exhausted;
        }
        if let Some(value) = self.input.lock().pop_front() {
            let mut file = fs::OpenOptions::new().create(true).append(true).open(&self.path).unwrap();
            writeln!(file, "{value}").unwrap();
            self.written += 1;
        }
        StepOutcome::Yielded
    }
}
struct SinkJob {
    limit: i64,
    input: Queue,
    path: std::path::PathBuf,
}
impl Job for SinkJob {
    fn type_tag(&self) -> &'static str {
        "test_sink"
    }
    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(SinkCursor { written: 0, limit: self.limit, input: self.input.clone(), path: self.path.clone() })
    }
    fn payload(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

#[test]
fn pipeline_converges_without_explicit_signaling() {
    let dir = tempdir().unwrap();
    let lockfile = dir.path().join("pipeline.lock");
    let output_path = dir.path().join("sums.txt");

    let queue_a: Queue = Arc::new(Mutex::new(VecDeque::new()));
    let queue_b: Queue = Arc::new(Mutex::new(VecDeque::new()));
    let limit = 10;

    let scheduler = Scheduler::with_clock(3, lockfile, FakeClock::new()).unwrap();

    let producer =
        scheduler.build_job(Box::new(ProducerJob { limit, out: queue_a.clone() }), JobDefaults::default());
    let square = scheduler.build_job(
        Box::new(SquareJob { limit, input: queue_a, output: queue_b.clone() }),
        JobDefaults::default(),
    );
    let sink = scheduler.build_job(
        Box::new(SinkJob { limit, input: queue_b, path: output_path.clone() }),
        JobDefaults::default(),
    );

    scheduler.schedule(producer).unwrap();
    scheduler.schedule(square).unwrap();
    scheduler.schedule(sink).unwrap();

    scheduler.run();
    scheduler.join();

    let contents = fs::read_to_string(&output_path).unwrap();
    let sum: i64 = contents.lines().map(|line| line.parse::<i64>().unwrap()).sum();
    let expected: i64 = (0..limit).map(|i| i * i).sum();
    assert_eq!(sum, expected);
}
