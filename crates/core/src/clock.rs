// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable, timezone-aware time handling.

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A clock that provides the current, timezone-aware time.
///
/// Timestamps are offset-aware so that durations computed against them are
/// unambiguous across daylight-saving transitions and so that a checkpoint
/// written in one offset can be read back and compared in another.
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Real system clock, fixed to a configured UTC offset.
#[derive(Clone)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// `Europe/Moscow` (UTC+3), the zone the reference implementation pinned
    /// its job clock to. Falls back to UTC in the unreachable case that
    /// `+3:00` is ever rejected as an offset.
    pub fn moscow() -> Self {
        Self::new(FixedOffset::east_opt(3 * 3600).unwrap_or_else(|| Utc.fix()))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Fake clock for testing with controllable, monotonically-advanced time.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        // 2024-01-01T00:00:00Z as Unix seconds; falls back to the Unix
        // epoch in the unreachable case that timestamp is ever rejected.
        let epoch = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default();
        Self { current: Arc::new(Mutex::new(epoch.fixed_offset())) }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut guard = self.current.lock();
        *guard += duration;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, instant: DateTime<FixedOffset>) {
        *self.current.lock() = instant;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.current.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
