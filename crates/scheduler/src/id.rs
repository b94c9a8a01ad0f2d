// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

oj_core::define_id! {
    /// Identifies a single [`crate::runtime::JobRuntime`] for the lifetime
    /// of the process and across a checkpoint round-trip.
    pub struct JobId("job-");
}
