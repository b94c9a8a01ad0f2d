// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error kinds used across the scheduler crates.

use thiserror::Error;

/// Errors raised when a scheduler is misconfigured or a caller asks it to
/// do something structurally impossible.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pool_size must be positive, got {0}")]
    NonPositivePoolSize(i64),

    #[error("dependency cycle detected while scheduling job {job_id}")]
    CyclicDependency { job_id: String },
}

/// Top-level error type a scheduler operation can fail with.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("checkpoint operation failed: {0}")]
    Checkpoint(String),

    #[error("no constructor registered for job type {type_tag:?}")]
    UnknownJobType { type_tag: String },
}
