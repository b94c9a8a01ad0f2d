// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete job kinds.

pub mod empty;
pub mod file;
pub mod infinite;
pub mod system;
pub mod web;

pub use empty::EmptyJob;
pub use file::{FileAction, FileJob, FileMode};
pub use infinite::InfiniteJob;
pub use system::{SystemAction, SystemJob};
pub use web::{WebJob, DEFAULT_URLS};
