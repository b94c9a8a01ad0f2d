// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic read/write of a [`SchedulerSnapshot`] to a single lockfile.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::snapshot::SchedulerSnapshot;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("I/O error writing checkpoint at {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("malformed checkpoint document at {path}: {source}")]
    Decode { path: PathBuf, #[source] source: serde_json::Error },
}

/// Write `snapshot` to `path`, replacing its previous contents atomically.
///
/// The write goes to a temp file in the same directory as `path`, then
/// `rename`s over it — on any POSIX filesystem (and on Windows via
/// `std::fs::rename`'s same-volume guarantee) this means a reader never
/// observes a partially-written document.
pub fn write_checkpoint(path: &Path, snapshot: &SchedulerSnapshot) -> Result<(), CheckpointError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = dir.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("checkpoint")
    ));

    let text = serde_json::to_string_pretty(snapshot)
        .map_err(|source| CheckpointError::Decode { path: path.to_path_buf(), source })?;

    fs::write(&tmp_path, text).map_err(|source| CheckpointError::Io { path: tmp_path.clone(), source })?;
    fs::rename(&tmp_path, path).map_err(|source| CheckpointError::Io { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), "wrote checkpoint");
    Ok(())
}

/// Read a [`SchedulerSnapshot`] from `path`. A missing file is treated as
/// an empty snapshot, not an error, since "no checkpoint yet" is a normal
/// startup state.
pub fn read_checkpoint(path: &Path) -> Result<SchedulerSnapshot, CheckpointError> {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text)
            .map_err(|source| CheckpointError::Decode { path: path.to_path_buf(), source }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(SchedulerSnapshot::default()),
        Err(source) => Err(CheckpointError::Io { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
