// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem maintenance actions: create a directory, touch a file,
//! delete (missing-ok), or move a path.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::job::{Cursor, Job, StepOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SystemAction {
    CreateDir { source: PathBuf },
    Create { source: PathBuf },
    Delete { source: PathBuf },
    Move { source: PathBuf, target: Option<PathBuf> },
}

pub struct SystemJob {
    actions: Vec<SystemAction>,
}

impl SystemJob {
    pub fn new(actions: Vec<SystemAction>) -> Self {
        Self { actions }
    }
}

impl Job for SystemJob {
    fn type_tag(&self) -> &'static str {
        "system_job"
    }

    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(SystemCursor { actions: self.actions.clone(), index: 0 })
    }

    fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "actions": self.actions })
    }
}

struct SystemCursor {
    actions: Vec<SystemAction>,
    index: usize,
}

impl Cursor for SystemCursor {
    fn advance(&mut self) -> StepOutcome {
        let Some(action) = self.actions.get(self.index).cloned() else {
            return StepOutcome::Exhausted;
        };

        // Unlike the file variant, a failing action here aborts all
        // remaining actions in this job rather than just being skipped —
        // ported from the reference wrapping its whole action loop in a
        // single try/except.
        let result = match &action {
            SystemAction::CreateDir { source } => fs::create_dir_all(source),
            SystemAction::Create { source } => source
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| {
                    fs::OpenOptions::new().create(true).write(true).open(source).map(|_| ())
                }),
            SystemAction::Delete { source } => match fs::remove_file(source) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err),
            },
            SystemAction::Move { source, target } => match target {
                Some(target) => fs::rename(source, target),
                None => Err(std::io::Error::other("no target path provided")),
            },
        };

        self.index += 1;
        match result {
            Ok(()) => StepOutcome::Yielded,
            Err(err) => {
                tracing::error!(?action, %err, "system action failed, aborting remaining actions");
                StepOutcome::Exhausted
            }
        }
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
