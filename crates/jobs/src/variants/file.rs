// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reads and writes files, shuttling content through a shared queue.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::job::{Cursor, Job, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    Read,
    Write,
    Append,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAction {
    pub mode: FileMode,
    pub path: PathBuf,
}

/// A queue shared between file actions within one job, letting a `read`
/// action feed a later `write`/`append` action.
pub type SharedQueue = Arc<Mutex<VecDeque<String>>>;

pub struct FileJob {
    actions: Vec<FileAction>,
    queue: SharedQueue,
}

impl FileJob {
    pub fn new(actions: Vec<FileAction>, queue: SharedQueue) -> Self {
        Self { actions, queue }
    }
}

impl Job for FileJob {
    fn type_tag(&self) -> &'static str {
        "file_job"
    }

    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(FileCursor {
            actions: self.actions.clone(),
            queue: self.queue.clone(),
            index: 0,
        })
    }

    fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "actions": self.actions })
    }
}

struct FileCursor {
    actions: Vec<FileAction>,
    queue: SharedQueue,
    index: usize,
}

impl Cursor for FileCursor {
    fn advance(&mut self) -> StepOutcome {
        let Some(action) = self.actions.get(self.index).cloned() else {
            return StepOutcome::Exhausted;
        };
        self.index += 1;

        // Each action is independently fallible; a failing action is
        // logged and the job moves on to the next one rather than
        // aborting the whole run.
        match action.mode {
            FileMode::Write | FileMode::Append => {
                let mut queue = self.queue.lock();
                if let Some(content) = queue.pop_front() {
                    let append = matches!(action.mode, FileMode::Append);
                    if let Err(err) = write_file(&action.path, &content, append) {
                        tracing::error!(path = %action.path.display(), %err, "file write failed");
                    }
                }
            }
            FileMode::Read => {
                if !action.path.exists() {
                    tracing::error!(
                        path = %action.path.display(),
                        "cannot read file: file is missing"
                    );
                } else {
                    match fs::read_to_string(&action.path) {
                        Ok(content) => self.queue.lock().push_back(content),
                        Err(err) => {
                            tracing::error!(path = %action.path.display(), %err, "file read failed");
                        }
                    }
                }
            }
        }

        StepOutcome::Yielded
    }
}

fn write_file(path: &std::path::Path, content: &str, append: bool) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    file.write_all(content.as_bytes())
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
