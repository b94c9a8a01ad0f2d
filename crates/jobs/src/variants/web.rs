// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetches a list of URLs one at a time, pushing each response body onto a
//! shared queue. A non-2xx response consumes a retry rather than failing
//! the job outright.

use std::sync::Arc;

use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::job::{Cursor, Job, StepOutcome};

pub const DEFAULT_URLS: &[&str] = &[
    "https://google.com/",
    "https://ya.ru/",
    "https://www.rambler.ru/",
    "https://www.yahoo.com/",
    "https://www.bing.com/",
];

pub type SharedQueue = Arc<Mutex<VecDeque<String>>>;

pub struct WebJob {
    urls: Vec<String>,
    queue: Option<SharedQueue>,
}

impl WebJob {
    pub fn new(urls: Vec<String>, queue: Option<SharedQueue>) -> Self {
        Self { urls, queue }
    }

    pub fn with_defaults(queue: Option<SharedQueue>) -> Self {
        Self::new(DEFAULT_URLS.iter().map(|s| s.to_string()).collect(), queue)
    }
}

impl Job for WebJob {
    fn type_tag(&self) -> &'static str {
        "web_job"
    }

    fn new_cursor(&self) -> Box<dyn Cursor> {
        Box::new(WebCursor {
            urls: self.urls.clone(),
            queue: self.queue.clone(),
            index: 0,
            client: reqwest::blocking::Client::new(),
        })
    }

    fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "urls": self.urls })
    }
}

struct WebCursor {
    urls: Vec<String>,
    queue: Option<SharedQueue>,
    index: usize,
    client: reqwest::blocking::Client,
}

impl Cursor for WebCursor {
    fn advance(&mut self) -> StepOutcome {
        let Some(url) = self.urls.get(self.index).cloned() else {
            return StepOutcome::Exhausted;
        };

        match self.client.get(&url).send().and_then(|resp| resp.error_for_status()) {
            Ok(response) => match response.text() {
                Ok(body) => {
                    tracing::info!(url = %url, bytes = body.len(), "fetched url");
                    if let Some(queue) = &self.queue {
                        queue.lock().push_back(body);
                    }
                    self.index += 1;
                    StepOutcome::Yielded
                }
                Err(err) => {
                    tracing::error!(url = %url, %err, "failed reading response body");
                    StepOutcome::RetryRequested
                }
            },
            Err(err) => {
                tracing::error!(url = %url, %err, "request failed");
                StepOutcome::RetryRequested
            }
        }
    }
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod tests;
