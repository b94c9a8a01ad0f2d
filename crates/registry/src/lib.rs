// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oj-registry: maps a job's `type_tag` to a constructor so a checkpointed
//! job can be rebuilt on restart without the caller naming its concrete
//! Rust type.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use oj_jobs::{EmptyJob, FileAction, FileJob, InfiniteJob, Job, SystemAction, SystemJob, WebJob};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no constructor registered for job type {0:?}")]
    Unknown(String),

    #[error("malformed payload for job type {type_tag:?}: {source}")]
    MalformedPayload { type_tag: String, #[source] source: serde_json::Error },
}

type Constructor = Arc<dyn Fn(&serde_json::Value) -> Result<Box<dyn Job>, RegistryError> + Send + Sync>;

/// A `type_tag` → constructor map used to rehydrate jobs from a checkpoint.
///
/// Unknown tags are a terminal failure for that single entry, not for the
/// whole restart — the caller decides whether to drop the entry or abort.
#[derive(Clone)]
pub struct JobRegistry {
    builders: Arc<RwLock<HashMap<String, Constructor>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self { builders: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// A registry pre-populated with the built-in job kinds.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register("empty_job", |_payload| Ok(Box::new(EmptyJob)));
        registry.register("infinite_job", |_payload| Ok(Box::new(InfiniteJob)));
        registry.register("file_job", |payload| {
            let actions: Vec<FileAction> = parse_field(payload, "actions", "file_job")?;
            Ok(Box::new(FileJob::new(actions, Arc::new(Mutex::new(Default::default())))) as Box<dyn Job>)
        });
        registry.register("system_job", |payload| {
            let actions: Vec<SystemAction> = parse_field(payload, "actions", "system_job")?;
            Ok(Box::new(SystemJob::new(actions)) as Box<dyn Job>)
        });
        registry.register("web_job", |payload| {
            let urls: Vec<String> = parse_field(payload, "urls", "web_job")?;
            Ok(Box::new(WebJob::new(urls, None)) as Box<dyn Job>)
        });
        registry
    }

    pub fn register<F>(&self, type_tag: impl Into<String>, builder: F)
    where
        F: Fn(&serde_json::Value) -> Result<Box<dyn Job>, RegistryError> + Send + Sync + 'static,
    {
        self.builders.write().insert(type_tag.into(), Arc::new(builder));
    }

    pub fn build(&self, type_tag: &str, payload: &serde_json::Value) -> Result<Box<dyn Job>, RegistryError> {
        let builder = self
            .builders
            .read()
            .get(type_tag)
            .cloned()
            .ok_or_else(|| RegistryError::Unknown(type_tag.to_string()))?;
        builder(payload)
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.builders.read().contains_key(type_tag)
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn parse_field<T: serde::de::DeserializeOwned>(
    payload: &serde_json::Value,
    field: &str,
    type_tag: &str,
) -> Result<T, RegistryError> {
    let value = payload.get(field).cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value)
        .map_err(|source| RegistryError::MalformedPayload { type_tag: type_tag.to_string(), source })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
