// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses a `--job` flag's argument into a `(type_tag, payload)` pair the
//! job registry can build from.

use anyhow::{Context, Result};

/// `"infinite_job"` or `"file_job:{\"actions\":[...]}"` — a bare tag with
/// no payload defaults to `{}`.
pub fn parse(spec: &str) -> Result<(String, serde_json::Value)> {
    match spec.split_once(':') {
        Some((type_tag, json)) => {
            let payload = serde_json::from_str(json)
                .with_context(|| format!("job {type_tag:?} has invalid JSON payload: {json:?}"))?;
            Ok((type_tag.to_string(), payload))
        }
        None => Ok((spec.to_string(), serde_json::json!({}))),
    }
}

#[cfg(test)]
#[path = "job_spec_tests.rs"]
mod tests;
