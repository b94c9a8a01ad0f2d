// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj inspect` - print a checkpoint file's shape without starting a
//! scheduler. There is no running daemon to query, so this reads the
//! lockfile directly (spec.md §1 Non-goals: no cross-process coordination).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use oj_checkpoint::read_checkpoint;

#[derive(Args)]
pub struct InspectArgs {
    /// Checkpoint file to read.
    #[arg(long, default_value = "scheduler.lock")]
    pub lockfile: PathBuf,

    /// Print the raw JSON document instead of a summary.
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let snapshot = read_checkpoint(&args.lockfile).context("reading checkpoint")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{}", args.lockfile.display());
    println!("  active:  {}", snapshot.active.len());
    for entry in &snapshot.active {
        println!("    - {} ({})", entry.id, entry.type_tag);
    }
    println!("  waiting: {}", snapshot.waiting.len());
    for entry in &snapshot.waiting {
        println!("    - {} ({})", entry.id, entry.type_tag);
    }

    Ok(())
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
