// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj run` - schedule jobs and drive the scheduler in the foreground.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use oj_core::SystemClock;
use oj_registry::JobRegistry;
use oj_scheduler::{JobDefaults, Scheduler};

use super::job_spec;

#[derive(Args)]
pub struct RunArgs {
    /// Maximum number of jobs active at once.
    #[arg(long, default_value_t = 10)]
    pub pool_size: usize,

    /// Checkpoint file read on `--resume` and written on exit.
    #[arg(long, default_value = "scheduler.lock")]
    pub lockfile: PathBuf,

    /// Rehydrate `active`/`waiting` from `--lockfile` before scheduling
    /// any jobs given on this invocation.
    #[arg(long)]
    pub resume: bool,

    /// A job to schedule, as `type_tag` or `type_tag:<json payload>`.
    /// Repeatable.
    #[arg(long = "job", value_name = "SPEC")]
    pub jobs: Vec<String>,

    /// Per-job working-time budget in seconds; non-positive disables
    /// the timeout (applies uniformly to every `--job` on this invocation).
    #[arg(long, default_value_t = -1)]
    pub max_working_time: i64,

    /// Per-job retry budget after the first attempt.
    #[arg(long, default_value_t = 0)]
    pub tries: u32,

    /// Stop and checkpoint after this many seconds instead of waiting for
    /// every job to finish on its own. Needed to ever get a checkpoint out
    /// of an `infinite_job` run.
    #[arg(long)]
    pub max_duration_secs: Option<u64>,
}

pub fn run(args: RunArgs) -> Result<()> {
    let registry = JobRegistry::with_builtins();
    let scheduler =
        Scheduler::with_clock_and_registry(args.pool_size, args.lockfile, SystemClock::default(), registry.clone())
            .map_err(|err| anyhow!(err.to_string()))?;

    if args.resume {
        scheduler.restart().context("restoring from checkpoint")?;
    }

    for spec in &args.jobs {
        let (type_tag, payload) = job_spec::parse(spec)?;
        let job = registry
            .build(&type_tag, &payload)
            .with_context(|| format!("building job of type {type_tag:?}"))?;
        let defaults =
            JobDefaults { max_working_time: args.max_working_time, tries: args.tries, ..JobDefaults::default() };
        let handle = scheduler.build_job(job, defaults);
        scheduler.schedule(handle).map_err(|err| anyhow!(err.to_string()))?;
    }

    tracing::info!(
        active = scheduler.active_len(),
        waiting = scheduler.waiting_len(),
        "scheduler starting"
    );
    scheduler.run();

    match args.max_duration_secs {
        Some(secs) => {
            std::thread::sleep(std::time::Duration::from_secs(secs));
            scheduler.stop().context("writing checkpoint on exit")?;
            tracing::info!("stopped after max-duration-secs elapsed");
        }
        None => {
            scheduler.join();
            tracing::info!("all jobs finished");
        }
    }

    Ok(())
}
