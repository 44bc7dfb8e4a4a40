use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use fm_core::{Aggregator, Catalog, Isolator, WorkerPool, bot, job};
use fm_exec::{ProcRunner, Runner};
use fm_observe::logger_init;

mod cli;
mod config;
mod script;

use cli::Args;
use config::DriverConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = DriverConfig::from_args(Args::parse());

    // 1) Logger
    logger_init(&cfg.logger)?;
    debug!(?cfg, "configuration loaded");

    // 2) Runner
    let runner = Arc::new(
        ProcRunner::new(cfg.runner.clone()).context("please pass an fm binary")?,
    );

    // 3) Shorthand groups and known fingerprints; either failing aborts the run.
    let catalog = Catalog::discover(&runner, &cfg.dirs).await?;
    let known = fm_gold::load(&cfg.gold).await?;
    let verify = cfg.gold.enabled.then(|| Arc::new(known));

    // 4) Pool
    let results = Arc::new(Aggregator::console());
    let isolator = Arc::new(Isolator::new(
        runner.clone(),
        verify,
        Arc::clone(&results),
    ));
    let mut pool = WorkerPool::start(cfg.workers, isolator);
    info!(workers = pool.size(), runner = %cfg.runner_path().display(), "worker pool ready");

    // 5) Jobs: command line, then script, then bot plan.
    pool.kickoff(&job::parse(&cfg.jobs.inline, &catalog))?;

    if let Some(path) = &cfg.jobs.script {
        let reader = script::open(path)
            .await
            .with_context(|| format!("opening job script {path}"))?;
        let lines = script::for_each_job(reader, &catalog, |job| {
            pool.kickoff(&job)?;
            Ok(())
        })
        .await?;
        debug!(path, lines, "job script read");
    }

    if let Some(name) = &cfg.jobs.bot {
        for job in bot::plan(name, &catalog)? {
            pool.kickoff(&job)?;
        }
    }

    // 6) Wait for every batch and rerun, then report.
    pool.wait().await;
    pool.shutdown().await;

    results.finish(runner.name())?;
    Ok(())
}

