use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use fm_core::CatalogDirs;
use fm_exec::ProcConfig;
use fm_gold::GoldConfig;
use fm_observe::LoggerConfig;

use crate::cli::Args;

/// Where jobs come from, in kickoff order.
#[derive(Debug, Clone, Default)]
pub struct JobSources {
    /// Tokens of the command-line job.
    pub inline: Vec<String>,
    /// `Some("-")` reads stdin.
    pub script: Option<String>,
    pub bot: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub logger: LoggerConfig,
    pub runner: ProcConfig,
    pub gold: GoldConfig,
    pub dirs: CatalogDirs,
    pub workers: usize,
    pub jobs: JobSources,
}

impl DriverConfig {
    pub fn from_args(args: Args) -> Self {
        let logger = LoggerConfig {
            format: args.log_format,
            level: args.log_level,
            span_timing: args.span_timing,
            ..Default::default()
        };

        Self {
            logger,
            runner: ProcConfig {
                program: args.runner,
                resources: args.resources,
                timeout: args.timeout_secs.map(Duration::from_secs),
            },
            gold: GoldConfig {
                enabled: args.gold,
                hashes_url: args.gold_url,
            },
            dirs: CatalogDirs {
                imgs: args.imgs,
                skps: args.skps,
                svgs: args.svgs,
            },
            workers: args.workers.filter(|&n| n > 0).unwrap_or_else(default_workers),
            jobs: JobSources {
                inline: args.job,
                script: args.script,
                bot: args.bot,
            },
        }
    }

    pub fn runner_path(&self) -> &PathBuf {
        &self.runner.program
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
