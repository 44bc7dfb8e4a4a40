use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("runner query `{flag}` failed: {source}")]
    Query {
        flag: String,
        #[source]
        source: fm_exec::ExecError,
    },

    #[error("walking {dir}: {source}")]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("bot name '{0}' does not look like <Role>-<OS>-<Compiler>-<Model>-<CPU|GPU>-...")]
    BadBotName(String),
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker pool is shut down")]
    Closed,
}

/// Terminal outcome of a run with at least one failed source.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{count} runs of {runner} failed after retries.")]
pub struct FailedRuns {
    pub count: usize,
    pub runner: String,
}
