use std::path::PathBuf;

use clap::Parser;
use fm_observe::LoggerFormat;

/// Run fm over batches of gms, tests and images, re-running failing or novel batches one
/// source at a time.
///
/// A job is a list of sources, shorthand groups (`gms`, `tests`, `imgs`, `skps`, `svgs`)
/// and `key=value` flags, e.g. `gms b=cpu ct=8888`. Everything after `#` is a comment.
#[derive(Debug, Parser)]
#[command(name = "fm-driver", version)]
pub struct Args {
    /// The fm binary to drive.
    pub runner: PathBuf,

    /// One ad hoc job to run.
    #[arg(trailing_var_arg = true)]
    pub job: Vec<String>,

    /// Passed to fm -i.
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// Directory whose images make up the `imgs` group.
    #[arg(long, value_name = "DIR")]
    pub imgs: Option<PathBuf>,

    /// Directory whose .skp files make up the `skps` group.
    #[arg(long, value_name = "DIR")]
    pub skps: Option<PathBuf>,

    /// Directory whose .svg files make up the `svgs` group.
    #[arg(long, value_name = "DIR")]
    pub svgs: Option<PathBuf>,

    /// File with one job per line, or `-` for stdin.
    #[arg(long, value_name = "FILE")]
    pub script: Option<String>,

    /// Fetch known hashes from Gold and report any output it has never seen.
    #[arg(long)]
    pub gold: bool,

    #[arg(long, value_name = "URL", default_value = fm_gold::DEFAULT_HASHES_URL)]
    pub gold_url: String,

    /// Also run the standard jobs for this CI bot.
    #[arg(long, value_name = "NAME")]
    pub bot: Option<String>,

    /// Worker count; defaults to the number of CPUs.
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Kill and fail any single fm invocation running longer than this.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, env = "FM_LOG", default_value = "info")]
    pub log_level: String,

    /// text, json or journald.
    #[arg(long, default_value = "text")]
    pub log_format: LoggerFormat,

    /// Log how long each job and work item took.
    #[arg(long)]
    pub span_timing: bool,
}
