use async_trait::async_trait;
use fm_model::{Flag, RunOutput, Source};

use crate::error::ExecResult;

/// The external program that actually executes sources.
///
/// Implementations run `sources` with `flags` to completion and report the buffered result.
/// A failed run is `Ok(RunOutput { succeeded: false, .. })`; `Err` is reserved for the runner
/// not being runnable at all (spawn or pipe failure).
#[async_trait]
pub trait Runner: Send + Sync + 'static {
    /// Short identifier used in logs and in the final failure summary.
    fn name(&self) -> &str;

    /// The command line an invocation with these arguments corresponds to.
    fn command_line(&self, sources: &[Source], flags: &[Flag]) -> String;

    async fn run(&self, sources: &[Source], flags: &[Flag]) -> ExecResult<RunOutput>;
}
