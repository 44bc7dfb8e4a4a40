//! Failure isolation.
//!
//! A batch that fails, or that produces fingerprints outside the known set, is re-run one
//! source at a time on the same worker until every source has its own verdict. Reruns are
//! sequential and never go back through the queue, so isolating a batch of `n` costs at most
//! `n` extra single-source runs.
use std::{future::Future, pin::Pin, sync::Arc};

use fm_exec::Runner;
use fm_gold::KnownFingerprints;
use fm_model::{Fingerprint, Flag, ResultRecord, RunOutput, Source};
use tracing::{debug, info, warn};

use crate::aggregate::Aggregator;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What to do after one runner invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing to report.
    Clean,
    /// Re-run each of these sources on its own.
    Isolate(Vec<Source>),
    /// A single source failed.
    Failed { stderr: Vec<String> },
    /// A single source succeeded with an unrecognized fingerprint.
    Novel { fingerprint: Fingerprint },
}

/// Decide the next step for a finished invocation of `sources`.
///
/// `known` is `None` when fingerprint verification is off.
pub fn classify(sources: &[Source], output: RunOutput, known: Option<&KnownFingerprints>) -> Verdict {
    let mut novel: Vec<(Source, Fingerprint)> = match known {
        Some(known) if output.succeeded => output
            .records
            .into_iter()
            .filter(|r| !known.contains(&r.fingerprint))
            .map(|r| (r.source, r.fingerprint))
            .collect(),
        _ => Vec::new(),
    };

    if sources.len() > 1 {
        if !output.succeeded {
            // Any member, or an interaction between members, could be the cause.
            return Verdict::Isolate(sources.to_vec());
        }
        if !novel.is_empty() {
            let mut reruns: Vec<Source> = Vec::with_capacity(novel.len());
            for (source, _) in novel {
                if !reruns.contains(&source) {
                    reruns.push(source);
                }
            }
            return Verdict::Isolate(reruns);
        }
        return Verdict::Clean;
    }

    if !output.succeeded {
        return Verdict::Failed {
            stderr: output.stderr,
        };
    }
    match novel.pop() {
        Some((_, fingerprint)) => Verdict::Novel { fingerprint },
        None => Verdict::Clean,
    }
}

/// Runs work items to a per-source verdict.
pub struct Isolator {
    runner: Arc<dyn Runner>,
    known: Option<Arc<KnownFingerprints>>,
    results: Arc<Aggregator>,
}

impl Isolator {
    pub fn new(
        runner: Arc<dyn Runner>,
        known: Option<Arc<KnownFingerprints>>,
        results: Arc<Aggregator>,
    ) -> Self {
        Self {
            runner,
            known,
            results,
        }
    }

    pub fn results(&self) -> &Arc<Aggregator> {
        &self.results
    }

    /// Run `sources` and recurse into singletons if the batch fails or is novel.
    ///
    /// Returns once every source has been resolved and its record (if any) emitted.
    pub fn resolve<'a>(&'a self, sources: Vec<Source>, flags: &'a [Flag]) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let output = self.invoke(&sources, flags).await;

            match classify(&sources, output, self.known.as_deref()) {
                Verdict::Clean => {
                    debug!(target: "fm.core.isolate", sources = sources.len(), "clean");
                }
                Verdict::Isolate(reruns) => {
                    info!(
                        target: "fm.core.isolate",
                        batch = sources.len(),
                        reruns = reruns.len(),
                        "isolating batch into single-source runs"
                    );
                    for source in reruns {
                        self.resolve(vec![source], flags).await;
                    }
                }
                Verdict::Failed { stderr } => {
                    self.results.record(ResultRecord::Failed {
                        command: self.runner.command_line(&sources, flags),
                        stderr,
                    });
                }
                Verdict::Novel { fingerprint } => {
                    self.results.record(ResultRecord::Novel {
                        command: self.runner.command_line(&sources, flags),
                        fingerprint,
                    });
                }
            }
        })
    }

    async fn invoke(&self, sources: &[Source], flags: &[Flag]) -> RunOutput {
        match self.runner.run(sources, flags).await {
            Ok(output) => output,
            Err(err) => {
                warn!(target: "fm.core.isolate", %err, "runner could not be invoked");
                RunOutput::failure(vec![err.to_string()])
            }
        }
    }
}
