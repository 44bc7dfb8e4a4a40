//! Process-wide result accounting.
use std::{
    io::Write,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use fm_model::ResultRecord;
use tracing::{debug, info, warn};

use crate::error::FailedRuns;

/// Sink for terminal records.
///
/// Called concurrently from every worker; each call must emit its record as one unit.
pub trait Reporter: Send + Sync + 'static {
    fn report(&self, record: &ResultRecord);
}

/// Novel records to stdout, failures to stderr, one locked write per record.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, record: &ResultRecord) {
        let rendered = format!("{record}\n");
        let _ = if record.is_failure() {
            std::io::stderr().lock().write_all(rendered.as_bytes())
        } else {
            std::io::stdout().lock().write_all(rendered.as_bytes())
        };
    }
}

/// Owns the failure counter. Workers only ever add to it; the driver reads it once at the end.
pub struct Aggregator {
    failures: AtomicUsize,
    novel: AtomicUsize,
    reporter: Arc<dyn Reporter>,
}

impl Aggregator {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self {
            failures: AtomicUsize::new(0),
            novel: AtomicUsize::new(0),
            reporter,
        }
    }

    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleReporter))
    }

    pub fn record(&self, record: ResultRecord) {
        match &record {
            ResultRecord::Failed { command, .. } => {
                self.failures.fetch_add(1, Ordering::AcqRel);
                debug!(target: "fm.core.aggregate", %command, "run failed");
            }
            ResultRecord::Novel {
                command,
                fingerprint,
            } => {
                self.novel.fetch_add(1, Ordering::AcqRel);
                warn!(target: "fm.core.aggregate", %command, %fingerprint, "unknown fingerprint");
            }
        }
        self.reporter.report(&record);
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Acquire)
    }

    pub fn novel(&self) -> usize {
        self.novel.load(Ordering::Acquire)
    }

    /// Overall verdict: fatal iff any single-source run failed.
    pub fn finish(&self, runner: &str) -> Result<(), FailedRuns> {
        let count = self.failures();
        info!(target: "fm.core.aggregate", failures = count, novel = self.novel(), "all work resolved");
        if count == 0 {
            return Ok(());
        }
        Err(FailedRuns {
            count,
            runner: runner.to_string(),
        })
    }
}
