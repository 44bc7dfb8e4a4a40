use std::sync::Arc;

use fm_model::{Flag, Source};
use tracing::Span;

/// One unit of queued work: a batch of sources run together with one flag set.
///
/// Consumed exactly once by a worker. `span` is the logging scope of the job it came from.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub sources: Vec<Source>,
    pub flags: Arc<[Flag]>,
    pub span: Span,
}

impl WorkItem {
    pub fn new(sources: Vec<Source>, flags: Arc<[Flag]>, span: Span) -> Self {
        Self {
            sources,
            flags,
            span,
        }
    }

    pub fn sources_display(&self) -> String {
        self.sources
            .iter()
            .map(Source::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
