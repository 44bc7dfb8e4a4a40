//! Splitting one job into worker-sized batches.
use std::sync::Arc;

use fm_model::{Flag, Source};
use rand::seq::SliceRandom;
use tracing::Span;

use crate::work::WorkItem;

/// Split `sources` into at most `batches` non-empty work items.
///
/// The sources are shuffled first. Catalog order tends to group similarly expensive sources,
/// so shuffling approximates evenly sized batches; the order is not reproducible and callers
/// must not depend on it. Empty input yields no items.
pub fn split(sources: &[Source], flags: &[Flag], batches: usize, span: &Span) -> Vec<WorkItem> {
    if sources.is_empty() {
        return Vec::new();
    }

    let mut shuffled = sources.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());

    let size = shuffled.len().div_ceil(batches.max(1));
    let flags: Arc<[Flag]> = flags.into();

    shuffled
        .chunks(size)
        .map(|chunk| WorkItem::new(chunk.to_vec(), Arc::clone(&flags), span.clone()))
        .collect()
}
