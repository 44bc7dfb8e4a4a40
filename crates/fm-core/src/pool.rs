//! Fixed-size worker pool draining one shared FIFO queue.
use std::sync::Arc;

use fm_model::Job;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span, trace};

use crate::{batch, error::PoolError, isolate::Isolator, wait::WaitGroup, work::WorkItem};

type Queue = Arc<Mutex<mpsc::UnboundedReceiver<WorkItem>>>;

pub struct WorkerPool {
    tx: mpsc::UnboundedSender<WorkItem>,
    queue: Queue,
    pending: Arc<WaitGroup>,
    isolator: Arc<Isolator>,
    shutdown: CancellationToken,
    workers: Vec<JoinHandle<()>>,
    size: usize,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one) on the current runtime.
    pub fn start(size: usize, isolator: Arc<Isolator>) -> Self {
        let size = size.max(1);
        let (tx, rx) = mpsc::unbounded_channel();
        let queue: Queue = Arc::new(Mutex::new(rx));
        let pending = Arc::new(WaitGroup::new());
        let shutdown = CancellationToken::new();

        let workers = (0..size)
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    Arc::clone(&queue),
                    Arc::clone(&isolator),
                    Arc::clone(&pending),
                    shutdown.child_token(),
                ))
            })
            .collect();

        debug!(target: "fm.core.pool", size, "worker pool started");
        Self {
            tx,
            queue,
            pending,
            isolator,
            shutdown,
            workers,
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn isolator(&self) -> &Arc<Isolator> {
        &self.isolator
    }

    /// Work items queued or running, isolation reruns included.
    pub fn pending(&self) -> usize {
        self.pending.pending()
    }

    /// Enqueue one item. Never blocks.
    pub fn submit(&self, item: WorkItem) -> Result<(), PoolError> {
        self.pending.add(1);
        self.tx.send(item).map_err(|_| {
            self.pending.done();
            PoolError::Closed
        })
    }

    /// Batch a job across the pool. Returns how many work items were queued.
    ///
    /// A job without sources (blank or commented-out line) queues nothing.
    pub fn kickoff(&self, job: &Job) -> Result<usize, PoolError> {
        if job.is_empty() {
            return Ok(0);
        }

        let span = info_span!(
            target: "fm.core.pool",
            "job",
            flags = %job.flags_display(),
            sources = job.sources.len()
        );
        let items = batch::split(&job.sources, &job.flags, self.size(), &span);
        let queued = items.len();
        for item in items {
            self.submit(item)?;
        }

        trace!(target: "fm.core.pool", parent: &span, batches = queued, "job queued");
        Ok(queued)
    }

    /// Block until every submitted item, and every rerun it spawned, is resolved.
    pub async fn wait(&self) {
        self.pending.wait().await;
    }

    /// Stop the workers once they finish their current item.
    ///
    /// Items still queued are dropped and marked done, so [`WorkerPool::wait`] returns.
    /// Later submits fail with [`PoolError::Closed`].
    pub async fn shutdown(&mut self) {
        self.shutdown.cancel();
        for handle in std::mem::take(&mut self.workers) {
            let _ = handle.await;
        }

        let mut rx = self.queue.lock().await;
        rx.close();
        let mut dropped = 0usize;
        while rx.try_recv().is_ok() {
            self.pending.done();
            dropped += 1;
        }
        debug!(target: "fm.core.pool", dropped, "worker pool stopped");
    }
}

/// Marks its item done even if resolving it panics.
struct Done<'a>(&'a WaitGroup);

impl Drop for Done<'_> {
    fn drop(&mut self) {
        self.0.done();
    }
}

async fn worker(
    id: usize,
    queue: Queue,
    isolator: Arc<Isolator>,
    pending: Arc<WaitGroup>,
    shutdown: CancellationToken,
) {
    loop {
        let next = {
            let mut rx = queue.lock().await;
            tokio::select! {
                _ = shutdown.cancelled() => None,
                item = rx.recv() => item,
            }
        };
        let Some(item) = next else {
            break;
        };

        let _done = Done(&pending);
        let span = info_span!(
            target: "fm.core.pool",
            parent: &item.span,
            "work",
            worker = id,
            sources = %item.sources_display()
        );
        isolator
            .resolve(item.sources, &item.flags)
            .instrument(span)
            .await;
    }
    trace!(target: "fm.core.pool", worker = id, "worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::Aggregator,
        catalog::Catalog,
        job,
        testing::{MemoryReporter, StubRunner},
    };

    use fm_model::{Flag, ResultRecord, Source};
    use std::{collections::HashSet, time::Duration};

    fn pool(
        size: usize,
        runner: StubRunner,
    ) -> (WorkerPool, Arc<StubRunner>, Arc<MemoryReporter>) {
        let runner = Arc::new(runner);
        let reporter = MemoryReporter::new();
        let results = Arc::new(Aggregator::new(reporter.clone()));
        let isolator = Arc::new(Isolator::new(runner.clone(), None, results));
        (WorkerPool::start(size, isolator), runner, reporter)
    }

    fn names(n: usize) -> Vec<Source> {
        (0..n).map(|i| Source::new(format!("t{i}"))).collect()
    }

    async fn wait(pool: &WorkerPool) {
        tokio::time::timeout(Duration::from_secs(10), pool.wait())
            .await
            .expect("pool should drain");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn every_source_runs_when_all_pass() {
        let (mut pool, runner, reporter) = pool(4, StubRunner::new());
        let queued = pool.kickoff(&Job::new(names(50), vec![])).unwrap();
        assert_eq!(queued, 4);

        wait(&pool).await;

        let ran: HashSet<Source> = runner.calls().into_iter().flatten().collect();
        assert_eq!(ran, names(50).into_iter().collect::<HashSet<_>>());
        assert_eq!(runner.calls().len(), 4);
        assert!(reporter.records().is_empty());
        assert_eq!(pool.pending(), 0);
        pool.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failures_across_batches_are_counted_once_each() {
        let (mut pool, _runner, reporter) =
            pool(3, StubRunner::new().poison("t3").poison("t17").poison("t29"));

        pool.kickoff(&Job::new(names(30), vec![Flag::new("-b", "cpu")]))
            .unwrap();
        wait(&pool).await;

        let results = Arc::clone(pool.isolator().results());
        assert_eq!(results.failures(), 3);
        let failed: HashSet<String> = reporter
            .failures()
            .iter()
            .map(|r| r.command().to_string())
            .collect();
        assert_eq!(
            failed,
            ["t3", "t17", "t29"]
                .iter()
                .map(|s| format!("stub -b cpu -s {s}"))
                .collect::<HashSet<_>>()
        );
        assert!(results.finish("stub").is_err());
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn blank_job_queues_nothing() {
        let (mut pool, runner, _) = pool(2, StubRunner::new());
        let job = job::parse_line("# nothing to see", &Catalog::new());
        assert_eq!(pool.kickoff(&job).unwrap(), 0);
        wait(&pool).await;
        assert!(runner.calls().is_empty());
        pool.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn several_jobs_share_the_pool() {
        let (mut pool, runner, reporter) = pool(2, StubRunner::new().poison("bad"));
        pool.kickoff(&Job::new(names(5), vec![Flag::new("--ct", "565")]))
            .unwrap();
        pool.kickoff(&Job::new(
            vec![Source::from("bad"), Source::from("good")],
            vec![Flag::new("--ct", "f16")],
        ))
        .unwrap();

        wait(&pool).await;

        assert_eq!(
            reporter.records(),
            vec![ResultRecord::Failed {
                command: "stub --ct f16 -s bad".into(),
                stderr: vec!["bad crashed".into()],
            }]
        );
        let total: usize = runner.calls().iter().map(Vec::len).sum();
        assert!(total >= 7);
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_releases_items_left_in_the_queue() {
        let (mut pool, runner, _) = pool(1, StubRunner::new());
        for i in 0..5 {
            pool.submit(WorkItem::new(
                vec![Source::new(format!("q{i}"))],
                Arc::from(Vec::<Flag>::new()),
                tracing::Span::none(),
            ))
            .unwrap();
        }

        pool.shutdown().await;

        assert_eq!(pool.pending(), 0);
        assert!(runner.calls().len() <= 5);
        wait(&pool).await;
    }

    #[tokio::test]
    async fn submit_after_shutdown_is_rejected() {
        let (mut pool, runner, _) = pool(1, StubRunner::new());
        pool.shutdown().await;

        let err = pool
            .submit(WorkItem::new(
                vec![Source::from("x")],
                Arc::from(Vec::<Flag>::new()),
                tracing::Span::none(),
            ))
            .unwrap_err();
        assert!(matches!(err, PoolError::Closed));
        assert_eq!(pool.pending(), 0);
        assert!(runner.calls().is_empty());
    }
}
