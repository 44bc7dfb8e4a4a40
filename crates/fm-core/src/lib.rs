//! Orchestration core: turns job lines into batches, runs them on a fixed worker pool and
//! narrows failing or novel batches down to single sources.
//!
//! Flow: [`job::parse`] → [`batch::split`] → [`WorkerPool`] → [`Isolator`] → [`Aggregator`].

pub mod error;
pub use error::{CatalogError, FailedRuns, PlanError, PoolError};

pub mod aggregate;
pub use aggregate::{Aggregator, ConsoleReporter, Reporter};

pub mod batch;
pub mod bot;

pub mod catalog;
pub use catalog::{Catalog, CatalogDirs};

pub mod isolate;
pub use isolate::Isolator;

pub mod job;

mod wait;
pub use wait::WaitGroup;

pub mod pool;
pub use pool::WorkerPool;

mod work;
pub use work::WorkItem;

#[cfg(test)]
pub(crate) mod testing;
