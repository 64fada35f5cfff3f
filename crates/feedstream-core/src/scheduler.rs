//! The bounded scheduler — admission control for concurrent batch work.
//!
//! # Admission loop
//!
//! For each batch pulled from the [`Batcher`]:
//! 1. If `max_workers` tasks are already in flight, wait for **one** of them
//!    to complete and harvest its result into the running total. Exactly one
//!    completion is harvested per wait, even if several tasks finished; this
//!    bounds the work done per iteration.
//! 2. Spawn the new batch as a worker task and add it to the in-flight set.
//!
//! After the batcher is exhausted, every remaining task is awaited and
//! harvested. The in-flight set never holds more than `max_workers` tasks.
//!
//! Completion order is not guaranteed; the running total is a commutative
//! sum, so harvest order does not matter. There is no cancellation — a
//! submitted task runs to completion or failure — and no timeout on any
//! wait, so a stalled worker stalls the run (known limitation, inherited
//! deliberately).

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::AsyncBufRead;
use tokio::task::{JoinError, JoinHandle};

use crate::batch::Batcher;
use crate::error::FeedError;
use crate::processor::{process_batch, RecordProcessor};

/// Schedules batches across a fixed-size pool of concurrent worker tasks.
pub struct BoundedScheduler {
    max_workers: usize,
}

impl BoundedScheduler {
    /// Create a scheduler with `max_workers` concurrent slots. Zero is
    /// clamped to 1.
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Drive the batcher to exhaustion, keeping at most `max_workers`
    /// batches in flight, and return the summed line counts of every
    /// completed batch.
    ///
    /// The first failed batch (parse error) or failed task (worker panic)
    /// aborts the run; results of still-running tasks are not awaited.
    pub async fn run<R>(
        &self,
        mut batcher: Batcher<R>,
        processor: Arc<dyn RecordProcessor>,
    ) -> Result<u64, FeedError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut in_flight: FuturesUnordered<JoinHandle<Result<usize, FeedError>>> =
            FuturesUnordered::new();
        let mut total: u64 = 0;

        while let Some(batch) = batcher.next_batch().await? {
            if in_flight.len() >= self.max_workers {
                // Pool is full: block until one task completes, harvest it,
                // then admit the new batch into the freed slot.
                if let Some(joined) = in_flight.next().await {
                    total += harvest(joined)? as u64;
                }
            }

            tracing::debug!(
                batch = batch.index,
                lines = batch.len(),
                in_flight = in_flight.len(),
                "submitting batch"
            );
            let processor = Arc::clone(&processor);
            in_flight.push(tokio::spawn(async move {
                process_batch(&batch, processor.as_ref()).await
            }));
        }

        // Final drain: wait for every remaining task.
        while let Some(joined) = in_flight.next().await {
            total += harvest(joined)? as u64;
        }

        tracing::debug!(total, "scheduler drained");
        Ok(total)
    }
}

/// Unwrap a joined worker result. A panicked or aborted task surfaces as
/// `FeedError::Task`; a batch failure passes through unchanged.
fn harvest(joined: Result<Result<usize, FeedError>, JoinError>) -> Result<usize, FeedError> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(FeedError::Task {
            reason: e.to_string(),
        }),
    }
}
