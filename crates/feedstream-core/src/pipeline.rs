//! The pipeline driver — wires source, batcher, scheduler, and processor
//! together for one run and produces the final report.

use std::sync::Arc;
use std::time::Instant;

use tokio::io::AsyncBufRead;

use crate::batch::Batcher;
use crate::config::{PipelineConfig, ProcessingMode};
use crate::error::FeedError;
use crate::processor::{process_line, RecordProcessor};
use crate::report::RunReport;
use crate::scheduler::BoundedScheduler;
use crate::source::LineSource;

/// One configured pipeline, ready to run against an open byte stream.
///
/// The stream is consumed exactly once per run; re-running requires a fresh
/// stream (the feed is forward-only). The processor is shared across worker
/// tasks in parallel mode, so it must be cheap to share behind an `Arc`.
pub struct FeedPipeline {
    config: PipelineConfig,
    processor: Arc<dyn RecordProcessor>,
}

impl FeedPipeline {
    pub fn new(config: PipelineConfig, processor: Arc<dyn RecordProcessor>) -> Self {
        Self { config, processor }
    }

    /// Consume `reader` to exhaustion under the configured scheduling model
    /// and return the run report.
    pub async fn run<R>(&self, reader: R) -> Result<RunReport, FeedError>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let started = Instant::now();

        let total = match self.config.mode {
            ProcessingMode::Serial => self.run_serial(reader).await?,
            ProcessingMode::Parallel => self.run_parallel(reader).await?,
        };

        let report = RunReport {
            lines_processed: total,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            lines = report.lines_processed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            mode = ?self.config.mode,
            "pipeline run complete"
        );
        Ok(report)
    }

    /// Serial model: the line processor runs in the caller's own execution
    /// context, one record at a time. No batching, no spawning.
    async fn run_serial<R>(&self, reader: R) -> Result<u64, FeedError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut source = LineSource::new(reader);
        let mut count: u64 = 0;
        while let Some(line) = source.next_line().await? {
            process_line(&line, count + 1, self.processor.as_ref()).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Bounded-parallel model: batches dispatched across the worker pool.
    async fn run_parallel<R>(&self, reader: R) -> Result<u64, FeedError>
    where
        R: AsyncBufRead + Unpin,
    {
        let batcher = Batcher::new(LineSource::new(reader), self.config.batch_size);
        BoundedScheduler::new(self.config.max_workers)
            .run(batcher, Arc::clone(&self.processor))
            .await
    }
}
