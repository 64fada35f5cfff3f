//! feedstream-core — bounded-concurrency streaming batch pipeline.
//!
//! # Architecture
//!
//! ```text
//! FeedPipeline
//!     ├── LineSource        (lazy trimmed lines from an async byte stream)
//!     ├── Batcher           (groups lines into bounded, ordered batches)
//!     ├── BoundedScheduler  (at most max_workers batches in flight)
//!     ├── RecordProcessor   (pluggable per-record logic)
//!     └── RunReport         (running total + wall-clock elapsed)
//! ```
//!
//! The pipeline never materializes the whole feed: lines are pulled from the
//! stream on demand, grouped into batches of `batch_size`, and handed to
//! worker tasks. The coordinator is the only place the running total is
//! mutated, so no locks guard it.

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod report;
pub mod scheduler;
pub mod source;

pub use batch::{Batch, Batcher};
pub use builder::PipelineBuilder;
pub use config::{FeedKind, PipelineConfig, ProcessingMode, DEFAULT_BATCH_SIZE, DEFAULT_MAX_WORKERS};
pub use error::FeedError;
pub use pipeline::FeedPipeline;
pub use processor::{NoopProcessor, RecordProcessor};
pub use report::RunReport;
pub use scheduler::BoundedScheduler;
pub use source::LineSource;
