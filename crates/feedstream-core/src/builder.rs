//! Fluent builder API for pipeline configuration.
//!
//! # Example
//!
//! ```rust
//! use feedstream_core::{FeedKind, PipelineBuilder, ProcessingMode};
//!
//! let config = PipelineBuilder::new()
//!     .feed(FeedKind::AnonymousResidential)
//!     .mode(ProcessingMode::Parallel)
//!     .batch_size(50_000)
//!     .max_workers(8)
//!     .build_config();
//! ```

use crate::config::{FeedKind, PipelineConfig, ProcessingMode};

/// Fluent builder for `PipelineConfig`.
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the feed variant to consume.
    pub fn feed(mut self, feed: FeedKind) -> Self {
        self.config.feed = feed;
        self
    }

    /// Set the scheduling model.
    pub fn mode(mut self, mode: ProcessingMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the number of lines per batch. Values below 1 are clamped to 1.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size.max(1);
        self
    }

    /// Set the worker pool size. Values below 1 are clamped to 1.
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.config.max_workers = workers.max(1);
        self
    }

    /// Build the `PipelineConfig`.
    pub fn build_config(self) -> PipelineConfig {
        self.config
    }
}
