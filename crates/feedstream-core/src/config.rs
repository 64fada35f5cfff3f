//! Pipeline configuration and feed selection types.

use serde::{Deserialize, Serialize};

/// Default number of lines per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Default number of concurrent worker slots.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// The predefined feed variants, each mapping to a fixed endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedKind {
    /// The anonymous IP feed.
    Anonymous,
    /// The anonymous-residential IP feed.
    AnonymousResidential,
}

impl FeedKind {
    /// Endpoint path of this feed under the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous/latest.json.gz",
            Self::AnonymousResidential => "anonymous-residential/latest.json.gz",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::AnonymousResidential => write!(f, "anonymous-residential"),
        }
    }
}

/// How records are scheduled for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// One record at a time, in the caller's own execution context.
    Serial,
    /// Batches dispatched across a bounded pool of worker tasks.
    Parallel,
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Which feed variant to consume.
    pub feed: FeedKind,
    /// Scheduling model.
    pub mode: ProcessingMode,
    /// Lines per batch (parallel mode). Must be > 0.
    pub batch_size: usize,
    /// Concurrent worker slots (parallel mode). Must be > 0.
    pub max_workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feed: FeedKind::Anonymous,
            mode: ProcessingMode::Parallel,
            batch_size: DEFAULT_BATCH_SIZE,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}
