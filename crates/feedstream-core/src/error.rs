//! Error types for the feed pipeline.

use thiserror::Error;

/// Errors that can occur while streaming and processing a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The credential environment variable is missing or empty.
    /// Detected before any network I/O.
    #[error("missing credential: set the {var} environment variable")]
    MissingToken { var: String },

    /// The feed endpoint answered with a non-200 status. Fatal, no retry.
    #[error("failed to retrieve data: HTTP {status}")]
    Transport { status: u16 },

    /// The request itself failed (connection refused, TLS, DNS, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The compressed stream is corrupt or ended mid-record.
    #[error("stream decode error: {0}")]
    Decode(#[from] std::io::Error),

    /// A line is not valid JSON. Fails the whole containing unit: the batch
    /// in parallel mode, the run in serial mode.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: u64, reason: String },

    /// A worker task panicked or was aborted; observed at harvest.
    #[error("worker task failed: {reason}")]
    Task { reason: String },
}

impl FeedError {
    /// Returns `true` if the error was detected before any network call.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingToken { .. })
    }

    /// Returns `true` if the error is a fail-fast unit failure rather than a
    /// transport or configuration problem.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
