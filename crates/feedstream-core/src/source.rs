//! Lazy line source over an async byte stream.
//!
//! Produces one whitespace-trimmed `String` per newline-delimited record,
//! pulling from the underlying reader on demand. The whole stream is never
//! buffered in memory, and the source is forward-only: once a line is
//! consumed it cannot be replayed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::FeedError;

/// A lazy, finite, non-restartable sequence of trimmed lines.
pub struct LineSource<R> {
    lines: Lines<R>,
    read: u64,
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    /// Wrap an open byte stream. The source takes ownership of the reader
    /// and advances its position as lines are pulled.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            read: 0,
        }
    }

    /// Pull the next line, trimmed of leading/trailing whitespace.
    ///
    /// Returns `Ok(None)` at end of stream. A corrupt or truncated stream
    /// surfaces as `FeedError::Decode`.
    pub async fn next_line(&mut self) -> Result<Option<String>, FeedError> {
        match self.lines.next_line().await? {
            Some(line) => {
                self.read += 1;
                let trimmed = line.trim();
                if trimmed.len() == line.len() {
                    Ok(Some(line))
                } else {
                    Ok(Some(trimmed.to_owned()))
                }
            }
            None => Ok(None),
        }
    }

    /// Total lines pulled from the stream so far.
    pub fn lines_read(&self) -> u64 {
        self.read
    }
}
