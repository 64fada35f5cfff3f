//! Batching of the line sequence into bounded, ordered units of work.

use tokio::io::AsyncBufRead;

use crate::error::FeedError;
use crate::source::LineSource;

/// An ordered group of lines processed as one unit of concurrent work.
///
/// Every batch holds between 1 and `max_batch_size` lines; only the final
/// batch of a stream may be shorter than `max_batch_size`. Once handed to a
/// worker, the batch is owned exclusively by that worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Zero-based sequence number in submission order.
    pub index: u64,
    /// Absolute (1-based) number of the first line in this batch.
    pub first_line: u64,
    /// The lines, in arrival order.
    pub lines: Vec<String>,
}

impl Batch {
    /// Number of lines in the batch.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Groups a [`LineSource`] into batches of at most `max_batch_size` lines.
///
/// Pull-based and lazy: lines are read from the source only when the next
/// batch is requested. Emission order equals line arrival order; no line is
/// duplicated or dropped.
pub struct Batcher<R> {
    source: LineSource<R>,
    max_batch_size: usize,
    next_index: u64,
    next_line: u64,
}

impl<R: AsyncBufRead + Unpin> Batcher<R> {
    /// Create a batcher over `source`. `max_batch_size` must be > 0; zero is
    /// clamped to 1 so a misconfigured caller cannot loop forever.
    pub fn new(source: LineSource<R>, max_batch_size: usize) -> Self {
        Self {
            source,
            max_batch_size: max_batch_size.max(1),
            next_index: 0,
            next_line: 1,
        }
    }

    /// Pull the next batch.
    ///
    /// Returns `Ok(None)` once the source is exhausted. The final batch may
    /// hold fewer than `max_batch_size` lines but is never empty.
    pub async fn next_batch(&mut self) -> Result<Option<Batch>, FeedError> {
        let mut lines = Vec::new();
        while lines.len() < self.max_batch_size {
            match self.source.next_line().await? {
                Some(line) => lines.push(line),
                None => break,
            }
        }

        if lines.is_empty() {
            return Ok(None);
        }

        let batch = Batch {
            index: self.next_index,
            first_line: self.next_line,
            lines,
        };
        self.next_index += 1;
        self.next_line += batch.lines.len() as u64;
        Ok(Some(batch))
    }

    /// Total lines pulled from the underlying source so far.
    pub fn lines_read(&self) -> u64 {
        self.source.lines_read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batcher(bytes: &'static [u8], size: usize) -> Batcher<&'static [u8]> {
        Batcher::new(LineSource::new(bytes), size)
    }

    async fn drain(mut b: Batcher<&'static [u8]>) -> Vec<Batch> {
        let mut out = Vec::new();
        while let Some(batch) = b.next_batch().await.unwrap() {
            out.push(batch);
        }
        out
    }

    #[tokio::test]
    async fn partitions_without_loss_or_duplication() {
        let batches = drain(batcher(b"a\nb\nc\nd\ne\n", 2)).await;
        let sizes: Vec<usize> = batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let all: Vec<&str> = batches
            .iter()
            .flat_map(|b| b.lines.iter().map(String::as_str))
            .collect();
        assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn exact_multiple_yields_only_full_batches() {
        let batches = drain(batcher(b"a\nb\nc\nd\n", 2)).await;
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 2));
    }

    #[tokio::test]
    async fn exactly_max_batch_size_yields_one_full_batch() {
        let batches = drain(batcher(b"a\nb\nc\n", 3)).await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
    }

    #[tokio::test]
    async fn empty_stream_yields_no_batches() {
        let batches = drain(batcher(b"", 3)).await;
        assert!(batches.is_empty());
    }

    #[tokio::test]
    async fn tracks_index_and_first_line() {
        let batches = drain(batcher(b"a\nb\nc\nd\ne\n", 2)).await;
        assert_eq!(batches[0].index, 0);
        assert_eq!(batches[0].first_line, 1);
        assert_eq!(batches[1].index, 1);
        assert_eq!(batches[1].first_line, 3);
        assert_eq!(batches[2].index, 2);
        assert_eq!(batches[2].first_line, 5);
    }

    #[tokio::test]
    async fn zero_batch_size_is_clamped() {
        let batches = drain(batcher(b"a\nb\n", 0)).await;
        assert_eq!(batches.len(), 2);
    }
}
