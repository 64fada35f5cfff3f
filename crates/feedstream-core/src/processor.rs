//! Record processing: the pluggable per-record hook plus the batch and
//! line processing entry points built on it.

use async_trait::async_trait;
use serde_json::Value;

use crate::batch::Batch;
use crate::error::FeedError;

/// Trait for user-provided record processing logic.
///
/// The pipeline parses each line as JSON and hands the parsed record here.
/// Implementations might transform it, write it to a database, or feed it to
/// a downstream service.
#[async_trait]
pub trait RecordProcessor: Send + Sync {
    async fn process(&self, record: &Value) -> Result<(), FeedError>;
}

/// The baseline processor: parse-only, discards the record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProcessor;

#[async_trait]
impl RecordProcessor for NoopProcessor {
    async fn process(&self, _record: &Value) -> Result<(), FeedError> {
        Ok(())
    }
}

/// Process one batch: parse every line in order and dispatch each parsed
/// record. Returns the number of lines in the batch on success.
///
/// Fail-fast: the first unparseable line fails the whole batch and the
/// remaining lines are not processed. The error carries the absolute line
/// number for diagnostics.
pub async fn process_batch(batch: &Batch, processor: &dyn RecordProcessor) -> Result<usize, FeedError> {
    for (offset, line) in batch.lines.iter().enumerate() {
        let record: Value = serde_json::from_str(line).map_err(|e| FeedError::Parse {
            line: batch.first_line + offset as u64,
            reason: e.to_string(),
        })?;
        processor.process(&record).await?;
    }
    Ok(batch.len())
}

/// Process one line (serial path): parse it, dispatch the parsed record, and
/// return the original line unchanged. A parse failure aborts the run.
pub async fn process_line<'a>(
    line: &'a str,
    line_number: u64,
    processor: &dyn RecordProcessor,
) -> Result<&'a str, FeedError> {
    let record: Value = serde_json::from_str(line).map_err(|e| FeedError::Parse {
        line: line_number,
        reason: e.to_string(),
    })?;
    processor.process(&record).await?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    #[async_trait]
    impl RecordProcessor for Counting {
        async fn process(&self, _record: &Value) -> Result<(), FeedError> {
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    fn batch(lines: &[&str]) -> Batch {
        Batch {
            index: 0,
            first_line: 1,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn batch_returns_line_count() {
        let b = batch(&[r#"{"a":1}"#, r#"{"a":2}"#, r#"{"a":3}"#]);
        let count = process_batch(&b, &NoopProcessor).await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn batch_dispatches_every_record() {
        let counter = Counting(AtomicUsize::new(0));
        let b = batch(&[r#"{"a":1}"#, r#"{"a":2}"#]);
        process_batch(&b, &counter).await.unwrap();
        assert_eq!(counter.0.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn batch_fails_fast_on_malformed_line() {
        let counter = Counting(AtomicUsize::new(0));
        let b = Batch {
            index: 3,
            first_line: 7,
            lines: vec![
                r#"{"a":1}"#.to_string(),
                "not json".to_string(),
                r#"{"a":3}"#.to_string(),
            ],
        };
        let err = process_batch(&b, &counter).await.unwrap_err();
        match err {
            FeedError::Parse { line, .. } => assert_eq!(line, 8),
            other => panic!("expected parse error, got {other}"),
        }
        // Only the record before the bad line was dispatched.
        assert_eq!(counter.0.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn line_returns_input_unchanged() {
        let line = r#"{"a":1}"#;
        let out = process_line(line, 1, &NoopProcessor).await.unwrap();
        assert_eq!(out, line);
    }

    #[tokio::test]
    async fn line_parse_failure_carries_line_number() {
        let err = process_line("nope", 42, &NoopProcessor).await.unwrap_err();
        match err {
            FeedError::Parse { line, .. } => assert_eq!(line, 42),
            other => panic!("expected parse error, got {other}"),
        }
    }
}
