//! End-of-run reporting.

use std::time::Duration;

/// Summary of one completed pipeline run: the running total and the
/// wall-clock time from pipeline start to final harvest. Reported once,
/// after all work is done — there is no partial or streaming reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Total records successfully processed.
    pub lines_processed: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunReport {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total time taken: {:.2} seconds", self.elapsed_secs())?;
        write!(f, "Total lines processed: {}", self.lines_processed)
    }
}
