//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FinalStatsRow, OutputResult, RoundResultRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// When driven by [`SessionOutputObserver`], errors are stored rather than
/// propagated; retrieve them with [`SessionOutputObserver::take_error`].
///
/// [`SessionOutputObserver`]: crate::SessionOutputObserver
/// [`SessionOutputObserver::take_error`]: crate::SessionOutputObserver::take_error
pub trait OutputWriter {
    /// Write one round's results (one row per participant).
    fn write_round_results(&mut self, rows: &[RoundResultRow]) -> OutputResult<()>;

    /// Write every participant's final totals.
    fn write_final_stats(&mut self, rows: &[FinalStatsRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
