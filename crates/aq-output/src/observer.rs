//! `SessionOutputObserver<W>` — bridges `SessionObserver` to an `OutputWriter`.

use aq_core::RoundNumber;
use aq_schedule::RoundSchedule;
use aq_sim::{FinalStats, SessionObserver};

use crate::row::{FinalStatsRow, RoundResultRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SessionObserver`] that writes each scheduled round and the final
/// totals to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SessionObserver`
/// methods have no return value.  After the session is played, check for
/// errors with [`take_error`][Self::take_error].
pub struct SessionOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SessionOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer without waiting for the session to end, e.g. after a
    /// round was rejected part-way through a session.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SessionObserver for SessionOutputObserver<W> {
    fn on_round_scheduled(&mut self, round: RoundNumber, schedule: &RoundSchedule) {
        let rows: Vec<RoundResultRow> = schedule
            .roster()
            .iter()
            .map(|entry| RoundResultRow::from_entry(round, entry))
            .collect();
        let result = self.writer.write_round_results(&rows);
        self.store_err(result);
    }

    fn on_session_end(&mut self, stats: &[FinalStats]) {
        let rows: Vec<FinalStatsRow> = stats.iter().map(FinalStatsRow::from).collect();
        let result = self.writer.write_final_stats(&rows);
        self.store_err(result);
        self.finish();
    }
}
