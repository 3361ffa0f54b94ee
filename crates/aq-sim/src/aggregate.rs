//! Final-round aggregation of a participant's history.

use aq_core::{CoreError, CoreResult, ParticipantId};

use crate::History;

/// Totals over every round a participant played.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CumulativeStats {
    pub total_prize:      i64,
    /// Mean over all rounds; turned-away rounds count as zero wait.
    pub avg_waiting_time: f64,
    /// Percentage (0–100) of rounds with an appointment.
    pub success_rate:     f64,
    pub rounds:           usize,
}

impl CumulativeStats {
    /// Fold a non-empty history.
    ///
    /// # Errors
    /// [`CoreError::EmptyHistory`] if no round has been recorded.
    pub fn from_history(history: &History) -> CoreResult<Self> {
        let records = history.records();
        if records.is_empty() {
            return Err(CoreError::EmptyHistory);
        }

        let rounds = records.len();
        let total_prize = records.iter().map(|r| r.prize).sum();
        let total_wait: u64 = records.iter().map(|r| r.waiting_time as u64).sum();
        let completed = records.iter().filter(|r| r.is_complete).count();

        Ok(Self {
            total_prize,
            avg_waiting_time: total_wait as f64 / rounds as f64,
            success_rate: completed as f64 * 100.0 / rounds as f64,
            rounds,
        })
    }

    /// Copy with the averages rounded to one decimal place for display.
    pub fn rounded(&self) -> Self {
        Self {
            avg_waiting_time: round_to_tenth(self.avg_waiting_time),
            success_rate: round_to_tenth(self.success_rate),
            ..*self
        }
    }
}

/// One participant's final statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalStats {
    pub participant_id: ParticipantId,
    pub stats:          CumulativeStats,
}

/// Round to one decimal on the decimal value of `x`, ties to even: `7.25`
/// becomes `7.2`, and `0.15` (stored just below the tie) becomes `0.1`.
///
/// `(x * 10.0).round_ties_even()` is not enough: the multiplication can round
/// a value that sits just below a tie onto it.  Float formatting is exact.
fn round_to_tenth(x: f64) -> f64 {
    format!("{x:.1}").parse().unwrap_or(x)
}
