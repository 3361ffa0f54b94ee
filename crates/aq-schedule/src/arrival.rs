//! Arrival submissions: `ArrivalRecord` and the per-round `RoundBatch`.
//!
//! A batch preserves submission order.  That order is the tie-break when two
//! participants pick the same arrival time, so it must never be re-sorted
//! or collected through a hash map.

use std::collections::HashSet;

use aq_core::{ClockTime, CoreResult, ParticipantId, decode};

use crate::{ScheduleError, ScheduleResult};

// ── ArrivalRecord ─────────────────────────────────────────────────────────────

/// One participant's submission for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalRecord {
    pub participant_id: ParticipantId,
    /// Raw `HH:MM` text as submitted.  Decoded only when the round runs.
    pub arrival_time: String,
}

impl ArrivalRecord {
    pub fn new(participant_id: ParticipantId, arrival_time: impl Into<String>) -> Self {
        Self { participant_id, arrival_time: arrival_time.into() }
    }

    /// Decode the submitted arrival time.
    #[inline]
    pub fn decode(&self) -> CoreResult<ClockTime> {
        decode(&self.arrival_time)
    }
}

// ── RoundBatch ────────────────────────────────────────────────────────────────

/// The complete, finalized set of submissions for one round.
///
/// Construction guarantees the batch is non-empty and that every participant
/// appears exactly once.  Arrival strings are *not* validated here; a bad
/// time surfaces from [`schedule_round`][crate::schedule_round].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundBatch {
    records: Vec<ArrivalRecord>,
}

impl RoundBatch {
    /// Build a batch from records in submission order.
    pub fn new(records: Vec<ArrivalRecord>) -> ScheduleResult<Self> {
        if records.is_empty() {
            return Err(ScheduleError::EmptyRound);
        }
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            if !seen.insert(r.participant_id) {
                return Err(ScheduleError::DuplicateParticipant(r.participant_id));
            }
        }
        Ok(Self { records })
    }

    /// Convenience constructor from `(id, "HH:MM")` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = (ParticipantId, S)>,
        S: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(id, t)| ArrivalRecord::new(id, t)).collect())
    }

    /// Records in submission order.
    pub fn records(&self) -> &[ArrivalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Participant IDs in submission order.
    pub fn participant_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.records.iter().map(|r| r.participant_id)
    }
}
