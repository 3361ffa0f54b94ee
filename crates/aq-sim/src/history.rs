//! Per-participant, append-only round history.

use aq_core::{ClockTime, RoundNumber};
use aq_schedule::ScheduleEntry;

/// Snapshot of one participant's outcome in one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    pub round:            RoundNumber,
    pub arrival_time:     String,
    pub waiting_time:     u32,
    /// `None` when the participant was turned away.
    pub appointment_time: Option<ClockTime>,
    pub prize:            i64,
    pub is_complete:      bool,
    pub queue_position:   u32,
}

impl RoundRecord {
    pub fn from_entry(round: RoundNumber, entry: &ScheduleEntry) -> Self {
        Self {
            round,
            arrival_time:     entry.arrival_time.clone(),
            waiting_time:     entry.waiting_time,
            appointment_time: entry.start_time,
            prize:            entry.prize,
            is_complete:      entry.is_complete(),
            queue_position:   entry.queue_position,
        }
    }
}

/// A participant's rounds in the order they were played.
///
/// There is no way to edit or remove a record once appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    records: Vec<RoundRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome of the next round.
    pub fn append(&mut self, record: RoundRecord) {
        debug_assert!(
            self.records.last().is_none_or(|last| last.round < record.round),
            "history rounds must be strictly increasing"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// The record for `round`, if that round has been played.
    pub fn round(&self, round: RoundNumber) -> Option<&RoundRecord> {
        self.records.iter().find(|r| r.round == round)
    }

    pub fn latest(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
