//! CSV arrival loader.
//!
//! # CSV format
//!
//! One row per submission.  Rows for the same round are kept in file order,
//! which is the submission order used to break arrival-time ties.
//!
//! ```csv
//! round,participant_id,arrival_time
//! 1,1,09:45
//! 1,2,10:10
//! 1,3,10:05
//! 2,1,10:00
//! 2,2,09:30
//! 2,3,10:00
//! ```
//!
//! Rounds must be numbered `1..=k` without gaps.  Arrival strings are not
//! decoded here; a malformed time is reported when its round is scheduled.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use aq_core::ParticipantId;

use crate::{ArrivalRecord, RoundBatch, ScheduleError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRow {
    round:          u32,
    participant_id: u32,
    arrival_time:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-round batches from a CSV file.
///
/// Returns one `RoundBatch` per round, index 0 holding round 1.
pub fn load_arrivals_csv(path: &Path) -> Result<Vec<RoundBatch>, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading from stdin.
pub fn load_arrivals_reader<R: Read>(reader: R) -> Result<Vec<RoundBatch>, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut by_round: BTreeMap<u32, Vec<ArrivalRecord>> = BTreeMap::new();

    for result in csv_reader.deserialize::<ArrivalRow>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        by_round
            .entry(row.round)
            .or_default()
            .push(ArrivalRecord::new(ParticipantId(row.participant_id), row.arrival_time));
    }

    by_round
        .into_iter()
        .enumerate()
        .map(|(i, (round, records))| {
            let expected = i as u32 + 1;
            if round != expected {
                return Err(ScheduleError::Parse(format!(
                    "rounds must be numbered 1..=k without gaps: expected round {expected}, found {round}"
                )));
            }
            RoundBatch::new(records)
        })
        .collect()
}
