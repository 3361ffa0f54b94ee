//! Flat row types written by output backends.
//!
//! This is the only place the "no appointment" label exists.  Everywhere
//! upstream a turned-away participant is `start_time: None` plus
//! `is_complete: false`.

use aq_core::{ParticipantId, RoundNumber};
use aq_schedule::ScheduleEntry;
use aq_sim::{FinalStats, RoundRecord, Session};

/// Exported `appointment_time` for a participant who was turned away.
pub const NO_APPOINTMENT: &str = "no appointment";

/// One participant's outcome in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResultRow {
    pub participant_id:   u32,
    pub round_number:     u32,
    pub arrival_time:     String,
    pub waiting_time:     u32,
    pub queue_position:   u32,
    /// `HH:MM`, or [`NO_APPOINTMENT`].
    pub appointment_time: String,
    pub is_complete:      bool,
    pub prize:            i64,
}

impl RoundResultRow {
    pub fn from_entry(round: RoundNumber, entry: &ScheduleEntry) -> Self {
        Self {
            participant_id:   entry.participant_id.0,
            round_number:     round.0,
            arrival_time:     entry.arrival_time.clone(),
            waiting_time:     entry.waiting_time,
            queue_position:   entry.queue_position,
            appointment_time: entry.appointment_time().unwrap_or_else(|| NO_APPOINTMENT.to_owned()),
            is_complete:      entry.is_complete(),
            prize:            entry.prize,
        }
    }

    pub fn from_record(participant: ParticipantId, record: &RoundRecord) -> Self {
        Self {
            participant_id:   participant.0,
            round_number:     record.round.0,
            arrival_time:     record.arrival_time.clone(),
            waiting_time:     record.waiting_time,
            queue_position:   record.queue_position,
            appointment_time: record
                .appointment_time
                .map_or_else(|| NO_APPOINTMENT.to_owned(), |t| t.to_string()),
            is_complete:      record.is_complete,
            prize:            record.prize,
        }
    }
}

/// One participant's session totals, averages rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalStatsRow {
    pub participant_id:   u32,
    pub total_prize:      i64,
    pub avg_waiting_time: f64,
    pub success_rate:     f64,
}

impl From<&FinalStats> for FinalStatsRow {
    fn from(s: &FinalStats) -> Self {
        let stats = s.stats.rounded();
        Self {
            participant_id:   s.participant_id.0,
            total_prize:      stats.total_prize,
            avg_waiting_time: stats.avg_waiting_time,
            success_rate:     stats.success_rate,
        }
    }
}

/// The record exported for one participant-round: the round's result, or on
/// the last configured round, the participant's final totals instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportRecord {
    Round(RoundResultRow),
    Final(FinalStatsRow),
}

/// Build the export record for `participant` in `round`.
///
/// Returns `None` if that round has not been played by that participant (or,
/// for the final round, if final stats are not available yet).
pub fn export_record(session: &Session, participant: ParticipantId, round: RoundNumber) -> Option<ExportRecord> {
    if session.config().is_final_round(round) {
        let stats = session.final_stats_for(participant)?;
        return Some(ExportRecord::Final(FinalStatsRow::from(stats)));
    }
    let record = session.history(participant)?.round(round)?;
    Some(ExportRecord::Round(RoundResultRow::from_record(participant, record)))
}
