//! The single-server queue scheduler and payoff engine.
//!
//! [`schedule_round`] is a pure function of a [`RoundBatch`] and a
//! [`QueueConfig`]: the same inputs (including submission order) always
//! produce the same [`RoundSchedule`].  It never touches participant history;
//! recording rounds is the session's job.

use tracing::{debug, info};

use aq_core::{ClockAdvance, ClockTime, CoreResult, ParticipantId, QueueConfig};

use crate::{ArrivalRecord, RoundBatch, ScheduleResult};

// ── ScheduleEntry ─────────────────────────────────────────────────────────────

/// The computed outcome for one participant in one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleEntry {
    pub participant_id: ParticipantId,
    /// Canonical `HH:MM` form of the submitted arrival time.
    pub arrival_time: String,
    pub arrival: ClockTime,
    /// 1-based rank in arrival order.
    pub queue_position: u32,
    /// When service began.  `None` means the participant did not fit before
    /// closing and has no appointment.
    pub start_time: Option<ClockTime>,
    /// Minutes between arrival and start.  Always zero when not served.
    pub waiting_time: u32,
    /// May be negative for very long waits.  Always zero when not served.
    pub prize: i64,
}

impl ScheduleEntry {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.start_time.is_some()
    }

    /// `HH:MM` of the appointment, or `None` if the participant was turned away.
    pub fn appointment_time(&self) -> Option<String> {
        self.start_time.map(|t| t.to_string())
    }
}

// ── RoundSchedule ─────────────────────────────────────────────────────────────

/// One round's full result: every participant's entry, in queue order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSchedule {
    pub opening_time: ClockTime,
    pub closing_time: ClockTime,
    entries: Vec<ScheduleEntry>,
}

impl RoundSchedule {
    /// All entries sorted by `queue_position` (the shared results view).
    pub fn roster(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// The entry for one participant.
    pub fn entry_for(&self, participant: ParticipantId) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.participant_id == participant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of participants who received an appointment.
    pub fn served_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_complete()).count()
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Order a round's arrivals, assign slots, and compute waits and prizes.
///
/// Every arrival is decoded before any slot is assigned, so one malformed
/// time fails the whole round with no partial result.
pub fn schedule_round(batch: &RoundBatch, config: &QueueConfig) -> ScheduleResult<RoundSchedule> {
    let mut queue: Vec<(ClockTime, &ArrivalRecord)> = batch
        .records()
        .iter()
        .map(|r| r.decode().map(|t| (t, r)))
        .collect::<CoreResult<_>>()?;

    // Stable: equal arrival times keep submission order.
    queue.sort_by_key(|&(arrival, _)| arrival);

    let closing_time = config.closing_time(queue.len())?;
    let mut current = config.opening_time;
    let mut entries = Vec::with_capacity(queue.len());

    for (rank, (arrival, record)) in queue.into_iter().enumerate() {
        let start = arrival.max(current);
        let served = config.closing_bound.admits(start, closing_time);

        let entry = if served {
            let waiting_time = start.since(arrival);
            ScheduleEntry {
                participant_id: record.participant_id,
                arrival_time:   arrival.to_string(),
                arrival,
                queue_position: rank as u32 + 1,
                start_time:     Some(start),
                waiting_time,
                prize:          config.prize_for(waiting_time),
            }
        } else {
            ScheduleEntry {
                participant_id: record.participant_id,
                arrival_time:   arrival.to_string(),
                arrival,
                queue_position: rank as u32 + 1,
                start_time:     None,
                waiting_time:   0,
                prize:          0,
            }
        };

        debug!(
            participant = %entry.participant_id,
            position = entry.queue_position,
            arrival = %arrival,
            start = %start,
            served,
            wait = entry.waiting_time,
            prize = entry.prize,
            "slot assigned"
        );

        if served || config.clock_advance == ClockAdvance::EveryParticipant {
            current = start.saturating_offset(config.appointment_duration);
        }
        entries.push(entry);
    }

    let schedule = RoundSchedule { opening_time: config.opening_time, closing_time, entries };
    info!(
        participants = schedule.len(),
        served = schedule.served_count(),
        closing = %closing_time,
        "round scheduled"
    );
    Ok(schedule)
}
