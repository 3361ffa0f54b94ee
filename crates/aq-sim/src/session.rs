//! The `Session` struct and its round loop.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{error, info, warn};

use aq_core::{ParticipantId, QueueConfig, RoundNumber};
use aq_schedule::{RoundBatch, RoundSchedule, ScheduleEntry, schedule_round};

use crate::{
    CumulativeStats, FinalStats, History, RoundRecord, SessionError, SessionObserver,
    SessionResult,
};

/// A multi-round game over one fixed set of participants.
///
/// `Session` owns every participant's [`History`].  Rounds are played one at
/// a time through [`submit_round`][Self::submit_round], which takes `&mut
/// self`, so a round always finishes before the next begins.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session {
    pub(crate) config: QueueConfig,

    /// Fixed by the builder or by the first submitted round.
    pub(crate) roster: Option<BTreeSet<ParticipantId>>,

    pub(crate) histories: BTreeMap<ParticipantId, History>,

    pub(crate) rounds_played: u32,

    pub(crate) last_schedule: Option<RoundSchedule>,

    /// Set once, after the final round.
    pub(crate) final_stats: Option<Vec<FinalStats>>,
}

impl Session {
    // ── Public API ────────────────────────────────────────────────────────

    /// Schedule the next round from a complete batch of submissions.
    ///
    /// On the final configured round this also aggregates every history and
    /// calls [`SessionObserver::on_session_end`].
    ///
    /// # Errors
    /// - [`SessionError::SessionComplete`] if every round has been played.
    /// - [`SessionError::RosterMismatch`] if the batch's participants differ
    ///   from the session roster.
    /// - [`SessionError::Schedule`] if any arrival time is malformed.
    ///
    /// Histories are unchanged when an error is returned.
    pub fn submit_round<O: SessionObserver>(
        &mut self,
        batch:    &RoundBatch,
        observer: &mut O,
    ) -> SessionResult<&RoundSchedule> {
        let round = self
            .next_round()
            .ok_or(SessionError::SessionComplete(self.config.num_rounds))?;

        info!(%round, participants = batch.len(), "round submitted");

        self.check_roster(round, batch)
            .inspect_err(|e| warn!(%round, error = %e, "round rejected"))?;
        let schedule = schedule_round(batch, &self.config)
            .inspect_err(|e| warn!(%round, error = %e, "round rejected"))?;
        observer.on_round_start(round);

        // ── Commit ────────────────────────────────────────────────────────
        if self.roster.is_none() {
            self.roster = Some(batch.participant_ids().collect());
        }
        for entry in schedule.roster() {
            self.histories
                .entry(entry.participant_id)
                .or_default()
                .append(RoundRecord::from_entry(round, entry));
        }
        self.rounds_played = round.0;
        observer.on_round_scheduled(round, &schedule);

        if self.config.is_final_round(round) {
            let stats = self.aggregate()?;
            info!(participants = stats.len(), "session complete");
            observer.on_session_end(&stats);
            self.final_stats = Some(stats);
        }

        Ok(&*self.last_schedule.insert(schedule))
    }

    /// Submit every batch in order.  Stops at the first error.
    pub fn play<'a, O, I>(&mut self, batches: I, observer: &mut O) -> SessionResult<()>
    where
        O: SessionObserver,
        I: IntoIterator<Item = &'a RoundBatch>,
    {
        for batch in batches {
            self.submit_round(batch, observer)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// The round the next submission will be scheduled as, or `None` once
    /// the session is complete.
    pub fn next_round(&self) -> Option<RoundNumber> {
        (self.rounds_played < self.config.num_rounds).then(|| RoundNumber(self.rounds_played + 1))
    }

    pub fn is_complete(&self) -> bool {
        self.next_round().is_none()
    }

    /// Participants in ascending ID order, once the roster is known.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.roster.iter().flatten().copied()
    }

    pub fn history(&self, participant: ParticipantId) -> Option<&History> {
        self.histories.get(&participant)
    }

    /// The most recently scheduled round.
    pub fn last_schedule(&self) -> Option<&RoundSchedule> {
        self.last_schedule.as_ref()
    }

    /// One participant's entry in the most recently scheduled round.
    pub fn participant_result(&self, participant: ParticipantId) -> Option<&ScheduleEntry> {
        self.last_schedule.as_ref()?.entry_for(participant)
    }

    /// Every participant's totals, available only after the final round.
    pub fn final_stats(&self) -> Option<&[FinalStats]> {
        self.final_stats.as_deref()
    }

    pub fn final_stats_for(&self, participant: ParticipantId) -> Option<&FinalStats> {
        self.final_stats()?.iter().find(|s| s.participant_id == participant)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_roster(&self, round: RoundNumber, batch: &RoundBatch) -> SessionResult<()> {
        let Some(roster) = &self.roster else {
            return Ok(());
        };
        let submitted: BTreeSet<ParticipantId> = batch.participant_ids().collect();
        if &submitted == roster {
            return Ok(());
        }
        Err(SessionError::RosterMismatch {
            round,
            missing:    roster.difference(&submitted).copied().collect(),
            unexpected: submitted.difference(roster).copied().collect(),
        })
    }

    fn aggregate(&self) -> SessionResult<Vec<FinalStats>> {
        self.histories
            .iter()
            .map(|(&participant_id, history)| {
                let stats = CumulativeStats::from_history(history).inspect_err(|e| {
                    error!(participant = %participant_id, error = %e, "aggregation failed")
                })?;
                Ok(FinalStats { participant_id, stats })
            })
            .collect()
    }
}
