//! Synthetic participants: how simulated players pick their arrival time.
//!
//! Real sessions receive submissions from people.  For demos and load tests a
//! [`Population`] stands in for them: every member owns a seeded
//! [`ParticipantRng`] and asks an [`ArrivalStrategy`] for a time each round.
//! The same seed always yields the same batches.

use aq_core::{ClockTime, CoreError, CoreResult, ParticipantId, ParticipantRng, RoundNumber};
use aq_schedule::{ArrivalRecord, RoundBatch};

use crate::SessionResult;

const LAST_MINUTE_OF_DAY: ClockTime = ClockTime(23 * 60 + 59);

/// Pluggable arrival-time choice.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysFirst;
///
/// impl ArrivalStrategy for AlwaysFirst {
///     fn choose(&self, _p: ParticipantId, _r: RoundNumber, _rng: &mut ParticipantRng) -> ClockTime {
///         ClockTime::MIDNIGHT
///     }
/// }
/// ```
pub trait ArrivalStrategy {
    /// Pick `participant`'s arrival for `round`.  Must be a valid time of day.
    fn choose(
        &self,
        participant: ParticipantId,
        round:       RoundNumber,
        rng:         &mut ParticipantRng,
    ) -> ClockTime;
}

/// Uniformly random minute in `[earliest, latest]`.
#[derive(Clone, Copy, Debug)]
pub struct UniformWindow {
    earliest: ClockTime,
    latest:   ClockTime,
}

impl UniformWindow {
    pub fn new(earliest: ClockTime, latest: ClockTime) -> CoreResult<Self> {
        if latest < earliest || latest > LAST_MINUTE_OF_DAY {
            return Err(CoreError::Config(format!(
                "arrival window {earliest}–{latest} must be ordered and end by 23:59"
            )));
        }
        Ok(Self { earliest, latest })
    }
}

impl ArrivalStrategy for UniformWindow {
    fn choose(&self, _participant: ParticipantId, _round: RoundNumber, rng: &mut ParticipantRng) -> ClockTime {
        ClockTime(rng.gen_range(self.earliest.0..=self.latest.0))
    }
}

/// Everyone arrives at the same time every round.
#[derive(Clone, Copy, Debug)]
pub struct FixedArrival(pub ClockTime);

impl ArrivalStrategy for FixedArrival {
    fn choose(&self, _participant: ParticipantId, _round: RoundNumber, _rng: &mut ParticipantRng) -> ClockTime {
        self.0
    }
}

/// A fixed set of simulated participants sharing one strategy.
pub struct Population<S: ArrivalStrategy> {
    strategy: S,
    members:  Vec<(ParticipantId, ParticipantRng)>,
}

impl<S: ArrivalStrategy> Population<S> {
    /// `count` participants with IDs `1..=count`, seeded from `seed`.
    pub fn new(strategy: S, count: u32, seed: u64) -> Self {
        let members = (1..=count)
            .map(|i| {
                let id = ParticipantId(i);
                (id, ParticipantRng::new(seed, id))
            })
            .collect();
        Self { strategy, members }
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.members.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Draw every member's arrival for `round`, in ID order.
    pub fn submit(&mut self, round: RoundNumber) -> SessionResult<RoundBatch> {
        let records = self
            .members
            .iter_mut()
            .map(|(id, rng)| {
                let t = self.strategy.choose(*id, round, rng);
                ArrivalRecord::new(*id, t.to_string())
            })
            .collect();
        Ok(RoundBatch::new(records)?)
    }
}
