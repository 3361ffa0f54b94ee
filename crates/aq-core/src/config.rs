//! Queue configuration and the scheduling policy surface.
//!
//! Every tunable the scheduler reads lives in [`QueueConfig`].  The three
//! policy enums cover the points where historical versions of the game
//! disagreed:
//!
//! | Policy             | Default            | Alternative                    |
//! |--------------------|--------------------|--------------------------------|
//! | [`CapacityPolicy`] | one slot per participant | `round(fraction * N)` slots |
//! | [`ClosingBound`]   | start `<` closing  | start `<=` closing             |
//! | [`ClockAdvance`]   | every participant consumes a slot | only served ones |

use crate::error::{CoreError, CoreResult};
use crate::time::{ClockTime, MINUTES_PER_DAY};
use crate::RoundNumber;

// ── Policies ──────────────────────────────────────────────────────────────────

/// How many appointment slots a round with `N` participants offers.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CapacityPolicy {
    /// `N` slots.
    #[default]
    PerParticipant,
    /// `round(fraction * N)` slots.
    Fraction(f64),
}

impl CapacityPolicy {
    /// Number of slots for `participants`, saturating at `u32::MAX`.
    pub fn slots(&self, participants: usize) -> u32 {
        match *self {
            CapacityPolicy::PerParticipant => u32::try_from(participants).unwrap_or(u32::MAX),
            CapacityPolicy::Fraction(f) => (f * participants as f64).round().max(0.0) as u32,
        }
    }
}

/// Whether a service start exactly at closing time is still admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ClosingBound {
    /// `start < closing`.
    #[default]
    Exclusive,
    /// `start <= closing`.
    Inclusive,
}

impl ClosingBound {
    #[inline]
    pub fn admits(self, start: ClockTime, closing: ClockTime) -> bool {
        match self {
            ClosingBound::Exclusive => start < closing,
            ClosingBound::Inclusive => start <= closing,
        }
    }
}

/// Which participants move the server clock forward by one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ClockAdvance {
    /// Turned-away participants still consume a slot.
    #[default]
    EveryParticipant,
    /// Only served participants consume a slot.
    ServedOnly,
}

// ── QueueConfig ───────────────────────────────────────────────────────────────

/// Top-level simulator configuration.
///
/// Typically loaded from a JSON file by the application crate (feature
/// `serde`); missing fields fall back to [`QueueConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct QueueConfig {
    /// Rounds per session.  Final statistics are produced after the last one.
    pub num_rounds: u32,

    /// Minutes per appointment slot.
    pub appointment_duration: u32,

    /// Prize for a participant served with zero wait.
    pub base_reward: i64,

    /// Prize deducted per minute of waiting.  The result is not floored.
    pub penalty_per_minute: i64,

    /// When the server starts taking appointments.
    pub opening_time: ClockTime,

    pub capacity: CapacityPolicy,

    pub closing_bound: ClosingBound,

    pub clock_advance: ClockAdvance,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            num_rounds:           2,
            appointment_duration: 30,
            base_reward:          700,
            penalty_per_minute:   1,
            opening_time:         ClockTime::from_hm(10, 0),
            capacity:             CapacityPolicy::PerParticipant,
            closing_bound:        ClosingBound::Exclusive,
            clock_advance:        ClockAdvance::EveryParticipant,
        }
    }
}

impl QueueConfig {
    /// Reject configurations the scheduler cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.num_rounds == 0 {
            return Err(CoreError::Config("num_rounds must be at least 1".into()));
        }
        if self.appointment_duration == 0 {
            return Err(CoreError::Config("appointment_duration must be at least 1 minute".into()));
        }
        if self.appointment_duration > MINUTES_PER_DAY {
            return Err(CoreError::Config(format!(
                "appointment_duration must be at most {MINUTES_PER_DAY} minutes, got {}",
                self.appointment_duration
            )));
        }
        if self.opening_time.0 >= MINUTES_PER_DAY {
            return Err(CoreError::Config(format!(
                "opening_time must be a time of day, got {}",
                self.opening_time
            )));
        }
        if let CapacityPolicy::Fraction(f) = self.capacity {
            if !f.is_finite() || f <= 0.0 {
                return Err(CoreError::Config(format!(
                    "capacity fraction must be finite and positive, got {f}"
                )));
            }
        }
        Ok(())
    }

    /// Closing time for a round with `participants` arrivals.
    ///
    /// # Errors
    /// [`CoreError::Config`] if the slots run past the representable range of
    /// minutes.
    pub fn closing_time(&self, participants: usize) -> CoreResult<ClockTime> {
        self.capacity
            .slots(participants)
            .checked_mul(self.appointment_duration)
            .and_then(|span| self.opening_time.0.checked_add(span))
            .map(ClockTime)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "{participants} participants at {} minutes each overflow the clock",
                    self.appointment_duration
                ))
            })
    }

    /// Prize for a served participant who waited `waiting_minutes`.
    ///
    /// Saturates rather than wrapping for extreme penalties.
    #[inline]
    pub fn prize_for(&self, waiting_minutes: u32) -> i64 {
        self.base_reward
            .saturating_sub((waiting_minutes as i64).saturating_mul(self.penalty_per_minute))
    }

    /// `true` if `round` is the last configured round.
    #[inline]
    pub fn is_final_round(&self, round: RoundNumber) -> bool {
        round.0 == self.num_rounds
    }
}
