//! Session observer trait for progress reporting and data collection.

use aq_core::RoundNumber;
use aq_schedule::RoundSchedule;

use crate::FinalStats;

/// Callbacks invoked by [`Session::submit_round`][crate::Session::submit_round].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — roster printer
///
/// ```rust,ignore
/// struct RosterPrinter;
///
/// impl SessionObserver for RosterPrinter {
///     fn on_round_scheduled(&mut self, round: RoundNumber, schedule: &RoundSchedule) {
///         for e in schedule.roster() {
///             println!("{round} #{} {}", e.queue_position, e.participant_id);
///         }
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called once per accepted round, after the batch has been validated and
    /// scheduled but before any history is updated.  A rejected submission
    /// triggers no callbacks, so a resubmitted round still starts only once.
    fn on_round_start(&mut self, _round: RoundNumber) {}

    /// Called after a round is scheduled and every history has been updated.
    fn on_round_scheduled(&mut self, _round: RoundNumber, _schedule: &RoundSchedule) {}

    /// Called once, after the final round, with every participant's totals.
    fn on_session_end(&mut self, _stats: &[FinalStats]) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
