//! Unit tests for aq-sim.

use aq_core::{ClockTime, CoreError, ParticipantId, QueueConfig, RoundNumber};
use aq_schedule::{RoundBatch, RoundSchedule, ScheduleError};

use crate::{
    CumulativeStats, FinalStats, FixedArrival, History, NoopObserver, Population, RoundRecord,
    SessionBuilder, SessionError, SessionObserver, UniformWindow,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn batch(times: &[&str]) -> RoundBatch {
    RoundBatch::from_pairs(
        times.iter().enumerate().map(|(i, t)| (ParticipantId(i as u32 + 1), *t)),
    )
    .unwrap()
}

fn record(round: u32, prize: i64, wait: u32, complete: bool) -> RoundRecord {
    RoundRecord {
        round:            RoundNumber(round),
        arrival_time:     "10:00".into(),
        waiting_time:     wait,
        appointment_time: complete.then_some(ClockTime(600)),
        prize,
        is_complete:      complete,
        queue_position:   1,
    }
}

/// Records every callback in order.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    final_stats: Vec<FinalStats>,
}

impl SessionObserver for Recorder {
    fn on_round_start(&mut self, round: RoundNumber) {
        self.events.push(format!("start {round}"));
    }

    fn on_round_scheduled(&mut self, round: RoundNumber, schedule: &RoundSchedule) {
        self.events.push(format!("scheduled {round} ({})", schedule.len()));
    }

    fn on_session_end(&mut self, stats: &[FinalStats]) {
        self.events.push("end".into());
        self.final_stats = stats.to_vec();
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregate {
    use super::*;

    #[test]
    fn served_then_turned_away() {
        let mut h = History::new();
        h.append(record(1, 685, 15, true));
        h.append(record(2, 0, 0, false));
        let stats = CumulativeStats::from_history(&h).unwrap();
        assert_eq!(stats.total_prize, 685);
        assert_eq!(stats.avg_waiting_time, 7.5);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(stats.rounds, 2);
    }

    #[test]
    fn empty_history_is_an_error() {
        let result = CumulativeStats::from_history(&History::new());
        assert!(matches!(result, Err(CoreError::EmptyHistory)));
    }

    #[test]
    fn rounded_to_one_decimal() {
        let mut h = History::new();
        h.append(record(1, 690, 10, true));
        h.append(record(2, 0, 0, false));
        h.append(record(3, 695, 5, true));
        let stats = CumulativeStats::from_history(&h).unwrap().rounded();
        assert_eq!(stats.avg_waiting_time, 5.0);
        assert_eq!(stats.success_rate, 66.7);
        assert_eq!(stats.total_prize, 1385);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        let mut h = History::new();
        h.append(record(1, 671, 29, true));
        for round in 2..=4 {
            h.append(record(round, 700, 0, true));
        }
        // 29 / 4 = 7.25 exactly.
        let stats = CumulativeStats::from_history(&h).unwrap().rounded();
        assert_eq!(stats.avg_waiting_time, 7.2);

        let mut h = History::new();
        h.append(record(1, 665, 35, true));
        for round in 2..=4 {
            h.append(record(round, 700, 0, true));
        }
        // 35 / 4 = 8.75 exactly.
        let stats = CumulativeStats::from_history(&h).unwrap().rounded();
        assert_eq!(stats.avg_waiting_time, 8.8);
    }

    #[test]
    fn rounding_uses_the_stored_value() {
        let mut h = History::new();
        h.append(record(1, 697, 3, true));
        for round in 2..=20 {
            h.append(record(round, 700, 0, true));
        }
        // 3 / 20 is stored as 0.1499999…, so it rounds down.
        let stats = CumulativeStats::from_history(&h).unwrap().rounded();
        assert_eq!(stats.avg_waiting_time, 0.1);

        let mut h = History::new();
        h.append(record(1, 700, 0, true));
        for round in 2..=8 {
            h.append(record(round, 0, 0, false));
        }
        // 100 / 8 = 12.5, already one decimal.
        let stats = CumulativeStats::from_history(&h).unwrap().rounded();
        assert_eq!(stats.success_rate, 12.5);
    }

    #[test]
    fn negative_prizes_are_summed() {
        let mut h = History::new();
        h.append(record(1, -100, 800, true));
        h.append(record(2, 650, 50, true));
        let stats = CumulativeStats::from_history(&h).unwrap();
        assert_eq!(stats.total_prize, 550);
        assert_eq!(stats.success_rate, 100.0);
    }
}

// ── History ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod history {
    use super::*;

    #[test]
    fn append_only_in_round_order() {
        let mut h = History::new();
        assert!(h.is_empty());
        h.append(record(1, 700, 0, true));
        h.append(record(2, 0, 0, false));
        assert_eq!(h.len(), 2);
        assert_eq!(h.latest().unwrap().round, RoundNumber(2));
        assert_eq!(h.round(RoundNumber(1)).unwrap().prize, 700);
        assert!(h.round(RoundNumber(3)).is_none());
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod session {
    use super::*;

    #[test]
    fn invalid_config_rejected() {
        let cfg = QueueConfig { num_rounds: 0, ..QueueConfig::default() };
        assert!(matches!(SessionBuilder::new(cfg).build(), Err(SessionError::Core(_))));
    }

    #[test]
    fn empty_roster_rejected() {
        let result = SessionBuilder::new(QueueConfig::default()).participants(Vec::<ParticipantId>::new()).build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn two_round_session() {
        let mut session = SessionBuilder::new(QueueConfig::default()).build().unwrap();
        assert_eq!(session.next_round(), Some(RoundNumber(1)));

        // Round 1: everyone fits (closing 11:30).
        session.submit_round(&batch(&["09:45", "10:10", "10:05"]), &mut NoopObserver).unwrap();
        assert_eq!(session.rounds_played(), 1);
        assert!(session.final_stats().is_none());
        assert_eq!(session.participant_result(ParticipantId(3)).unwrap().queue_position, 2);

        // Round 2: participant 1 comes too late to fit before 11:30.
        let schedule = session
            .submit_round(&batch(&["11:45", "10:00", "10:00"]), &mut NoopObserver)
            .unwrap();
        assert_eq!(schedule.served_count(), 2);
        assert!(session.is_complete());

        let p1 = session.final_stats_for(ParticipantId(1)).unwrap().stats;
        assert_eq!(p1.total_prize, 685);
        assert_eq!(p1.avg_waiting_time, 7.5);
        assert_eq!(p1.success_rate, 50.0);

        // Participant 3: round 1 wait 25 (675), round 2 second in line, wait 30 (670).
        let p3 = session.final_stats_for(ParticipantId(3)).unwrap().stats;
        assert_eq!(p3.total_prize, 1345);
        assert_eq!(p3.avg_waiting_time, 27.5);
        assert_eq!(p3.success_rate, 100.0);
    }

    #[test]
    fn history_length_tracks_rounds() {
        let cfg = QueueConfig { num_rounds: 3, ..QueueConfig::default() };
        let mut session = SessionBuilder::new(cfg).build().unwrap();
        for played in 1..=3u32 {
            session.submit_round(&batch(&["10:00", "10:15"]), &mut NoopObserver).unwrap();
            for id in session.participants().collect::<Vec<_>>() {
                assert_eq!(session.history(id).unwrap().len(), played as usize);
            }
        }
    }

    #[test]
    fn submitting_after_final_round_fails() {
        let cfg = QueueConfig { num_rounds: 1, ..QueueConfig::default() };
        let mut session = SessionBuilder::new(cfg).build().unwrap();
        session.submit_round(&batch(&["10:00"]), &mut NoopObserver).unwrap();
        let again = session.submit_round(&batch(&["10:00"]), &mut NoopObserver);
        assert!(matches!(again, Err(SessionError::SessionComplete(1))));
    }

    #[test]
    fn malformed_round_leaves_histories_untouched() {
        let mut session = SessionBuilder::new(QueueConfig::default()).build().unwrap();
        session.submit_round(&batch(&["10:00", "10:30"]), &mut NoopObserver).unwrap();

        let result = session.submit_round(&batch(&["10:00", "25:61"]), &mut NoopObserver);
        assert!(matches!(
            result,
            Err(SessionError::Schedule(ScheduleError::Time(CoreError::InvalidTimeFormat { .. })))
        ));
        assert_eq!(session.rounds_played(), 1);
        assert_eq!(session.history(ParticipantId(1)).unwrap().len(), 1);
        assert_eq!(session.next_round(), Some(RoundNumber(2)));

        // A corrected resubmission is accepted as round 2.
        session.submit_round(&batch(&["10:00", "10:05"]), &mut NoopObserver).unwrap();
        assert!(session.is_complete());
    }

    #[test]
    fn roster_mismatch_rejected() {
        let mut session = SessionBuilder::new(QueueConfig::default()).build().unwrap();
        session.submit_round(&batch(&["10:00", "10:30"]), &mut NoopObserver).unwrap();

        let changed = RoundBatch::from_pairs([
            (ParticipantId(1), "10:00"),
            (ParticipantId(9), "10:30"),
        ])
        .unwrap();
        match session.submit_round(&changed, &mut NoopObserver) {
            Err(SessionError::RosterMismatch { round, missing, unexpected }) => {
                assert_eq!(round, RoundNumber(2));
                assert_eq!(missing, vec![ParticipantId(2)]);
                assert_eq!(unexpected, vec![ParticipantId(9)]);
            }
            other => panic!("expected RosterMismatch, got {other:?}"),
        }
        assert!(session.history(ParticipantId(9)).is_none());
    }

    #[test]
    fn preset_roster_checked_on_first_round() {
        let mut session = SessionBuilder::new(QueueConfig::default())
            .participants([ParticipantId(1), ParticipantId(2), ParticipantId(3)])
            .build()
            .unwrap();
        let result = session.submit_round(&batch(&["10:00", "10:30"]), &mut NoopObserver);
        assert!(matches!(result, Err(SessionError::RosterMismatch { .. })));
        assert_eq!(session.rounds_played(), 0);
    }

    #[test]
    fn observer_callbacks_in_order() {
        let mut session = SessionBuilder::new(QueueConfig::default()).build().unwrap();
        let mut obs = Recorder::default();
        let rounds = [batch(&["10:00", "10:30"]), batch(&["09:00", "10:30"])];
        session.play(&rounds, &mut obs).unwrap();

        assert_eq!(
            obs.events,
            vec!["start R1", "scheduled R1 (2)", "start R2", "scheduled R2 (2)", "end"]
        );
        assert_eq!(obs.final_stats.len(), 2);
        assert_eq!(obs.final_stats, session.final_stats().unwrap());
    }

    #[test]
    fn rejected_round_fires_no_callbacks() {
        let mut session = SessionBuilder::new(QueueConfig::default()).build().unwrap();
        let mut obs = Recorder::default();
        session.submit_round(&batch(&["10:00", "10:30"]), &mut obs).unwrap();

        let bad_time = session.submit_round(&batch(&["10:00", "9-30"]), &mut obs);
        assert!(matches!(bad_time, Err(SessionError::Schedule(_))));
        let bad_roster = session.submit_round(&batch(&["10:00"]), &mut obs);
        assert!(matches!(bad_roster, Err(SessionError::RosterMismatch { .. })));
        assert_eq!(obs.events, vec!["start R1", "scheduled R1 (2)"]);

        session.submit_round(&batch(&["09:00", "10:30"]), &mut obs).unwrap();
        assert_eq!(
            obs.events,
            vec!["start R1", "scheduled R1 (2)", "start R2", "scheduled R2 (2)", "end"]
        );
    }

    #[test]
    fn history_records_match_schedule() {
        let mut session = SessionBuilder::new(QueueConfig::default()).build().unwrap();
        session.submit_round(&batch(&["09:45", "10:10", "10:05"]), &mut NoopObserver).unwrap();
        let rec = session.history(ParticipantId(2)).unwrap().latest().unwrap().clone();
        assert_eq!(rec.round, RoundNumber(1));
        assert_eq!(rec.arrival_time, "10:10");
        assert_eq!(rec.queue_position, 3);
        assert_eq!(rec.appointment_time, Some(ClockTime(660)));
        assert_eq!(rec.waiting_time, 50);
        assert_eq!(rec.prize, 650);
        assert!(rec.is_complete);
    }
}

// ── Synthetic populations ─────────────────────────────────────────────────────

#[cfg(test)]
mod strategy {
    use super::*;

    #[test]
    fn window_must_be_ordered_and_within_a_day() {
        assert!(UniformWindow::new(ClockTime(660), ClockTime(540)).is_err());
        assert!(UniformWindow::new(ClockTime(540), ClockTime(1440)).is_err());
        assert!(UniformWindow::new(ClockTime(540), ClockTime(660)).is_ok());
    }

    #[test]
    fn uniform_population_is_deterministic_and_in_window() {
        let window = UniformWindow::new(ClockTime(540), ClockTime(660)).unwrap();
        let mut a = Population::new(window, 20, 7);
        let mut b = Population::new(window, 20, 7);
        let ba = a.submit(RoundNumber(1)).unwrap();
        let bb = b.submit(RoundNumber(1)).unwrap();
        assert_eq!(ba, bb);
        for r in ba.records() {
            let t = r.decode().unwrap();
            assert!((ClockTime(540)..=ClockTime(660)).contains(&t));
        }
    }

    #[test]
    fn fixed_population_plays_a_full_session() {
        let mut pop = Population::new(FixedArrival(ClockTime(600)), 4, 1);
        assert_eq!(pop.len(), 4);
        let mut session = SessionBuilder::new(QueueConfig::default())
            .participants(pop.ids())
            .build()
            .unwrap();
        while let Some(round) = session.next_round() {
            let b = pop.submit(round).unwrap();
            session.submit_round(&b, &mut NoopObserver).unwrap();
        }
        // Same order every round: waits 0, 30, 60, 90.
        let waits: Vec<f64> = session
            .final_stats()
            .unwrap()
            .iter()
            .map(|s| s.stats.avg_waiting_time)
            .collect();
        assert_eq!(waits, vec![0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn empty_population_cannot_submit() {
        let mut pop = Population::new(FixedArrival(ClockTime(600)), 0, 1);
        assert!(pop.is_empty());
        assert!(matches!(
            pop.submit(RoundNumber(1)),
            Err(SessionError::Schedule(ScheduleError::EmptyRound))
        ));
    }
}
