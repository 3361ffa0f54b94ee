use aq_core::{CoreError, ParticipantId, RoundNumber};
use aq_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error("round {round}: participants {missing:?} missing, {unexpected:?} not in the session roster")]
    RosterMismatch {
        round:      RoundNumber,
        missing:    Vec<ParticipantId>,
        unexpected: Vec<ParticipantId>,
    },

    #[error("all {0} configured rounds have already been played")]
    SessionComplete(u32),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SessionResult<T> = Result<T, SessionError>;
