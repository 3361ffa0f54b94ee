use aq_core::{CoreError, ParticipantId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// An arrival time failed to decode.  The whole round is rejected.
    #[error(transparent)]
    Time(#[from] CoreError),

    #[error("participant {0} submitted more than once in the same round")]
    DuplicateParticipant(ParticipantId),

    #[error("a round needs at least one arrival")]
    EmptyRound,

    #[error("arrival parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
