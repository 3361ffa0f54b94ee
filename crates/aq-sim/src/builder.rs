//! Fluent builder for constructing a [`Session`].

use std::collections::{BTreeMap, BTreeSet};

use aq_core::{ParticipantId, QueueConfig};

use crate::{Session, SessionError, SessionResult};

/// Fluent builder for [`Session`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.participants(v)`  | Roster taken from the first round's batch |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(config)
///     .participants((1..=6).map(ParticipantId))
///     .build()?;
/// ```
pub struct SessionBuilder {
    config: QueueConfig,
    roster: Option<BTreeSet<ParticipantId>>,
}

impl SessionBuilder {
    pub fn new(config: QueueConfig) -> Self {
        Self { config, roster: None }
    }

    /// Fix the roster up front.  Every round must then contain exactly these
    /// participants.
    pub fn participants<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        self.roster = Some(ids.into_iter().collect());
        self
    }

    /// Validate the configuration and return a fresh [`Session`].
    pub fn build(self) -> SessionResult<Session> {
        self.config.validate()?;

        if self.roster.as_ref().is_some_and(BTreeSet::is_empty) {
            return Err(SessionError::Config("participant roster is empty".into()));
        }

        Ok(Session {
            config:        self.config,
            roster:        self.roster,
            histories:     BTreeMap::new(),
            rounds_played: 0,
            last_schedule: None,
            final_stats:   None,
        })
    }
}
