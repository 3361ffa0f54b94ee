//! Core error types.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// Why an `HH:MM` string was rejected.
///
/// The messages are phrased for the person who typed the value: each one
/// says what to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("use the HH:MM format, for example 09:30 or 14:15")]
    MissingSeparator,

    #[error("hours and minutes must be numbers")]
    NonDigit,

    #[error("hours take one or two digits and minutes exactly two, for example 09:05")]
    DigitCount,

    #[error("hours must be between 00 and 23 (got {0})")]
    HourOutOfRange(u32),

    #[error("minutes must be between 00 and 59 (got {0})")]
    MinuteOutOfRange(u32),
}

/// The top-level error type for `aq-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid time format {input:?}: {reason}")]
    InvalidTimeFormat {
        input:  String,
        reason: TimeFormatError,
    },

    /// Aggregation was requested for a participant with no recorded rounds.
    #[error("cannot aggregate an empty round history")]
    EmptyHistory,

    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    pub(crate) fn time_format(input: &str, reason: TimeFormatError) -> Self {
        CoreError::InvalidTimeFormat { input: input.to_owned(), reason }
    }
}

/// Shorthand result type for all `aq-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
