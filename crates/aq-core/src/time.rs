//! Clock-time model and the `HH:MM` codec.
//!
//! # Design
//!
//! Every time of day is a `ClockTime`: an integer count of minutes since
//! midnight.  All queue arithmetic (start times, waits, closing time) is done
//! on this integer, so it is exact and comparisons are O(1).  Text only
//! appears at the edges:
//!
//! ```text
//!   "09:45"  --decode-->  ClockTime(585)  --Display/decode_minutes-->  "09:45"
//! ```
//!
//! # Accepted input
//!
//! `decode` accepts `H:MM` or `HH:MM` with ASCII digits only, hour in
//! `[0, 23]` and minute in `[0, 59]`.  A one-digit minute (`"9:5"`) is
//! rejected; a one-digit hour (`"9:05"`) is accepted and canonicalizes to
//! `"09:05"`.
//!
//! Formatting is not bounded: `decode_minutes(1500)` is `"25:00"`.  A slot
//! label past midnight is legitimate output even though it is not valid input.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, TimeFormatError};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

const MAX_HOUR: u32 = 23;
const MAX_MINUTE: u32 = 59;

// ── ClockTime ─────────────────────────────────────────────────────────────────

/// Minutes since midnight.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ClockTime(pub u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from an hour and minute pair without range checks.
    #[inline]
    pub fn from_hm(hours: u32, minutes: u32) -> ClockTime {
        ClockTime(hours * MINUTES_PER_HOUR + minutes)
    }

    /// Whole hours since midnight (may exceed 23).
    #[inline]
    pub fn hours(self) -> u32 {
        self.0 / MINUTES_PER_HOUR
    }

    /// Minute within the hour.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }

    /// Return the time `n` minutes after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> ClockTime {
        ClockTime(self.0 + n)
    }

    /// Like [`offset`][Self::offset], but stops at the largest representable
    /// time instead of overflowing.
    #[inline]
    pub fn saturating_offset(self, n: u32) -> ClockTime {
        ClockTime(self.0.saturating_add(n))
    }

    /// Minutes elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: ClockTime) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u32> for ClockTime {
    type Output = ClockTime;
    #[inline]
    fn add(self, rhs: u32) -> ClockTime {
        ClockTime(self.0 + rhs)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<ClockTime> {
        decode(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = CoreError;

    fn try_from(s: String) -> CoreResult<ClockTime> {
        decode(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_string()
    }
}

// ── Codec ─────────────────────────────────────────────────────────────────────

/// Format an hour and minute pair as zero-padded `HH:MM`.
pub fn encode(hours: u32, minutes: u32) -> String {
    format!("{hours:02}:{minutes:02}")
}

/// Parse `HH:MM` into minutes since midnight.
///
/// Fails with [`CoreError::InvalidTimeFormat`] when the separator is missing,
/// either part is not ASCII digits (or has the wrong digit count), or the
/// hour or minute is out of range.
pub fn decode(text: &str) -> CoreResult<ClockTime> {
    let Some((hour_part, minute_part)) = text.split_once(':') else {
        return Err(CoreError::time_format(text, TimeFormatError::MissingSeparator));
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour_part) || !all_digits(minute_part) {
        return Err(CoreError::time_format(text, TimeFormatError::NonDigit));
    }
    if hour_part.len() > 2 || minute_part.len() != 2 {
        return Err(CoreError::time_format(text, TimeFormatError::DigitCount));
    }

    // At most two ASCII digits each, so the parses cannot overflow.
    let hours: u32 = hour_part
        .parse()
        .map_err(|_| CoreError::time_format(text, TimeFormatError::NonDigit))?;
    let minutes: u32 = minute_part
        .parse()
        .map_err(|_| CoreError::time_format(text, TimeFormatError::NonDigit))?;

    if hours > MAX_HOUR {
        return Err(CoreError::time_format(text, TimeFormatError::HourOutOfRange(hours)));
    }
    if minutes > MAX_MINUTE {
        return Err(CoreError::time_format(text, TimeFormatError::MinuteOutOfRange(minutes)));
    }

    Ok(ClockTime::from_hm(hours, minutes))
}

/// Format a minute offset as `HH:MM`.  Hours past 23 are printed as-is.
pub fn decode_minutes(minutes: u32) -> String {
    ClockTime(minutes).to_string()
}

/// Validate submitted text and return its zero-padded canonical form.
pub fn canonicalize(text: &str) -> CoreResult<String> {
    decode(text).map(|t| t.to_string())
}
