//! `aq-core` — foundational types for the appointment queue simulator.
//!
//! This crate is a dependency of every other `aq-*` crate.  It has no `aq-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`ids`]    | `ParticipantId`, `RoundNumber`                                |
//! | [`time`]   | `ClockTime`, `encode`, `decode`, `decode_minutes`, `canonicalize` |
//! | [`config`] | `QueueConfig`, `CapacityPolicy`, `ClosingBound`, `ClockAdvance` |
//! | [`rng`]    | `ParticipantRng` (per-participant, seeded)                    |
//! | [`error`]  | `CoreError`, `TimeFormatError`, `CoreResult`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `QueueConfig` from a JSON file.           |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CapacityPolicy, ClockAdvance, ClosingBound, QueueConfig};
pub use error::{CoreError, CoreResult, TimeFormatError};
pub use ids::{ParticipantId, RoundNumber};
pub use rng::ParticipantRng;
pub use time::{canonicalize, decode, decode_minutes, encode, ClockTime};
