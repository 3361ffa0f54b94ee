//! `aq-sim` — multi-round session driver for the appointment queue simulator.
//!
//! # Round lifecycle
//!
//! ```text
//! for round in 1..=config.num_rounds:
//!   ① Submit    — the caller hands over the complete RoundBatch.
//!   ② Validate  — same participant set as round 1.
//!   ③ Schedule  — aq_schedule::schedule_round (pure; fails whole round).
//!   ④ Record    — append one RoundRecord to each participant's History.
//!   ⑤ Aggregate — last round only: CumulativeStats per participant.
//! ```
//!
//! Nothing is committed until ③ succeeds, so a rejected round leaves every
//! history untouched.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use aq_core::QueueConfig;
//! use aq_sim::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(QueueConfig::default()).build()?;
//! for batch in &batches {
//!     session.submit_round(batch, &mut NoopObserver)?;
//! }
//! let stats = session.final_stats().unwrap();
//! ```

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod history;
pub mod observer;
pub mod session;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use aggregate::{CumulativeStats, FinalStats};
pub use builder::SessionBuilder;
pub use error::{SessionError, SessionResult};
pub use history::{History, RoundRecord};
pub use observer::{NoopObserver, SessionObserver};
pub use session::Session;
pub use strategy::{ArrivalStrategy, FixedArrival, Population, UniformWindow};
