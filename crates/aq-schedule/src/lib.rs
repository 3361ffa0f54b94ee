//! `aq-schedule` — arrival batches, the queue scheduler, and CSV loading.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`arrival`]   | `ArrivalRecord`, `RoundBatch`                             |
//! | [`scheduler`] | `schedule_round`, `ScheduleEntry`, `RoundSchedule`        |
//! | [`loader`]    | `load_arrivals_csv`, `load_arrivals_reader`               |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Queue model (summary)
//!
//! One server, fixed-length slots, first-come first-served by arrival time:
//!
//! ```text
//! sort arrivals (stable)      → queue_position = rank
//! current = opening_time
//! for each arrival:
//!   start   = max(arrival, current)
//!   wait    = start - arrival
//!   served  = start < closing_time        (bound is configurable)
//!   current = start + appointment_duration
//! ```

pub mod arrival;
pub mod error;
pub mod loader;
pub mod scheduler;


pub use arrival::{ArrivalRecord, RoundBatch};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_arrivals_csv, load_arrivals_reader};
pub use scheduler::{schedule_round, RoundSchedule, ScheduleEntry};
