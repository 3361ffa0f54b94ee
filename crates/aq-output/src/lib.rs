//! `aq-output` — tabular export for the appointment queue simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                |
//! |-----------|-------------|----------------------------------------------|
//! | *(none)*  | CSV         | `round_results.csv`, `final_stats.csv`       |
//! | `sqlite`  | SQLite      | `output.db`                                  |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`SessionOutputObserver`], which implements `aq_sim::SessionObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use aq_output::{CsvWriter, SessionOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SessionOutputObserver::new(writer);
//! session.play(&batches, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SessionOutputObserver;
pub use row::{export_record, ExportRecord, FinalStatsRow, RoundResultRow, NO_APPOINTMENT};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
