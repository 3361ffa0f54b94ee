//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `round_results.csv`
//! - `final_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FinalStatsRow, OutputResult, RoundResultRow};

/// Writes session output to two CSV files.
pub struct CsvWriter {
    rounds:   Writer<File>,
    finals:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut rounds = Writer::from_path(dir.join("round_results.csv"))?;
        rounds.write_record([
            "participant_id",
            "round_number",
            "arrival_time",
            "waiting_time",
            "queue_position",
            "appointment_time",
            "is_complete",
            "prize",
        ])?;

        let mut finals = Writer::from_path(dir.join("final_stats.csv"))?;
        finals.write_record(["participant_id", "total_prize", "avg_waiting_time", "success_rate"])?;

        Ok(Self {
            rounds,
            finals,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_round_results(&mut self, rows: &[RoundResultRow]) -> OutputResult<()> {
        for row in rows {
            self.rounds.write_record(&[
                row.participant_id.to_string(),
                row.round_number.to_string(),
                row.arrival_time.clone(),
                row.waiting_time.to_string(),
                row.queue_position.to_string(),
                row.appointment_time.clone(),
                (row.is_complete as u8).to_string(),
                row.prize.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_final_stats(&mut self, rows: &[FinalStatsRow]) -> OutputResult<()> {
        for row in rows {
            self.finals.write_record(&[
                row.participant_id.to_string(),
                row.total_prize.to_string(),
                format!("{:.1}", row.avg_waiting_time),
                format!("{:.1}", row.success_rate),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rounds.flush()?;
        self.finals.flush()?;
        Ok(())
    }
}
