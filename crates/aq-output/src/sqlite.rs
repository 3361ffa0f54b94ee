//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `round_results` and `final_stats`.  Like the CSV backend, a
//! new writer replaces the previous run's output.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{FinalStatsRow, OutputResult, RoundResultRow};

/// Writes session output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir`, initialise the schema and clear
    /// rows left by an earlier run.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS round_results (
                 participant_id   INTEGER NOT NULL,
                 round_number     INTEGER NOT NULL,
                 arrival_time     TEXT    NOT NULL,
                 waiting_time     INTEGER NOT NULL,
                 queue_position   INTEGER NOT NULL,
                 appointment_time TEXT    NOT NULL,
                 is_complete      INTEGER NOT NULL,
                 prize            INTEGER NOT NULL,
                 PRIMARY KEY (participant_id, round_number)
             );
             CREATE TABLE IF NOT EXISTS final_stats (
                 participant_id   INTEGER PRIMARY KEY,
                 total_prize      INTEGER NOT NULL,
                 avg_waiting_time REAL    NOT NULL,
                 success_rate     REAL    NOT NULL
             );
             DELETE FROM round_results;
             DELETE FROM final_stats;",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_round_results(&mut self, rows: &[RoundResultRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO round_results \
                 (participant_id, round_number, arrival_time, waiting_time, \
                  queue_position, appointment_time, is_complete, prize) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.participant_id,
                    row.round_number,
                    row.arrival_time,
                    row.waiting_time,
                    row.queue_position,
                    row.appointment_time,
                    row.is_complete as i64,
                    row.prize,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_final_stats(&mut self, rows: &[FinalStatsRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO final_stats \
                 (participant_id, total_prize, avg_waiting_time, success_rate) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.participant_id,
                    row.total_prize,
                    row.avg_waiting_time,
                    row.success_rate,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
