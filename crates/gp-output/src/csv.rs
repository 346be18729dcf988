//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `turn_log.csv` — one row per actor per turn
//! - `turn_summaries.csv` — one row per turn

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TurnWriter;
use crate::{ActorTurnRow, OutputResult, TurnSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    turn_log:  Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut turn_log = Writer::from_path(dir.join("turn_log.csv"))?;
        turn_log.write_record(["turn", "actor_id", "faction", "x", "y", "alive", "escaped"])?;

        let mut summaries = Writer::from_path(dir.join("turn_summaries.csv"))?;
        summaries.write_record(["turn", "active", "escaped", "terminal", "reason"])?;

        Ok(Self {
            turn_log,
            summaries,
            finished: false,
        })
    }
}

impl TurnWriter for CsvWriter {
    fn write_actor_rows(&mut self, rows: &[ActorTurnRow]) -> OutputResult<()> {
        for row in rows {
            self.turn_log.write_record(&[
                row.turn.to_string(),
                row.actor_id.to_string(),
                row.faction.to_string(),
                row.x.map(|v| v.to_string()).unwrap_or_default(),
                row.y.map(|v| v.to_string()).unwrap_or_default(),
                (row.alive as u8).to_string(),
                (row.escaped as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.turn.to_string(),
            row.active.to_string(),
            row.escaped.to_string(),
            (row.terminal as u8).to_string(),
            row.reason.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.turn_log.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
