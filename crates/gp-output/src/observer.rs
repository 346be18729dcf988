//! `RecordingObserver<W>` — bridges `SimObserver` to a `TurnWriter`.

use gp_engine::{SimObserver, StepResult};

use crate::row::{ActorTurnRow, TurnSummaryRow};
use crate::writer::TurnWriter;
use crate::OutputError;

/// A [`SimObserver`] that records every step result through any
/// [`TurnWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct RecordingObserver<W: TurnWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TurnWriter> RecordingObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TurnWriter> SimObserver for RecordingObserver<W> {
    fn on_step(&mut self, result: &StepResult) {
        let rows: Vec<ActorTurnRow> = result
            .snapshot
            .iter()
            .map(|actor| ActorTurnRow {
                turn:     result.turn.0,
                actor_id: actor.id.0,
                faction:  actor.faction.as_str(),
                x:        actor.pos.map(|p| p.x),
                y:        actor.pos.map(|p| p.y),
                alive:    actor.alive,
                escaped:  actor.escaped,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_actor_rows(&rows);
            self.store_err(result);
        }

        let summary = TurnSummaryRow {
            turn:     result.turn.0,
            active:   result.active_count() as u64,
            escaped:  result.escaped_count() as u64,
            terminal: result.terminal,
            reason:   result.reason.map(|r| r.as_str().to_string()).unwrap_or_default(),
        };
        let result = self.writer.write_summary(&summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_result: &StepResult) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
