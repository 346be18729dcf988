//! Simulation observer trait for progress reporting and data collection.

use gp_core::Turn;

use crate::result::StepResult;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the turn loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step(&mut self, result: &StepResult) {
///         println!("{}: {} active", result.turn, result.active_count());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each turn is processed.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called with every turn's exported step result.
    fn on_step(&mut self, _result: &StepResult) {}

    /// Called once, with the terminal step result.
    fn on_sim_end(&mut self, _final_result: &StepResult) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
