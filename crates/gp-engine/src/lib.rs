//! `gp-engine` — the turn loop orchestrator for gridpursuit.
//!
//! # One turn
//!
//! ```text
//! WorldState ─→ VisibilityMediator.build_views ─→ Brain.decide (per actor)
//!        ─→ ActionResolver.resolve ─→ WorldState.apply ─→ post-turn hooks
//!        ─→ StepResult
//! ```
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`element`] | `ElementKind`, `MapElement`, `ElementTable`                |
//! | [`action`]  | `Action`, `StatusUpdate`, `Resolution`                     |
//! | [`mediator`]| `VisibilityMediator` — views + post-turn knowledge hooks   |
//! | [`resolver`]| `ActionResolver` — the six resolution phases               |
//! | [`state`]   | `WorldState`, `Phase`, `TerminationReason`                 |
//! | [`result`]  | `StepResult` — the per-turn export record                  |
//! | [`sim`]     | `Simulation` — the turn loop                               |
//! | [`builder`] | `SimulationBuilder` — validated setup                      |
//! | [`observer`]| `SimObserver`, `NoopObserver`                              |
//! | [`error`]   | `EngineError`, `EngineResult<T>`                           |
//!
//! The whole engine is single-threaded and turn-synchronous: all decisions
//! for a turn read one frozen snapshot, resolution is strictly sequential,
//! and a fixed seed reproduces a run turn for turn.

pub mod action;
pub mod builder;
pub mod element;
pub mod error;
pub mod mediator;
pub mod observer;
pub mod resolver;
pub mod result;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::{Action, Resolution, StatusUpdate};
pub use builder::SimulationBuilder;
pub use element::{ElementKind, ElementTable, MapElement};
pub use error::{EngineError, EngineResult};
pub use mediator::VisibilityMediator;
pub use observer::{NoopObserver, SimObserver};
pub use resolver::{ActionResolver, ResolverTuning};
pub use result::StepResult;
pub use sim::Simulation;
pub use state::{Phase, TerminationReason, WorldState};
