//! The per-turn export record.

use std::collections::BTreeMap;

use gp_behavior::Intent;
use gp_core::{ActorId, ActorPublic, Turn};

use crate::action::Action;
use crate::state::TerminationReason;

/// One turn's inputs and outcome, as plain read-only data.
///
/// Safe to hand to any external consumer — it borrows nothing from the
/// engine and contains only public actor status.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub turn:     Turn,
    pub terminal: bool,
    pub reason:   Option<TerminationReason>,
    /// What every active actor asked for this turn.
    pub intents:  BTreeMap<ActorId, Intent>,
    /// What the resolver decided for every actor that had an intent.
    pub actions:  BTreeMap<ActorId, Action>,
    /// Public status of every actor after the commit.
    pub snapshot: Vec<ActorPublic>,
}

impl StepResult {
    /// Evaders currently escaped.
    pub fn escaped_count(&self) -> usize {
        self.snapshot.iter().filter(|a| a.escaped).count()
    }

    /// Actors still alive and on the board.
    pub fn active_count(&self) -> usize {
        self.snapshot.iter().filter(|a| a.active()).count()
    }
}
