//! Public per-actor status — the cross-actor visibility currency.
//!
//! `ActorPublic` is everything one actor is allowed to learn about another by
//! looking at it, and everything the step-result snapshot exports.  Private
//! state (memory, resources, status timers) never travels through this type.

use crate::{ActorId, Cell, Faction};

/// The externally observable status of one actor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorPublic {
    pub id:      ActorId,
    pub faction: Faction,
    /// `None` when dead or escaped — such actors are off the board.
    pub pos:     Option<Cell>,
    pub alive:   bool,
    pub escaped: bool,
}

impl ActorPublic {
    /// `true` if the actor is still on the board.
    #[inline]
    pub fn active(&self) -> bool {
        self.alive && !self.escaped
    }
}
