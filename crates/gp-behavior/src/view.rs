//! The read-only per-actor view built once per turn by the mediator.
//!
//! A `LocalView` is everything one actor may legitimately know about the
//! current turn: its own state, what visibility rules let it see, and a
//! borrow of the shared wall grid for local pathfinding.  It never contains
//! an actor or element the visibility rules exclude, and element sightings
//! never carry authenticity.
//!
//! The actor's private memory is *not* embedded here — the engine passes
//! exactly one `&mut ActorMemory` alongside the view, so a strategy can
//! write only its own.

use gp_core::{ActorPublic, Cell, ElementClass, ElementId, Faction, Role, Turn};
use gp_grid::Grid;

use gp_actor::StatusSet;

/// One visible map element, stripped to its public class.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElementSighting {
    pub id:    ElementId,
    pub pos:   Cell,
    pub class: ElementClass,
}

/// The frozen per-turn view handed to [`Strategy::decide`][crate::Strategy::decide].
pub struct LocalView<'a> {
    /// This actor's own public status.
    pub me: ActorPublic,
    /// Current cell (views are only built for actors on the board).
    pub pos: Cell,
    pub role: Role,
    pub turn: Turn,

    // ── Own resources (private, never in peers' views) ────────────────────
    pub stamina: u32,
    pub charge:  u32,
    pub status:  StatusSet,
    /// Vision range after the low-stamina penalty.
    pub effective_vision: u32,
    /// Whether the exit gate stands open — public world state, visible to
    /// everyone regardless of position.
    pub exit_open: bool,

    // ── What visibility rules admit ───────────────────────────────────────
    /// Visible peers (never includes `me`).
    pub actors: Vec<ActorPublic>,
    /// Visible elements, public class only.
    pub elements: Vec<ElementSighting>,

    /// The shared wall grid, for local pathfinding and terrain scoring.
    pub grid: &'a Grid,
}

impl<'a> LocalView<'a> {
    /// Visible actors of the opposing faction.
    pub fn visible_opponents(&self) -> impl Iterator<Item = &ActorPublic> + '_ {
        let mine = self.me.faction;
        self.actors.iter().filter(move |a| a.faction != mine)
    }

    /// Visible actors of this actor's own faction.
    pub fn visible_allies(&self) -> impl Iterator<Item = &ActorPublic> + '_ {
        let mine = self.me.faction;
        self.actors.iter().filter(move |a| a.faction == mine)
    }

    /// Convenience for the common "any pursuer in sight?" check.
    pub fn sees_pursuer(&self) -> bool {
        self.actors.iter().any(|a| a.faction == Faction::Pursuer)
    }
}
