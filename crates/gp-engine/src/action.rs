//! Resolved actions and the typed status-update vocabulary.
//!
//! An `Action` is what the resolver decided actually happens to one actor
//! this turn.  Exactly one action exists per submitted intent, and each is
//! consumed exactly once by `WorldState::apply`.

use std::collections::BTreeMap;

use gp_core::{ActorId, Cell, ElementId};

/// One typed attribute change, applied atomically during commit.
///
/// Updates are deliberately closed-world: the commit step knows which
/// updates make sense for which actor kinds, and the configured
/// `StatusPolicy` decides whether an inapplicable one is dropped or fatal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The actor was intercepted: dead, position cleared.
    Dead,
    /// A guard charm absorbed an interception (single use).
    ConsumeCharm,
    /// Picked up a charm.
    GrantCharm,
    /// Trap or backlash stun for the given duration.
    Stun(u32),
    /// Shockwave incapacitation (pursuers only).
    Confuse(u32),
    /// Rally buff: speed +1 and cheaper movement for the duration.
    Haste(u32),
    /// One-turn decrement of an already-running haste (upkeep phase).
    HasteTick,
    /// Enter the identification trance (support only).
    Channel(u32),
    /// Skill cost, deducted only from casters that survived the turn.
    SpendCharge(u32),
    /// Movement exertion.
    SpendStamina(u32),
    /// Rest or medkit recovery (clamped to the actor's maximum).
    RestoreStamina(u32),
}

/// The resolver's verdict for one actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Action {
    /// The cell the actor ends the turn on; `None` when it died.
    pub target: Option<Cell>,
    /// Status changes, applied in order.
    pub updates: Vec<StatusUpdate>,
    /// Element claimed at the final cell, if any (at most one actor claims
    /// a given element per turn).
    pub pickup: Option<ElementId>,
}

impl Action {
    /// A no-effect action holding position at `at`.
    pub fn stay(at: Cell) -> Self {
        Self { target: Some(at), updates: Vec::new(), pickup: None }
    }
}

/// Everything `resolve` produced for one turn.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// One action per submitted intent — no silent drops.
    pub actions: BTreeMap<ActorId, Action>,
    /// Where each interception death happened, for the failure-memory hook.
    pub deaths: Vec<(ActorId, Cell)>,
}
