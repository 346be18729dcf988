//! The `Strategy` trait and the `Brain` dispatcher.

use gp_actor::{ActorMemory, ActorRng};
use gp_core::{ActorId, Faction, Role};

use crate::evader::ScoutStrategy;
use crate::pursuer::PursuerStrategy;
use crate::support::SupportStrategy;
use crate::{CoordinationBoard, Intent, LocalView};

/// Pluggable per-actor decision logic.
///
/// `decide` is called once per active actor per turn, in ascending
/// [`ActorId`] order.  All world reads go through `view` (built from the
/// frozen pre-decision snapshot); the only writable state is the actor's own
/// `memory`, its own `rng`, and the turn-scoped coordination `board`
/// (evader strategies receive the board but have no business touching it).
///
/// Implementations must be deterministic given the same inputs — every
/// random draw comes from the supplied `rng`.
pub trait Strategy {
    fn decide(
        &self,
        actor:  ActorId,
        view:   &LocalView<'_>,
        memory: &mut ActorMemory,
        board:  &mut CoordinationBoard,
        rng:    &mut ActorRng,
    ) -> Intent;
}

/// Tagged dispatcher over the concrete strategies — one variant per role
/// family, no trait objects, no inheritance.
pub enum Brain {
    Scout(ScoutStrategy),
    Support(SupportStrategy),
    Pursuer(PursuerStrategy),
}

impl Brain {
    /// The default brain for a role, with role-typical tuning.
    pub fn for_role(role: Role) -> Brain {
        match role {
            Role::Scout   => Brain::Scout(ScoutStrategy::default()),
            Role::Support => Brain::Support(SupportStrategy::default()),
            Role::Chaser | Role::Blocker | Role::Ambusher => {
                Brain::Pursuer(PursuerStrategy::new(role))
            }
        }
    }
}

impl Strategy for Brain {
    fn decide(
        &self,
        actor:  ActorId,
        view:   &LocalView<'_>,
        memory: &mut ActorMemory,
        board:  &mut CoordinationBoard,
        rng:    &mut ActorRng,
    ) -> Intent {
        match self {
            Brain::Scout(s)   => s.decide(actor, view, memory, board, rng),
            Brain::Support(s) => s.decide(actor, view, memory, board, rng),
            Brain::Pursuer(s) => s.decide(actor, view, memory, board, rng),
        }
    }
}

// ── Shared knowledge intake ───────────────────────────────────────────────────

/// Fold the turn's sightings into the actor's own memory.
///
/// Every strategy calls this first: element sightings refresh known
/// elements (without touching authenticity), actor sightings refresh the
/// last-seen table, and the current cell's visit counter advances.  When
/// `track_opponents` is set, visible opposing actors are also appended to
/// the observation ring (the support evader uses this for threat-velocity
/// scoring; pursuer tracking instead happens in the mediator's post-turn
/// hook, so pursuers pass `false` to avoid double-counting).
pub(crate) fn absorb_view(view: &LocalView<'_>, memory: &mut ActorMemory, track_opponents: bool) {
    for el in &view.elements {
        memory.record_element(el.id, el.pos, el.class);
    }
    for actor in &view.actors {
        if let Some(pos) = actor.pos {
            memory.record_sighting(actor.id, pos, actor.faction, view.turn);
            if track_opponents && actor.faction != view.me.faction {
                memory.observe(actor.id, pos, view.turn);
            }
        }
    }

    // Stuck tracking: consecutive turns on the same cell.
    if memory.last_pos == Some(view.pos) {
        memory.stuck_streak += 1;
    } else {
        memory.stuck_streak = 0;
    }
    memory.last_pos = Some(view.pos);
    memory.visit(view.pos);
}

/// `true` when `faction` is the evader side — a tiny readability helper for
/// the strategies' filters.
#[inline]
pub(crate) fn is_pursuer(faction: Faction) -> bool {
    faction == Faction::Pursuer
}
