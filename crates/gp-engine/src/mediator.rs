//! Visibility mediation: per-actor views before the decide phase, and the
//! knowledge hooks that run after the commit.
//!
//! Visibility rule: a peer or element is in view iff Manhattan distance ≤
//! the observer's *effective* range AND line of sight holds.  Low stamina
//! halves the effective range (floor, minimum 1).  A channeling actor is
//! clairvoyant — the line-of-sight test is skipped, the range test never is.
//!
//! The post-turn hooks are the only sanctioned cross-actor knowledge flows:
//! pursuers record what they saw into their own memories, capture sites
//! propagate to evader failure memories, and channeling supports identify
//! and broadcast element authenticity to allies — never to pursuers.

use std::collections::BTreeMap;

use gp_actor::ActorMemories;
use gp_behavior::{ElementSighting, LocalView};
use gp_core::{ActorId, Cell, ElementId, Faction, Role, SimConfig};
use gp_grid::Pathfinder;

use crate::action::Resolution;
use crate::element::ElementKind;
use crate::state::WorldState;

/// Builds local views and runs the post-turn knowledge hooks.
pub struct VisibilityMediator {
    low_stamina_threshold: u32,
}

impl VisibilityMediator {
    pub fn new(config: &SimConfig) -> Self {
        Self { low_stamina_threshold: config.low_stamina_threshold }
    }

    // ── View building ─────────────────────────────────────────────────────

    /// One `LocalView` per alive, non-escaped actor, all built from the same
    /// frozen `world` — no view can observe another actor's decision.
    pub fn build_views<'a>(&self, world: &'a WorldState) -> BTreeMap<ActorId, LocalView<'a>> {
        let pf = Pathfinder::new(&world.grid);
        let mut views = BTreeMap::new();

        for id in world.actors.actor_ids() {
            if !world.actors.is_active(id) {
                continue;
            }
            let i = id.index();
            let Some(pos) = world.actors.pos[i] else { continue };

            let range = self.effective_range(world, id);
            let clairvoyant = world.actors.status[i].channeling();

            let actors = world
                .actors
                .actor_ids()
                .filter(|&other| other != id && world.actors.is_active(other))
                .filter(|&other| {
                    world.actors.pos[other.index()]
                        .is_some_and(|p| visible(&pf, pos, p, range, clairvoyant))
                })
                .map(|other| world.actors.public(other))
                .collect();

            let elements = world
                .elements
                .iter()
                .filter(|el| visible(&pf, pos, el.pos, range, clairvoyant))
                .map(|el| ElementSighting { id: el.id, pos: el.pos, class: el.kind.class() })
                .collect();

            views.insert(id, LocalView {
                me: world.actors.public(id),
                pos,
                role: world.actors.role[i],
                turn: world.turn,
                stamina: world.actors.stamina[i],
                charge: world.actors.charge[i],
                status: world.actors.status[i],
                effective_vision: range,
                exit_open: world.exit_open,
                actors,
                elements,
                grid: &world.grid,
            });
        }

        views
    }

    /// Vision range after the low-stamina penalty: halved (floor), never
    /// below 1.
    fn effective_range(&self, world: &WorldState, id: ActorId) -> u32 {
        let i = id.index();
        let range = world.actors.vision_range[i];
        if world.actors.stamina[i] < self.low_stamina_threshold {
            (range / 2).max(1)
        } else {
            range
        }
    }

    // ── Post-turn hooks ───────────────────────────────────────────────────

    /// Run every post-commit knowledge flow, in a fixed order:
    ///
    /// 1. mark elements discovered,
    /// 2. pursuers record evader sightings (observer-side memory only),
    /// 3. capture sites enter evader failure memories,
    /// 4. channeling supports identify known keys,
    /// 5. identified authenticity broadcasts to evader allies,
    /// 6. consumed elements are purged from all memories.
    pub fn after_turn(
        &self,
        world:      &mut WorldState,
        memories:   &mut ActorMemories,
        resolution: &Resolution,
    ) {
        self.mark_discovered(world);
        self.record_pursuer_tracks(world, memories);

        for &(_victim, cell) in &resolution.deaths {
            for id in world.actors.actor_ids() {
                if world.actors.faction(id) == Faction::Evader && world.actors.is_active(id) {
                    memories.get_mut(id).mark_danger(cell);
                }
            }
        }

        self.identify_elements(world, memories);
        self.broadcast_identified(world, memories);
        WorldState::purge_consumed(memories, resolution);
    }

    /// An element seen by anyone this turn counts as discovered.
    fn mark_discovered(&self, world: &mut WorldState) {
        let pf = Pathfinder::new(&world.grid);
        let mut seen: Vec<ElementId> = Vec::new();

        for element in world.elements.iter() {
            if element.discovered {
                continue;
            }
            let spotted = world.actors.actor_ids().any(|id| {
                world.actors.is_active(id)
                    && world.actors.pos[id.index()].is_some_and(|pos| {
                        let range = self.effective_range(world, id);
                        let clairvoyant = world.actors.status[id.index()].channeling();
                        visible(&pf, pos, element.pos, range, clairvoyant)
                    })
            });
            if spotted {
                seen.push(element.id);
            }
        }
        for id in seen {
            if let Some(element) = world.elements.get_mut(id) {
                element.discovered = true;
            }
        }
    }

    /// Every pursuer that can see an evader right now appends the sighting
    /// to its own observation ring — never to anyone else's.
    fn record_pursuer_tracks(&self, world: &WorldState, memories: &mut ActorMemories) {
        let pf = Pathfinder::new(&world.grid);

        for pursuer in world.actors.actor_ids() {
            if world.actors.faction(pursuer) != Faction::Pursuer
                || !world.actors.is_active(pursuer)
            {
                continue;
            }
            let Some(ppos) = world.actors.pos[pursuer.index()] else { continue };
            let range = self.effective_range(world, pursuer);

            for evader in world.actors.actor_ids() {
                if world.actors.faction(evader) != Faction::Evader
                    || !world.actors.is_active(evader)
                {
                    continue;
                }
                let Some(epos) = world.actors.pos[evader.index()] else { continue };
                if visible(&pf, ppos, epos, range, false) {
                    let memory = memories.get_mut(pursuer);
                    memory.observe(evader, epos, world.turn);
                    memory.record_sighting(evader, epos, Faction::Evader, world.turn);
                }
            }
        }
    }

    /// A channeling support identifies every key it knows within vision
    /// range (clairvoyant: range-only), marking the element and learning
    /// its authenticity.
    fn identify_elements(&self, world: &mut WorldState, memories: &mut ActorMemories) {
        for support in world.actors.actor_ids() {
            let i = support.index();
            if world.actors.role[i] != Role::Support
                || !world.actors.is_active(support)
                || !world.actors.status[i].channeling()
            {
                continue;
            }
            let Some(spos) = world.actors.pos[i] else { continue };
            let range = self.effective_range(world, support);

            let candidates: Vec<(ElementId, Cell, ElementKind)> = memories
                .get(support)
                .known_elements
                .iter()
                .filter(|(_, known)| known.authentic.is_none())
                .filter_map(|(&eid, _)| {
                    let element = world.elements.get(eid)?;
                    matches!(element.kind, ElementKind::Key { .. })
                        .then_some((eid, element.pos, element.kind))
                })
                .filter(|&(_, pos, _)| spos.manhattan(pos) <= range)
                .collect();

            for (eid, pos, kind) in candidates {
                if let Some(element) = world.elements.get_mut(eid) {
                    element.identified = true;
                }
                if let ElementKind::Key { real } = kind {
                    memories
                        .get_mut(support)
                        .learn_authenticity(eid, pos, kind.class(), real);
                }
            }
        }
    }

    /// While any support channels, its identified element facts reach every
    /// living evader.  Pursuer memories are never written.
    fn broadcast_identified(&self, world: &WorldState, memories: &mut ActorMemories) {
        for support in world.actors.actor_ids() {
            let i = support.index();
            if world.actors.role[i] != Role::Support
                || !world.actors.is_active(support)
                || !world.actors.status[i].channeling()
            {
                continue;
            }

            let facts: Vec<_> = memories
                .get(support)
                .known_elements
                .iter()
                .filter_map(|(&eid, known)| {
                    known.authentic.map(|auth| (eid, known.pos, known.class, auth))
                })
                .collect();

            for ally in world.actors.actor_ids() {
                if ally == support
                    || world.actors.faction(ally) != Faction::Evader
                    || !world.actors.is_active(ally)
                {
                    continue;
                }
                let memory = memories.get_mut(ally);
                for &(eid, pos, class, auth) in &facts {
                    memory.learn_authenticity(eid, pos, class, auth);
                }
            }
        }
    }
}

/// The shared visibility predicate.
fn visible(pf: &Pathfinder<'_>, from: Cell, to: Cell, range: u32, clairvoyant: bool) -> bool {
    from.manhattan(to) <= range && (clairvoyant || pf.has_line_of_sight(from, to))
}
