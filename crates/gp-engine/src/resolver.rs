//! Intent resolution: one consistent outcome from many simultaneous asks.
//!
//! Six strictly ordered phases (see [`ActionResolver::resolve`]):
//! upkeep → skill staging → movement arbitration → interception → pickup →
//! finalize.  The same intent map against the same world always resolves
//! identically — every iteration is over sorted keys and every tie-break is
//! written down.
//!
//! Nothing in here raises for bad input: an unreachable target walks zero
//! cells, an invalid skill stages nothing, and every submitted intent gets
//! exactly one action back.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use gp_behavior::{Intent, IntentKind, Skill};
use gp_core::{ActorId, Cell, ElementId, Faction, FactionPrecedence, PickupKind};
use gp_grid::Pathfinder;

use crate::action::{Action, Resolution, StatusUpdate};
use crate::element::ElementKind;
use crate::state::WorldState;

/// Scalar knobs for resolution side effects.
#[derive(Clone, Debug)]
pub struct ResolverTuning {
    /// Stamina per cell actually moved (halved under haste).
    pub move_stamina_cost: u32,
    /// Stamina regained by a turn spent standing still.
    pub rest_stamina_regen: u32,
    /// Stun duration from stepping on a trap.
    pub trap_stun_turns: u32,
    /// Stamina restored by a medkit.
    pub medkit_stamina: u32,
}

impl Default for ResolverTuning {
    fn default() -> Self {
        Self {
            move_stamina_cost:  2,
            rest_stamina_regen: 3,
            trap_stun_turns:    2,
            medkit_stamina:     30,
        }
    }
}

/// Per-actor movement bookkeeping inside `resolve`.
#[derive(Copy, Clone)]
struct Resolved {
    start: Cell,
    end:   Cell,
    /// Cells actually advanced along the truncated path.
    steps: u32,
}

/// Converts the turn's intent map into the turn's action map.
pub struct ActionResolver {
    precedence: FactionPrecedence,
    tuning:     ResolverTuning,
}

impl ActionResolver {
    pub fn new(precedence: FactionPrecedence) -> Self {
        Self { precedence, tuning: ResolverTuning::default() }
    }

    pub fn with_tuning(precedence: FactionPrecedence, tuning: ResolverTuning) -> Self {
        Self { precedence, tuning }
    }

    pub fn resolve(&self, intents: &BTreeMap<ActorId, Intent>, world: &WorldState) -> Resolution {
        let mut updates: BTreeMap<ActorId, Vec<StatusUpdate>> = BTreeMap::new();

        // ── Phase 1: ongoing-effect upkeep ────────────────────────────────
        //
        // Haste runs down through the action stream; the tick that reaches
        // zero restores the default movement-cost rate at commit.
        for &id in intents.keys() {
            if world.actors.status[id.index()].hastened() {
                updates.entry(id).or_default().push(StatusUpdate::HasteTick);
            }
        }

        // ── Phase 2: skill preparation ────────────────────────────────────
        let staged_costs = self.stage_skills(intents, world, &mut updates);

        // ── Phase 3: movement / collision arbitration ─────────────────────
        let mut resolved = self.arbitrate_movement(intents, world);

        // ── Phase 4: combat / interception ────────────────────────────────
        let (dead, deaths) = self.intercept(intents, world, &mut resolved, &mut updates);

        // ── Phase 5: item pickup ──────────────────────────────────────────
        let pickups = self.claim_pickups(intents, world, &resolved, &dead, &mut updates);

        // ── Phase 6: finalize ─────────────────────────────────────────────
        for (caster, cost) in staged_costs {
            if !dead.contains(&caster) {
                updates.entry(caster).or_default().push(StatusUpdate::SpendCharge(cost));
            }
        }

        let mut actions = BTreeMap::new();
        for &id in intents.keys() {
            let mut ups = updates.remove(&id).unwrap_or_default();
            if dead.contains(&id) {
                actions.insert(id, Action { target: None, updates: ups, pickup: None });
                continue;
            }

            // An intent from an actor with no board position resolves to an
            // empty action — one action per intent, no silent drops.
            let Some(&r) = resolved.get(&id) else {
                actions.insert(id, Action { target: None, updates: ups, pickup: None });
                continue;
            };
            if r.steps > 0 {
                let mut cost = self.tuning.move_stamina_cost * r.steps;
                if world.actors.status[id.index()].hastened() {
                    cost /= 2;
                }
                ups.push(StatusUpdate::SpendStamina(cost));
            } else {
                ups.push(StatusUpdate::RestoreStamina(self.tuning.rest_stamina_regen));
            }

            actions.insert(id, Action {
                target:  Some(r.end),
                updates: ups,
                pickup:  pickups.get(&id).copied(),
            });
        }

        Resolution { actions, deaths }
    }

    // ── Phase 2 impl ──────────────────────────────────────────────────────

    /// Validate each skill intent (charge, range, line of sight) and stage
    /// its effects.  Costs are staged separately and deducted only from
    /// casters that survive the turn.  An invalid cast stages nothing.
    fn stage_skills(
        &self,
        intents: &BTreeMap<ActorId, Intent>,
        world:   &WorldState,
        updates: &mut BTreeMap<ActorId, Vec<StatusUpdate>>,
    ) -> Vec<(ActorId, u32)> {
        let pf = Pathfinder::new(&world.grid);
        let mut staged = Vec::new();

        for (&caster, intent) in intents {
            let IntentKind::Skill(cast) = intent.kind else { continue };
            let i = caster.index();
            let Some(pos) = world.actors.pos[i] else { continue };

            let skill = cast.skill;
            if world.actors.charge[i] < skill.cost()
                || pos.manhattan(cast.target) > skill.cast_range()
                || !pf.has_line_of_sight(pos, cast.target)
            {
                continue; // degraded to a no-op, never an error
            }

            staged.push((caster, skill.cost()));

            match skill {
                Skill::Shockwave => {
                    for id in world.actors.actor_ids() {
                        if world.actors.faction(id) != Faction::Pursuer
                            || !world.actors.is_active(id)
                        {
                            continue;
                        }
                        let hit = world.actors.pos[id.index()]
                            .is_some_and(|p| p.manhattan(cast.target) <= skill.effect_radius());
                        if hit {
                            updates
                                .entry(id)
                                .or_default()
                                .push(StatusUpdate::Confuse(skill.effect_turns()));
                        }
                    }
                }
                Skill::Rally => {
                    for id in world.actors.actor_ids() {
                        if world.actors.faction(id) != Faction::Evader
                            || !world.actors.is_active(id)
                        {
                            continue;
                        }
                        let near = world.actors.pos[id.index()]
                            .is_some_and(|p| p.manhattan(pos) <= skill.effect_radius());
                        if near {
                            updates
                                .entry(id)
                                .or_default()
                                .push(StatusUpdate::Haste(skill.effect_turns()));
                        }
                    }
                }
                Skill::Channel => {
                    updates
                        .entry(caster)
                        .or_default()
                        .push(StatusUpdate::Channel(skill.effect_turns()));
                }
            }
        }

        staged
    }

    // ── Phase 3 impl ──────────────────────────────────────────────────────

    /// Sort by (priority desc, faction precedence, id asc), then give each
    /// actor the furthest cell of its speed-truncated path that is not yet
    /// claimed — walking backward to its own cell in the worst case.
    ///
    /// A cell occupied by a not-yet-resolved *ally* is off limits (allies
    /// never stack); a cell occupied by an opponent is enterable and the
    /// interception phase sorts out what that means.
    fn arbitrate_movement(
        &self,
        intents: &BTreeMap<ActorId, Intent>,
        world:   &WorldState,
    ) -> BTreeMap<ActorId, Resolved> {
        let pf = Pathfinder::new(&world.grid);

        let mut order: Vec<ActorId> = intents.keys().copied().collect();
        order.sort_by_key(|&id| {
            let intent = &intents[&id];
            let faction_rank = match (self.precedence, world.actors.faction(id)) {
                (FactionPrecedence::PursuerFirst, Faction::Pursuer) => 0,
                (FactionPrecedence::PursuerFirst, Faction::Evader)  => 1,
                (FactionPrecedence::EvaderFirst, Faction::Evader)   => 0,
                (FactionPrecedence::EvaderFirst, Faction::Pursuer)  => 1,
            };
            (-intent.priority, faction_rank, id)
        });

        // Start cells of actors that have not resolved yet, for the
        // ally-blocking rule.
        let mut unresolved: FxHashMap<Cell, Faction> = order
            .iter()
            .filter_map(|&id| {
                world.actors.pos[id.index()].map(|p| (p, world.actors.faction(id)))
            })
            .collect();

        let mut claimed: FxHashSet<Cell> = FxHashSet::default();
        let mut resolved = BTreeMap::new();

        for id in order {
            let Some(start) = world.actors.pos[id.index()] else { continue };
            unresolved.remove(&start);
            let faction = world.actors.faction(id);
            let intent = &intents[&id];

            let (end, steps) = match intent.kind {
                IntentKind::Wait | IntentKind::Skill(_) => (start, 0),
                IntentKind::Move => {
                    let path = pf.find_path(start, intent.target);
                    let speed = world.actors.effective_speed(id) as usize;
                    let mut idx = (path.len() - 1).min(speed);
                    while idx > 0 {
                        let cell = path[idx];
                        let ally_blocked = unresolved.get(&cell) == Some(&faction);
                        if !claimed.contains(&cell) && !ally_blocked {
                            break;
                        }
                        idx -= 1;
                    }
                    (path[idx], idx as u32)
                }
            };

            claimed.insert(end);
            resolved.insert(id, Resolved { start, end, steps });
        }

        resolved
    }

    // ── Phase 4 impl ──────────────────────────────────────────────────────

    /// Evader-vs-pursuer path comparison: a shared final cell or a start/end
    /// swap is an interception.  A guard charm absorbs one hit and bounces
    /// both parties back to their start-of-turn cells; otherwise the evader
    /// dies on the spot.
    fn intercept(
        &self,
        intents:  &BTreeMap<ActorId, Intent>,
        world:    &WorldState,
        resolved: &mut BTreeMap<ActorId, Resolved>,
        updates:  &mut BTreeMap<ActorId, Vec<StatusUpdate>>,
    ) -> (FxHashSet<ActorId>, Vec<(ActorId, Cell)>) {
        let mut dead: FxHashSet<ActorId> = FxHashSet::default();
        let mut deaths = Vec::new();
        let mut charm_spent: FxHashSet<ActorId> = FxHashSet::default();

        let evaders: Vec<ActorId> = intents
            .keys()
            .copied()
            .filter(|&id| world.actors.faction(id) == Faction::Evader)
            .collect();
        let pursuers: Vec<ActorId> = intents
            .keys()
            .copied()
            .filter(|&id| world.actors.faction(id) == Faction::Pursuer)
            .collect();

        for &evader in &evaders {
            for &pursuer in &pursuers {
                if dead.contains(&evader) {
                    break;
                }
                let (Some(&e), Some(&p)) = (resolved.get(&evader), resolved.get(&pursuer)) else {
                    continue;
                };

                let same_cell = e.end == p.end;
                let swapped = e.end == p.start && p.end == e.start;
                if !same_cell && !swapped {
                    continue;
                }

                let has_charm = world.actors.charms[evader.index()] > 0
                    && !charm_spent.contains(&evader);

                if has_charm {
                    charm_spent.insert(evader);
                    updates.entry(evader).or_default().push(StatusUpdate::ConsumeCharm);

                    // Bounce: evader back to its start; the pursuer too,
                    // unless something else already resolved onto its start.
                    resolved.insert(evader, Resolved { start: e.start, end: e.start, steps: 0 });
                    let pursuer_start_taken = resolved
                        .iter()
                        .any(|(&id, r)| id != pursuer && r.end == p.start);
                    if !pursuer_start_taken {
                        resolved.insert(pursuer, Resolved { start: p.start, end: p.start, steps: 0 });
                    }
                } else {
                    dead.insert(evader);
                    deaths.push((evader, e.end));
                    updates.entry(evader).or_default().push(StatusUpdate::Dead);
                }
            }
        }

        (dead, deaths)
    }

    // ── Phase 5 impl ──────────────────────────────────────────────────────

    /// First come (ascending id), first served: each consumable element is
    /// claimed by at most one surviving actor standing on it.  Keys and
    /// pickups are evader-only; traps spring for anyone.
    fn claim_pickups(
        &self,
        intents:  &BTreeMap<ActorId, Intent>,
        world:    &WorldState,
        resolved: &BTreeMap<ActorId, Resolved>,
        dead:     &FxHashSet<ActorId>,
        updates:  &mut BTreeMap<ActorId, Vec<StatusUpdate>>,
    ) -> BTreeMap<ActorId, ElementId> {
        let mut claimed_elements: FxHashSet<ElementId> = FxHashSet::default();
        let mut pickups = BTreeMap::new();

        for &id in intents.keys() {
            if dead.contains(&id) {
                continue;
            }
            let Some(r) = resolved.get(&id) else { continue };
            let Some(element) = world.elements.at_cell(r.end) else { continue };
            if !element.kind.consumable() || claimed_elements.contains(&element.id) {
                continue;
            }

            let faction = world.actors.faction(id);
            let update = match element.kind {
                ElementKind::Key { .. } if faction == Faction::Evader => None,
                ElementKind::Trap => Some(StatusUpdate::Stun(self.tuning.trap_stun_turns)),
                ElementKind::Pickup(PickupKind::Medkit) if faction == Faction::Evader => {
                    Some(StatusUpdate::RestoreStamina(self.tuning.medkit_stamina))
                }
                ElementKind::Pickup(PickupKind::Charm) if faction == Faction::Evader => {
                    Some(StatusUpdate::GrantCharm)
                }
                // Pursuers neither loot nor turn keys.
                _ => continue,
            };

            claimed_elements.insert(element.id);
            pickups.insert(id, element.id);
            if let Some(update) = update {
                updates.entry(id).or_default().push(update);
            }
        }

        pickups
    }
}
