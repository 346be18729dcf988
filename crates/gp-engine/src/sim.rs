//! The `Simulation` struct and its turn loop.

use std::collections::BTreeMap;

use gp_actor::{ActorMemories, ActorRngs};
use gp_behavior::{Brain, CoordinationBoard, Strategy};
use gp_core::{ActorId, Faction};

use crate::mediator::VisibilityMediator;
use crate::resolver::ActionResolver;
use crate::result::StepResult;
use crate::state::WorldState;
use crate::{EngineResult, SimObserver};

/// The main simulation runner.
///
/// Drives the per-turn data flow:
///
/// 1. **Views**: the mediator builds one `LocalView` per active actor from
///    the frozen previous-turn state.
/// 2. **Board**: the pursuer coordination board is rebuilt from pursuer
///    memories — nothing on it survives from the last turn.
/// 3. **Decide**: each active actor's brain runs in ascending `ActorId`
///    order, writing only its own memory/RNG (and, for pursuers, the board).
/// 4. **Resolve**: the resolver turns the intent map into the action map.
/// 5. **Apply**: the world commits the actions and evaluates termination.
/// 6. **Hooks**: the mediator runs the post-turn knowledge flows.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation {
    pub world:    WorldState,
    pub memories: ActorMemories,
    pub rngs:     ActorRngs,
    /// One brain per actor, indexed by `ActorId`.
    pub brains:   Vec<Brain>,
    pub mediator: VisibilityMediator,
    pub resolver: ActionResolver,
}

impl Simulation {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run one full turn and export its step result.
    ///
    /// On an already-terminal world this is a no-op that re-exports the
    /// terminal state with empty intent/action maps.
    pub fn step(&mut self) -> EngineResult<StepResult> {
        if self.world.is_terminal() {
            return Ok(self.world.export_step_result(BTreeMap::new(), BTreeMap::new()));
        }

        // ── Coordination board, seeded from pursuer memories ──────────────
        let mut board = CoordinationBoard::new(self.world.exit_pos);
        {
            let actors = &self.world.actors;
            let expiry = self.world.config.track_expiry_turns;
            for pursuer in actors.actor_ids() {
                if actors.faction(pursuer) != Faction::Pursuer || !actors.is_active(pursuer) {
                    continue;
                }
                let memory = self.memories.get(pursuer);
                for evader in actors.actor_ids() {
                    if actors.faction(evader) != Faction::Evader || !actors.is_active(evader) {
                        continue;
                    }
                    if let Some(track) = memory.track_estimate(evader) {
                        if self.world.turn.since(track.turn) <= expiry {
                            board.insert_track(evader, track);
                        }
                    }
                }
            }
        }

        // ── Decide phase ──────────────────────────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access:
        // views borrow the world immutably while memories and RNGs hand out
        // per-actor mutable slots.
        let mut intents = BTreeMap::new();
        {
            let views = self.mediator.build_views(&self.world);
            let brains = &self.brains;
            let memories = &mut self.memories;
            let rngs = &mut self.rngs;

            for (&id, view) in &views {
                let intent = brains[id.index()].decide(
                    id,
                    view,
                    memories.get_mut(id),
                    &mut board,
                    rngs.get_mut(id),
                );
                intents.insert(id, intent);
            }
        }

        // ── Resolve, commit, post-turn hooks ──────────────────────────────
        let resolution = self.resolver.resolve(&intents, &self.world);
        self.world.apply(&resolution)?;
        self.mediator.after_turn(&mut self.world, &mut self.memories, &resolution);

        Ok(self.world.export_step_result(intents, resolution.actions))
    }

    /// Run until the world is terminal, invoking observer hooks each turn.
    ///
    /// Termination is guaranteed at or before `config.max_turns`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> EngineResult<StepResult> {
        loop {
            observer.on_turn_start(self.world.turn);
            let result = self.step()?;
            observer.on_step(&result);
            if result.terminal {
                observer.on_sim_end(&result);
                return Ok(result);
            }
        }
    }

    /// Run at most `n` turns (stopping early on termination).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_turns<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> EngineResult<Option<StepResult>> {
        let mut last = None;
        for _ in 0..n {
            observer.on_turn_start(self.world.turn);
            let result = self.step()?;
            observer.on_step(&result);
            let terminal = result.terminal;
            last = Some(result);
            if terminal {
                break;
            }
        }
        Ok(last)
    }

    /// Convenience accessor for tests and tooling.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.world.actors.actor_ids()
    }
}
