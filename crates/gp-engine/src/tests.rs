//! Integration tests for gp-engine.

use std::collections::BTreeMap;

use gp_actor::ActorConfig;
use gp_behavior::{priority, Intent, Skill, SkillCast};
use gp_core::{ActorId, Cell, FactionPrecedence, Role, SimConfig, StatusPolicy};
use gp_grid::{Grid, GridBuilder};

use crate::action::{Action, Resolution, StatusUpdate};
use crate::element::ElementKind;
use crate::resolver::ActionResolver;
use crate::state::TerminationReason;
use crate::{NoopObserver, SimObserver, Simulation, SimulationBuilder, StepResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

fn test_config(max_turns: u32) -> SimConfig {
    SimConfig { seed: 42, max_turns, ..SimConfig::default() }
}

fn open_grid(n: i32) -> Grid {
    GridBuilder::new(n, n).build().unwrap()
}

/// A minimal valid world: the given roster plus an exit far out of the way.
fn sim_with(roster: Vec<ActorConfig>, max_turns: u32) -> Simulation {
    SimulationBuilder::new(test_config(max_turns), open_grid(9))
        .roster(roster)
        .element(c(8, 8), ElementKind::Exit)
        .build()
        .unwrap()
}

fn move_intent(target: Cell, priority: i32) -> Intent {
    Intent::movement(target, priority)
}

/// Observer that keeps every step result.
#[derive(Default)]
struct History {
    steps: Vec<StepResult>,
}

impl SimObserver for History {
    fn on_step(&mut self, result: &StepResult) {
        self.steps.push(result.clone());
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_valid_inputs() {
        let sim = sim_with(
            vec![
                ActorConfig::new(Role::Scout, c(0, 0)),
                ActorConfig::new(Role::Chaser, c(5, 5)),
            ],
            50,
        );
        assert_eq!(sim.world.actors.count, 2);
        assert_eq!(sim.brains.len(), 2);
        assert_eq!(sim.world.exit_pos, c(8, 8));
        assert!(!sim.world.is_terminal());
    }

    #[test]
    fn empty_roster_is_fatal() {
        let result = SimulationBuilder::new(test_config(10), open_grid(5))
            .element(c(4, 4), ElementKind::Exit)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn spawn_on_wall_is_fatal() {
        let grid = GridBuilder::new(5, 5).wall(c(2, 2)).build().unwrap();
        let result = SimulationBuilder::new(test_config(10), grid)
            .actor(ActorConfig::new(Role::Scout, c(2, 2)))
            .element(c(4, 4), ElementKind::Exit)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_spawn_is_fatal() {
        let result = SimulationBuilder::new(test_config(10), open_grid(5))
            .actor(ActorConfig::new(Role::Scout, c(1, 1)))
            .actor(ActorConfig::new(Role::Chaser, c(1, 1)))
            .element(c(4, 4), ElementKind::Exit)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn exit_must_exist_exactly_once() {
        let no_exit = SimulationBuilder::new(test_config(10), open_grid(5))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .build();
        assert!(no_exit.is_err());

        let two_exits = SimulationBuilder::new(test_config(10), open_grid(5))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(3, 3), ElementKind::Exit)
            .element(c(4, 4), ElementKind::Exit)
            .build();
        assert!(two_exits.is_err());
    }

    #[test]
    fn zero_max_turns_is_fatal() {
        let result = SimulationBuilder::new(test_config(0), open_grid(5))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(4, 4), ElementKind::Exit)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn element_on_wall_is_fatal() {
        let grid = GridBuilder::new(5, 5).wall(c(3, 3)).build().unwrap();
        let result = SimulationBuilder::new(test_config(10), grid)
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(3, 3), ElementKind::Exit)
            .build();
        assert!(result.is_err());
    }
}

// ── Resolver unit scenarios ───────────────────────────────────────────────────

#[cfg(test)]
mod resolver_tests {
    use super::*;

    /// Evader 0 at (1,0), pursuer 1 at (2,0) on a 9×9 open grid.
    fn duel(evader_charms: u32) -> Simulation {
        sim_with(
            vec![
                ActorConfig::new(Role::Scout, c(1, 0)).with_charms(evader_charms),
                ActorConfig::new(Role::Chaser, c(2, 0)),
            ],
            50,
        )
    }

    #[test]
    fn swapped_cells_are_an_interception() {
        let sim = duel(0);
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(2, 0), priority::FLEE)),
            (ActorId(1), move_intent(c(1, 0), priority::PURSUE)),
        ]
        .into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);

        let evader_action = &resolution.actions[&ActorId(0)];
        assert_eq!(evader_action.target, None, "no silent pass-through");
        assert!(evader_action.updates.contains(&StatusUpdate::Dead));
        assert_eq!(resolution.deaths, vec![(ActorId(0), c(2, 0))]);

        let pursuer_action = &resolution.actions[&ActorId(1)];
        assert_eq!(pursuer_action.target, Some(c(1, 0)));
    }

    #[test]
    fn charm_absorbs_the_interception_and_bounces_both() {
        let sim = duel(1);
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(2, 0), priority::FLEE)),
            (ActorId(1), move_intent(c(1, 0), priority::PURSUE)),
        ]
        .into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);

        let evader_action = &resolution.actions[&ActorId(0)];
        assert_eq!(evader_action.target, Some(c(1, 0)), "bounced to start");
        assert!(evader_action.updates.contains(&StatusUpdate::ConsumeCharm));
        assert!(!evader_action.updates.contains(&StatusUpdate::Dead));

        let pursuer_action = &resolution.actions[&ActorId(1)];
        assert_eq!(pursuer_action.target, Some(c(2, 0)), "pursuer bounced too");
        assert!(resolution.deaths.is_empty());
    }

    #[test]
    fn stationary_evader_is_caught_in_place() {
        let sim = duel(0);
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), Intent::wait(c(1, 0))),
            (ActorId(1), move_intent(c(1, 0), priority::PURSUE)),
        ]
        .into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert!(resolution.actions[&ActorId(0)].updates.contains(&StatusUpdate::Dead));
        assert_eq!(resolution.actions[&ActorId(1)].target, Some(c(1, 0)));
    }

    #[test]
    fn faction_precedence_decides_equal_priority_contests() {
        // Both want (2,2) at the same priority from (1,2) and (3,2).
        let roster = vec![
            ActorConfig::new(Role::Scout, c(1, 2)),
            ActorConfig::new(Role::Chaser, c(3, 2)),
        ];
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(2, 2), priority::GOAL)),
            (ActorId(1), move_intent(c(2, 2), priority::GOAL)),
        ]
        .into();

        let sim = sim_with(roster.clone(), 50);
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert_eq!(resolution.actions[&ActorId(1)].target, Some(c(2, 2)), "pursuer first by default");
        assert_eq!(resolution.actions[&ActorId(0)].target, Some(c(1, 2)), "evader backed off");

        let mut config = test_config(50);
        config.precedence = FactionPrecedence::EvaderFirst;
        let sim = SimulationBuilder::new(config, open_grid(9))
            .roster(roster)
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();
        let resolver = ActionResolver::new(FactionPrecedence::EvaderFirst);
        let resolution = resolver.resolve(&intents, &sim.world);
        assert_eq!(resolution.actions[&ActorId(0)].target, Some(c(2, 2)), "evader first when configured");
        assert_eq!(resolution.actions[&ActorId(1)].target, Some(c(3, 2)));
    }

    #[test]
    fn allies_never_stack() {
        // Two evaders race for (2,0); the loser must keep a distinct cell.
        let sim = sim_with(
            vec![
                ActorConfig::new(Role::Scout, c(1, 0)),
                ActorConfig::new(Role::Scout, c(3, 0)),
            ],
            50,
        );
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(2, 0), priority::FLEE)),
            (ActorId(1), move_intent(c(2, 0), priority::GOAL)),
        ]
        .into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        let a = resolution.actions[&ActorId(0)].target.unwrap();
        let b = resolution.actions[&ActorId(1)].target.unwrap();
        assert_eq!(a, c(2, 0), "higher priority wins the cell");
        assert_ne!(a, b);
    }

    #[test]
    fn unreachable_target_degrades_to_stay() {
        let sim = sim_with(vec![ActorConfig::new(Role::Scout, c(1, 1))], 50);
        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), move_intent(c(100, 100), priority::GOAL))].into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        let action = &resolution.actions[&ActorId(0)];
        assert_eq!(action.target, Some(c(1, 1)));
        assert!(action.updates.contains(&StatusUpdate::RestoreStamina(3)), "resting regen applies");
    }

    #[test]
    fn one_action_per_intent_always() {
        let sim = sim_with(
            vec![
                ActorConfig::new(Role::Scout, c(0, 0)),
                ActorConfig::new(Role::Support, c(1, 1)),
                ActorConfig::new(Role::Chaser, c(5, 5)),
                ActorConfig::new(Role::Blocker, c(6, 6)),
            ],
            50,
        );
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(3, 0), priority::GOAL)),
            (ActorId(1), Intent::wait(c(1, 1))),
            (ActorId(2), move_intent(c(0, 0), priority::PURSUE)),
            (ActorId(3), move_intent(c(1, 1), priority::PURSUE)),
        ]
        .into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert_eq!(resolution.actions.len(), intents.len());
        for id in intents.keys() {
            assert!(resolution.actions.contains_key(id));
        }
    }

    #[test]
    fn movement_spends_stamina_and_haste_halves_it() {
        let mut sim = sim_with(vec![ActorConfig::new(Role::Scout, c(0, 0))], 50);
        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), move_intent(c(5, 0), priority::GOAL))].into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert!(resolution.actions[&ActorId(0)]
            .updates
            .contains(&StatusUpdate::SpendStamina(2)), "one step at base cost");

        sim.world.actors.status[0].haste = 2;
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        let action = &resolution.actions[&ActorId(0)];
        // Two cells under haste, at half cost per cell.
        assert_eq!(action.target, Some(c(2, 0)));
        assert!(action.updates.contains(&StatusUpdate::HasteTick));
        assert!(action.updates.contains(&StatusUpdate::SpendStamina(2)));
    }

    // ── Skills ────────────────────────────────────────────────────────────

    #[test]
    fn shockwave_confuses_pursuers_in_blast() {
        let mut sim = sim_with(
            vec![
                ActorConfig::new(Role::Support, c(1, 1)),
                ActorConfig::new(Role::Chaser, c(3, 1)),
                ActorConfig::new(Role::Chaser, c(8, 8)),
            ],
            50,
        );
        sim.world.actors.charge[0] = 40;

        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), Intent::skill(c(1, 1), SkillCast { skill: Skill::Shockwave, target: c(3, 1) })),
            (ActorId(1), Intent::wait(c(3, 1))),
            (ActorId(2), Intent::wait(c(8, 8))),
        ]
        .into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert!(resolution.actions[&ActorId(1)].updates.contains(&StatusUpdate::Confuse(3)));
        assert!(!resolution.actions[&ActorId(2)].updates.iter().any(|u| matches!(u, StatusUpdate::Confuse(_))),
            "out-of-blast pursuer untouched");
        assert!(resolution.actions[&ActorId(0)].updates.contains(&StatusUpdate::SpendCharge(30)));
    }

    #[test]
    fn underfunded_or_blocked_casts_are_noops() {
        let mut sim = sim_with(
            vec![
                ActorConfig::new(Role::Support, c(1, 1)),
                ActorConfig::new(Role::Chaser, c(3, 1)),
            ],
            50,
        );

        // No charge at all.
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), Intent::skill(c(1, 1), SkillCast { skill: Skill::Shockwave, target: c(3, 1) })),
            (ActorId(1), Intent::wait(c(3, 1))),
        ]
        .into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert!(!resolution.actions[&ActorId(1)].updates.iter().any(|u| matches!(u, StatusUpdate::Confuse(_))));
        assert!(!resolution.actions[&ActorId(0)].updates.iter().any(|u| matches!(u, StatusUpdate::SpendCharge(_))));

        // Charged but out of range.
        sim.world.actors.charge[0] = 40;
        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), Intent::skill(c(1, 1), SkillCast { skill: Skill::Shockwave, target: c(8, 1) })),
            (ActorId(1), Intent::wait(c(3, 1))),
        ]
        .into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert!(!resolution.actions[&ActorId(0)].updates.iter().any(|u| matches!(u, StatusUpdate::SpendCharge(_))));
    }

    #[test]
    fn dead_casters_pay_nothing_but_the_blast_lands() {
        // The caster waits in place (low-priority cast) while a pursuer
        // walks onto its cell: interception kills the caster, the staged
        // confusion still applies, the charge cost does not.
        let mut sim = sim_with(
            vec![
                ActorConfig::new(Role::Support, c(1, 1)),
                ActorConfig::new(Role::Chaser, c(2, 1)),
            ],
            50,
        );
        sim.world.actors.charge[0] = 40;

        let mut cast = Intent::skill(c(1, 1), SkillCast { skill: Skill::Shockwave, target: c(2, 1) });
        cast.priority = priority::WAIT; // resolve after the pursuer's move
        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), cast), (ActorId(1), move_intent(c(1, 1), priority::PURSUE))].into();

        let resolution = sim.resolver.resolve(&intents, &sim.world);
        let caster = &resolution.actions[&ActorId(0)];
        assert!(caster.updates.contains(&StatusUpdate::Dead));
        assert!(!caster.updates.iter().any(|u| matches!(u, StatusUpdate::SpendCharge(_))));
        assert!(resolution.actions[&ActorId(1)].updates.contains(&StatusUpdate::Confuse(3)));
    }

    // ── Pickups ───────────────────────────────────────────────────────────

    #[test]
    fn trap_stuns_whoever_steps_on_it() {
        let sim = SimulationBuilder::new(test_config(50), open_grid(9))
            .actor(ActorConfig::new(Role::Chaser, c(1, 0)))
            .actor(ActorConfig::new(Role::Scout, c(5, 5)))
            .element(c(2, 0), ElementKind::Trap)
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();

        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(2, 0), priority::PURSUE)),
            (ActorId(1), Intent::wait(c(5, 5))),
        ]
        .into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        let action = &resolution.actions[&ActorId(0)];
        assert!(action.updates.contains(&StatusUpdate::Stun(2)));
        assert!(action.pickup.is_some(), "trap is spent");
    }

    #[test]
    fn pursuers_cannot_loot_keys_or_pickups() {
        let sim = SimulationBuilder::new(test_config(50), open_grid(9))
            .actor(ActorConfig::new(Role::Chaser, c(1, 0)))
            .actor(ActorConfig::new(Role::Scout, c(5, 5)))
            .element(c(2, 0), ElementKind::Key { real: true })
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();

        let intents: BTreeMap<ActorId, Intent> = [
            (ActorId(0), move_intent(c(2, 0), priority::PURSUE)),
            (ActorId(1), Intent::wait(c(5, 5))),
        ]
        .into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        assert_eq!(resolution.actions[&ActorId(0)].pickup, None);
    }

    #[test]
    fn passing_over_an_element_does_not_claim_it() {
        let mut sim = SimulationBuilder::new(test_config(50), open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(1, 0)))
            .element(c(2, 0), ElementKind::Key { real: true })
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();
        // Hasted: two cells this turn, straight through the key's cell.
        sim.world.actors.status[0].haste = 2;

        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), move_intent(c(3, 0), priority::GOAL))].into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        let action = &resolution.actions[&ActorId(0)];
        assert_eq!(action.target, Some(c(3, 0)));
        assert_eq!(action.pickup, None, "only the final cell claims");
    }
}

// ── World-state commit and termination ────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn real_key_opens_exit_and_decoy_does_not() {
        let mut sim = SimulationBuilder::new(test_config(50), open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(1, 0)))
            .element(c(2, 0), ElementKind::Key { real: false })
            .element(c(4, 0), ElementKind::Key { real: true })
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();

        // Step onto the decoy.
        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), move_intent(c(2, 0), priority::GOAL))].into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        sim.world.apply(&resolution).unwrap();
        assert!(!sim.world.exit_open, "decoy consumed, gate stays shut");
        assert_eq!(sim.world.elements.len(), 2, "decoy removed from the world");

        // Walk to the real key (two more turns at speed 1).
        for target in [c(3, 0), c(4, 0)] {
            let intents: BTreeMap<ActorId, Intent> =
                [(ActorId(0), move_intent(target, priority::GOAL))].into();
            let resolution = sim.resolver.resolve(&intents, &sim.world);
            sim.world.apply(&resolution).unwrap();
        }
        assert!(sim.world.exit_open);
        assert_eq!(sim.world.elements.len(), 1, "only the exit remains");
    }

    #[test]
    fn closed_gate_never_marks_escapes() {
        let mut sim = SimulationBuilder::new(test_config(50), open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(7, 8)))
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();

        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), move_intent(c(8, 8), priority::GOAL))].into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        sim.world.apply(&resolution).unwrap();

        assert_eq!(sim.world.actors.pos[0], Some(c(8, 8)), "standing on the gate");
        assert!(!sim.world.actors.escaped[0]);
    }

    #[test]
    fn open_gate_marks_escape_and_perfect_reason() {
        let mut sim = SimulationBuilder::new(test_config(50), open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(7, 8)))
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();
        sim.world.exit_open = true;

        let intents: BTreeMap<ActorId, Intent> =
            [(ActorId(0), move_intent(c(8, 8), priority::GOAL))].into();
        let resolution = sim.resolver.resolve(&intents, &sim.world);
        sim.world.apply(&resolution).unwrap();

        assert!(sim.world.actors.escaped[0]);
        assert_eq!(sim.world.actors.pos[0], None);
        assert_eq!(sim.world.reason(), Some(TerminationReason::PerfectEscape));
    }

    #[test]
    fn mixed_outcome_is_partial_escape() {
        let mut sim = sim_with(
            vec![
                ActorConfig::new(Role::Scout, c(0, 0)),
                ActorConfig::new(Role::Scout, c(4, 4)),
            ],
            50,
        );
        sim.world.actors.escaped[0] = true;
        sim.world.actors.pos[0] = None;

        let dead = Resolution {
            actions: [(ActorId(1), Action {
                target:  None,
                updates: vec![StatusUpdate::Dead],
                pickup:  None,
            })]
            .into(),
            deaths: vec![(ActorId(1), c(4, 4))],
        };
        sim.world.apply(&dead).unwrap();

        assert_eq!(
            sim.world.reason(),
            Some(TerminationReason::PartialEscape { escaped: 1, dead: 1 })
        );
    }

    #[test]
    fn annihilation_when_no_one_escapes() {
        let mut sim = sim_with(vec![ActorConfig::new(Role::Scout, c(0, 0))], 50);
        let dead = Resolution {
            actions: [(ActorId(0), Action {
                target:  None,
                updates: vec![StatusUpdate::Dead],
                pickup:  None,
            })]
            .into(),
            deaths: vec![(ActorId(0), c(0, 0))],
        };
        sim.world.apply(&dead).unwrap();
        assert_eq!(sim.world.reason(), Some(TerminationReason::TotalAnnihilation));
    }

    #[test]
    fn terminal_is_absorbing() {
        let mut sim = sim_with(vec![ActorConfig::new(Role::Scout, c(0, 0))], 50);
        let dead = Resolution {
            actions: [(ActorId(0), Action {
                target:  None,
                updates: vec![StatusUpdate::Dead],
                pickup:  None,
            })]
            .into(),
            deaths: vec![(ActorId(0), c(0, 0))],
        };
        sim.world.apply(&dead).unwrap();
        let reason = sim.world.reason();
        let turn = sim.world.turn;

        // Further applies change nothing.
        sim.world.apply(&Resolution::default()).unwrap();
        assert_eq!(sim.world.reason(), reason);
        assert_eq!(sim.world.turn, turn);
    }

    #[test]
    fn channel_expiry_applies_backlash_stun() {
        let mut sim = sim_with(vec![ActorConfig::new(Role::Support, c(0, 0))], 50);
        sim.world.actors.status[0].channel = 1;

        let idle = Resolution {
            actions: [(ActorId(0), Action::stay(c(0, 0)))].into(),
            deaths: vec![],
        };
        sim.world.apply(&idle).unwrap();
        assert_eq!(sim.world.actors.status[0].channel, 0);
        assert_eq!(sim.world.actors.status[0].stun, crate::state::CHANNEL_BACKLASH_TURNS);
    }

    #[test]
    fn inapplicable_update_policy() {
        // Confusion aimed at an evader is inapplicable.
        let bad = Resolution {
            actions: [(ActorId(0), Action {
                target:  Some(c(0, 0)),
                updates: vec![StatusUpdate::Confuse(2)],
                pickup:  None,
            })]
            .into(),
            deaths: vec![],
        };

        let mut lenient = sim_with(vec![ActorConfig::new(Role::Scout, c(0, 0))], 50);
        assert!(lenient.world.apply(&bad).is_ok(), "ignored by default");
        assert_eq!(lenient.world.actors.status[0].confusion, 0);

        let mut config = test_config(50);
        config.status_policy = StatusPolicy::Reject;
        let mut strict = SimulationBuilder::new(config, open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();
        assert!(strict.world.apply(&bad).is_err());
    }

    #[test]
    fn support_charge_regenerates() {
        let mut sim = sim_with(vec![ActorConfig::new(Role::Support, c(0, 0))], 50);
        assert_eq!(sim.world.actors.charge[0], 0);
        let idle = Resolution {
            actions: [(ActorId(0), Action::stay(c(0, 0)))].into(),
            deaths: vec![],
        };
        sim.world.apply(&idle).unwrap();
        assert_eq!(sim.world.actors.charge[0], crate::state::CHARGE_REGEN_PER_TURN);
    }
}

// ── Full-loop scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use super::*;

    #[test]
    fn five_by_five_duel_terminates_within_the_limit() {
        // Open 5×5, evader (0,0), pursuer (4,4), closed exit at (0,4),
        // no keys anywhere.
        let mut sim = SimulationBuilder::new(test_config(12), GridBuilder::new(5, 5).build().unwrap())
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .actor(ActorConfig::new(Role::Chaser, c(4, 4)))
            .element(c(0, 4), ElementKind::Exit)
            .build()
            .unwrap();

        let mut history = History::default();
        let last = sim.run(&mut history).unwrap();

        assert!(last.terminal);
        assert!(last.turn.0 <= 12, "terminated at or before max_turns");
        assert!(matches!(
            last.reason,
            Some(TerminationReason::MaxTurnsReached | TerminationReason::TotalAnnihilation)
        ));
        // The gate never opened, so nobody escaped.
        assert_eq!(last.escaped_count(), 0);

        // Once the chase is on (turn 2+), the pursuer has closed distance
        // relative to the start.
        let dist_at = |step: &StepResult| -> Option<u32> {
            let e = step.snapshot[0].pos?;
            let p = step.snapshot[1].pos?;
            Some(e.manhattan(p))
        };
        if let Some(d) = history.steps.iter().skip(2).filter_map(|s| dist_at(s)).min() {
            assert!(d < 8, "pursuer approached from the opposite corner");
        }
    }

    #[test]
    fn no_two_active_actors_share_a_cell() {
        let mut sim = SimulationBuilder::new(test_config(30), open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .actor(ActorConfig::new(Role::Support, c(1, 0)))
            .actor(ActorConfig::new(Role::Chaser, c(8, 8)))
            .actor(ActorConfig::new(Role::Blocker, c(7, 8)))
            .actor(ActorConfig::new(Role::Ambusher, c(8, 7)))
            .element(c(4, 4), ElementKind::Key { real: true })
            .element(c(0, 8), ElementKind::Exit)
            .build()
            .unwrap();

        let mut history = History::default();
        sim.run(&mut history).unwrap();

        for step in &history.steps {
            let mut cells: Vec<Cell> = step
                .snapshot
                .iter()
                .filter(|a| a.active())
                .filter_map(|a| a.pos)
                .collect();
            cells.sort();
            let before = cells.len();
            cells.dedup();
            assert_eq!(before, cells.len(), "cell shared at {}", step.turn);
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_run() {
        let build = || {
            SimulationBuilder::new(test_config(25), open_grid(9))
                .actor(ActorConfig::new(Role::Scout, c(0, 0)))
                .actor(ActorConfig::new(Role::Support, c(2, 0)))
                .actor(ActorConfig::new(Role::Chaser, c(8, 8)))
                .element(c(4, 4), ElementKind::Key { real: true })
                .element(c(0, 8), ElementKind::Exit)
                .build()
                .unwrap()
        };

        let mut a = build();
        let mut b = build();
        let mut ha = History::default();
        let mut hb = History::default();
        a.run(&mut ha).unwrap();
        b.run(&mut hb).unwrap();

        assert_eq!(ha.steps.len(), hb.steps.len());
        for (sa, sb) in ha.steps.iter().zip(&hb.steps) {
            assert_eq!(sa.turn, sb.turn);
            assert_eq!(sa.snapshot, sb.snapshot);
            assert_eq!(sa.intents, sb.intents);
            assert_eq!(sa.reason, sb.reason);
        }
    }

    #[test]
    fn key_then_exit_is_a_perfect_escape() {
        // Key and exit in plain sight on a corridor: pick up, walk out.
        let mut sim = SimulationBuilder::new(test_config(20), GridBuilder::new(5, 1).build().unwrap())
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(1, 0), ElementKind::Key { real: true })
            .element(c(3, 0), ElementKind::Exit)
            .build()
            .unwrap();

        let last = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(last.reason, Some(TerminationReason::PerfectEscape));
        assert!(last.turn.0 < 20, "escaped well before the limit");
        assert!(sim.world.exit_open);
    }

    #[test]
    fn decoy_key_leaves_the_gate_shut() {
        let mut sim = SimulationBuilder::new(test_config(8), GridBuilder::new(5, 1).build().unwrap())
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(1, 0), ElementKind::Key { real: false })
            .element(c(3, 0), ElementKind::Exit)
            .build()
            .unwrap();

        let mut history = History::default();
        let last = sim.run(&mut history).unwrap();

        assert!(!sim.world.exit_open);
        assert_eq!(sim.world.elements.len(), 1, "decoy was consumed");
        assert_eq!(last.reason, Some(TerminationReason::MaxTurnsReached));
        assert!(history.steps.iter().all(|s| s.escaped_count() == 0));
    }

    #[test]
    fn shockwave_lands_in_a_real_turn() {
        let mut sim = SimulationBuilder::new(test_config(10), open_grid(9))
            .actor(ActorConfig::new(Role::Support, c(2, 2)))
            .actor(ActorConfig::new(Role::Chaser, c(5, 2)))
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();
        sim.world.actors.charge[0] = 50;

        sim.step().unwrap();
        assert!(
            sim.world.actors.status[1].confusion > 0,
            "pursuer in range and LOS gets confused"
        );
        assert!(sim.world.actors.charge[0] <= 50 - 30 + crate::state::CHARGE_REGEN_PER_TURN);
    }

    #[test]
    fn channel_identifies_and_broadcasts_to_allies_only() {
        let mut sim = SimulationBuilder::new(test_config(10), open_grid(9))
            .actor(ActorConfig::new(Role::Support, c(2, 2)))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .actor(ActorConfig::new(Role::Chaser, c(8, 8)))
            .element(c(3, 2), ElementKind::Key { real: false })
            .element(c(0, 8), ElementKind::Exit)
            .build()
            .unwrap();
        sim.world.actors.charge[0] = 30;

        // Turn 1: support sees the key and enters the trance; the post-turn
        // hook identifies and broadcasts.
        sim.step().unwrap();

        let key_id = gp_core::ElementId(0);
        let support_knows = sim.memories.get(ActorId(0)).known_elements.get(&key_id);
        assert_eq!(support_knows.and_then(|k| k.authentic), Some(false));

        let scout_knows = sim.memories.get(ActorId(1)).known_elements.get(&key_id);
        assert_eq!(scout_knows.and_then(|k| k.authentic), Some(false), "ally learned the decoy");

        assert!(
            sim.memories.get(ActorId(2)).known_elements.get(&key_id).is_none(),
            "authenticity never reaches pursuers"
        );
        assert!(sim.world.elements.get(key_id).unwrap().identified);
    }

    #[test]
    fn channel_ends_in_backlash_during_a_run() {
        let mut sim = SimulationBuilder::new(test_config(10), open_grid(9))
            .actor(ActorConfig::new(Role::Support, c(2, 2)))
            .element(c(3, 2), ElementKind::Key { real: true })
            .element(c(0, 8), ElementKind::Exit)
            .build()
            .unwrap();
        sim.world.actors.charge[0] = 30;

        // Cast turn + three trance turns; the expiry tick applies the stun.
        for _ in 0..4 {
            sim.step().unwrap();
        }
        assert!(sim.world.actors.status[0].stun > 0, "trance ended in backlash");
    }

    #[test]
    fn terminal_step_is_a_noop() {
        let mut sim = SimulationBuilder::new(test_config(3), open_grid(5))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)))
            .element(c(4, 4), ElementKind::Exit)
            .build()
            .unwrap();

        let last = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(last.reason, Some(TerminationReason::MaxTurnsReached));

        let again = sim.step().unwrap();
        assert!(again.terminal);
        assert_eq!(again.turn, last.turn, "turn counter frozen after termination");
        assert!(again.intents.is_empty());
    }

    #[test]
    fn low_stamina_halves_vision_in_views() {
        let mut sim = SimulationBuilder::new(test_config(10), open_grid(9))
            .actor(ActorConfig::new(Role::Scout, c(0, 0)).with_vision(6))
            .actor(ActorConfig::new(Role::Chaser, c(5, 0)))
            .element(c(8, 8), ElementKind::Exit)
            .build()
            .unwrap();

        let views = sim.mediator.build_views(&sim.world);
        assert_eq!(views[&ActorId(0)].effective_vision, 6);
        assert!(views[&ActorId(0)].sees_pursuer(), "distance 5 ≤ range 6");

        sim.world.actors.stamina[0] = 5; // below the threshold of 10
        let views = sim.mediator.build_views(&sim.world);
        assert_eq!(views[&ActorId(0)].effective_vision, 3);
        assert!(!views[&ActorId(0)].sees_pursuer(), "distance 5 > halved range 3");
    }

    #[test]
    fn walls_hide_actors_from_views() {
        let grid = GridBuilder::new(7, 3)
            .walls([c(3, 0), c(3, 1), c(3, 2)])
            .build()
            .unwrap();
        let sim = SimulationBuilder::new(test_config(10), grid)
            .actor(ActorConfig::new(Role::Scout, c(1, 1)))
            .actor(ActorConfig::new(Role::Chaser, c(5, 1)))
            .element(c(0, 0), ElementKind::Exit)
            .build()
            .unwrap();

        let views = sim.mediator.build_views(&sim.world);
        assert!(views[&ActorId(0)].actors.is_empty(), "wall blocks the sightline");
        assert!(views[&ActorId(1)].actors.is_empty());
    }
}
