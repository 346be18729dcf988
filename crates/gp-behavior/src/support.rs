//! The support evader: casts, channels, and terrain-aware retreats.

use gp_actor::{ActorMemory, ActorRng};
use gp_core::{ActorId, Cell, ElementClass};
use gp_grid::Pathfinder;

use crate::model::absorb_view;
use crate::{
    intent::{priority, Skill, SkillCast},
    CoordinationBoard, Intent, LocalView, Strategy,
};

/// Tuning knobs for [`SupportStrategy`] retreat scoring.  Casting costs and
/// ranges come from the [`Skill`] table, shared with the resolver.
#[derive(Clone, Debug)]
pub struct SupportTuning {
    /// Chebyshev radius of the candidate-cell scan.
    pub retreat_radius: i32,
    /// Flood-fill depth for connectivity scoring.
    pub conn_depth:     u32,
    /// Weight of the per-threat inverse-distance danger term.
    pub danger_weight:  f64,
    /// Flat penalty for cells remembered as capture sites.
    pub capture_penalty: f64,
    /// Cost per Manhattan step from the current cell.
    pub step_cost:      f64,
}

impl Default for SupportTuning {
    fn default() -> Self {
        Self {
            retreat_radius:  3,
            conn_depth:      3,
            danger_weight:   12.0,
            capture_penalty: 8.0,
            step_cost:       0.5,
        }
    }
}

/// Spend charge on a shockwave or rally when threatened, channel to identify
/// keys when safe, and otherwise hold ground picked by connectivity-vs-danger
/// scoring.
#[derive(Default)]
pub struct SupportStrategy {
    pub tuning: SupportTuning,
}

impl Strategy for SupportStrategy {
    fn decide(
        &self,
        _actor: ActorId,
        view:   &LocalView<'_>,
        memory: &mut ActorMemory,
        _board: &mut CoordinationBoard,
        _rng:   &mut ActorRng,
    ) -> Intent {
        absorb_view(view, memory, true);

        if view.status.is_disabled() {
            return Intent::wait(view.pos);
        }
        // The trance is spent standing still; movement would break it.
        if view.status.channeling() {
            return Intent::wait(view.pos);
        }

        let threatened = view.sees_pursuer();

        if threatened {
            if let Some(cast) = self.combat_cast(view) {
                return Intent::skill(view.pos, cast);
            }
        } else if self.should_channel(view, memory) {
            return Intent::skill(
                view.pos,
                SkillCast { skill: Skill::Channel, target: view.pos },
            );
        }

        let target = self.retreat_cell(view, memory);
        let prio = if threatened { priority::FLEE } else { priority::EXPLORE };
        Intent::movement(target, prio)
    }
}

impl SupportStrategy {
    /// Shockwave the nearest reachable pursuer, or rally nearby allies.
    /// The two are mutually exclusive within a turn; shockwave wins when
    /// both are possible.
    fn combat_cast(&self, view: &LocalView<'_>) -> Option<SkillCast> {
        if view.charge >= Skill::Shockwave.cost() {
            let pf = Pathfinder::new(view.grid);
            let target = view
                .visible_opponents()
                .filter_map(|p| p.pos)
                .filter(|&p| view.pos.manhattan(p) <= Skill::Shockwave.cast_range())
                .filter(|&p| pf.has_line_of_sight(view.pos, p))
                .min_by_key(|&p| (view.pos.manhattan(p), p));
            if let Some(target) = target {
                return Some(SkillCast { skill: Skill::Shockwave, target });
            }
        }

        if view.charge >= Skill::Rally.cost() {
            let ally_near = view
                .visible_allies()
                .filter_map(|a| a.pos)
                .any(|p| view.pos.manhattan(p) <= Skill::Rally.effect_radius());
            if ally_near {
                return Some(SkillCast { skill: Skill::Rally, target: view.pos });
            }
        }

        None
    }

    /// Channel when safe, charged, and holding an unidentified key sighting.
    fn should_channel(&self, view: &LocalView<'_>, memory: &ActorMemory) -> bool {
        view.charge >= Skill::Channel.cost()
            && memory
                .known_elements
                .values()
                .any(|k| k.class == ElementClass::Key && k.authentic.is_none())
    }

    /// Score candidate cells in a bounded radius:
    ///
    ///   connectivity − Σ danger(threat) − capture penalty − step cost
    ///
    /// The danger term is inverse-distance per threat and doubled when the
    /// threat's recent velocity points at the candidate.  Candidates are
    /// scanned in row-major order and ties keep the first seen, so the
    /// choice is deterministic.
    fn retreat_cell(&self, view: &LocalView<'_>, memory: &ActorMemory) -> Cell {
        let threats: Vec<(Cell, (i32, i32))> = view
            .visible_opponents()
            .filter_map(|p| {
                let pos = p.pos?;
                let vel = memory
                    .track_estimate(p.id)
                    .map(|t| t.vel)
                    .unwrap_or((0, 0));
                Some((pos, vel))
            })
            .collect();

        let r = self.tuning.retreat_radius;
        let mut best: Option<(f64, Cell)> = None;

        for dy in -r..=r {
            for dx in -r..=r {
                let cell = view.pos.offset(dx, dy);
                if !view.grid.is_walkable(cell) {
                    continue;
                }

                let mut score = view.grid.connectivity(cell, self.tuning.conn_depth) as f64;

                for &(tpos, tvel) in &threats {
                    let dist = cell.manhattan(tpos) as f64;
                    let mut danger = self.tuning.danger_weight / (1.0 + dist);
                    let (ax, ay) = tpos.delta(cell);
                    if tvel.0 * ax + tvel.1 * ay > 0 {
                        danger *= 2.0; // threat is heading this way
                    }
                    score -= danger;
                }

                if memory.is_danger(cell) {
                    score -= self.tuning.capture_penalty;
                }
                score -= self.tuning.step_cost * view.pos.manhattan(cell) as f64;

                if best.is_none_or(|(b, _)| score > b) {
                    best = Some((score, cell));
                }
            }
        }

        best.map(|(_, c)| c).unwrap_or(view.pos)
    }
}
