//! The default goal-seeking evader.

use gp_actor::{ActorMemory, ActorRng};
use gp_core::{ActorId, Cell, ElementClass};

use crate::model::{absorb_view, is_pursuer};
use crate::{intent::priority, CoordinationBoard, Intent, LocalView, Strategy};

/// Tuning knobs for [`ScoutStrategy`].
#[derive(Clone, Debug)]
pub struct ScoutTuning {
    /// Walkable cells sampled when picking a fresh frontier target.
    pub frontier_samples: usize,
    /// Consecutive no-progress turns before the frontier is abandoned.
    pub stuck_limit: u32,
}

impl Default for ScoutTuning {
    fn default() -> Self {
        Self { frontier_samples: 12, stuck_limit: 2 }
    }
}

/// Flee from visible pursuers, else walk to the best known goal element,
/// else explore toward seldom-visited ground.
#[derive(Default)]
pub struct ScoutStrategy {
    pub tuning: ScoutTuning,
}

impl Strategy for ScoutStrategy {
    fn decide(
        &self,
        _actor: ActorId,
        view:   &LocalView<'_>,
        memory: &mut ActorMemory,
        _board: &mut CoordinationBoard,
        rng:    &mut ActorRng,
    ) -> Intent {
        absorb_view(view, memory, false);

        if view.status.is_disabled() {
            return Intent::wait(view.pos);
        }

        if view.sees_pursuer() {
            return flee_intent(view);
        }

        if let Some(goal) = best_goal(view, memory) {
            return Intent::movement(goal, priority::GOAL);
        }

        Intent::movement(self.frontier_target(view, memory, rng), priority::EXPLORE)
    }
}

impl ScoutStrategy {
    /// Keep the current frontier while progress is being made; otherwise
    /// sample walkable cells and pick the least-visited (farthest among
    /// equals) as the new one.
    fn frontier_target(
        &self,
        view:   &LocalView<'_>,
        memory: &mut ActorMemory,
        rng:    &mut ActorRng,
    ) -> Cell {
        if let Some(frontier) = memory.frontier {
            if frontier != view.pos && memory.stuck_streak < self.tuning.stuck_limit {
                return frontier;
            }
        }

        let cells = view.grid.walkable_cells();
        let mut best: Option<(u32, u32, Cell)> = None; // (visits, -dist key via max)
        for _ in 0..self.tuning.frontier_samples {
            let candidate = cells[rng.gen_range(0..cells.len())];
            let visits = memory.visit_count(candidate);
            let dist = view.pos.manhattan(candidate);
            let better = match best {
                None => true,
                Some((bv, bd, _)) => visits < bv || (visits == bv && dist > bd),
            };
            if better {
                best = Some((visits, dist, candidate));
            }
        }

        // cells is never empty (the actor stands on a walkable cell), so a
        // sample always exists.
        let target = best.map(|(_, _, c)| c).unwrap_or(view.pos);
        memory.frontier = Some(target);
        memory.stuck_streak = 0;
        target
    }
}

// ── Shared evader movement helpers ────────────────────────────────────────────

/// Inverse-distance-weighted flight: sum the unit vectors away from every
/// visible pursuer (each weighted 1/distance), then step to the adjacent
/// cell best aligned with the sum.
pub(crate) fn flee_intent(view: &LocalView<'_>) -> Intent {
    let (mut fx, mut fy) = (0.0f64, 0.0f64);
    for p in view.visible_opponents() {
        let Some(ppos) = p.pos else { continue };
        let dx = (view.pos.x - ppos.x) as f64;
        let dy = (view.pos.y - ppos.y) as f64;
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 {
            // unit vector away, weighted by 1/distance: net contribution d/len².
            fx += dx / (len * len);
            fy += dy / (len * len);
        }
    }

    // Best-aligned legal step; staying put scores 0 and is the fallback.
    let mut best = (0.0f64, view.pos);
    for next in view.grid.moves_from(view.pos) {
        let (dx, dy) = view.pos.delta(next);
        let score = fx * dx as f64 + fy * dy as f64;
        if score > best.0 {
            best = (score, next);
        }
    }

    Intent::movement(best.1, priority::FLEE)
}

/// The nearest known goal element, preferring exit > key > pickup.
///
/// A visibly closed gate demotes the exit below keys — walking to a door
/// that cannot open yet wastes the turn a key pickup would have used.  Keys
/// learned to be decoys are skipped; traps are never goals.  Ties break by
/// distance, then element id (ascending map order).
pub(crate) fn best_goal(view: &LocalView<'_>, memory: &ActorMemory) -> Option<Cell> {
    debug_assert!(!view.actors.iter().any(|a| is_pursuer(a.faction)), "goal-seeking while threatened");

    let mut best: Option<(u8, u32, Cell)> = None;
    for known in memory.known_elements.values() {
        let rank = match known.class {
            ElementClass::Exit if view.exit_open => 0,
            ElementClass::Key if known.authentic != Some(false) => 1,
            ElementClass::Pickup(_) => 2,
            // Closed gate: still worth camping once nothing else is known.
            ElementClass::Exit => 3,
            _ => continue,
        };
        let dist = view.pos.manhattan(known.pos);
        let better = match best {
            None => true,
            Some((br, bd, _)) => (rank, dist) < (br, bd),
        };
        if better {
            best = Some((rank, dist, known.pos));
        }
    }
    best.map(|(_, _, pos)| pos)
}
