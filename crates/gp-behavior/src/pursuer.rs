//! Pursuer roles: chaser, blocker, ambusher.
//!
//! All three share the same skeleton — claim a track from the coordination
//! board, derive a role-specific target, reserve the next step — and differ
//! only in where they want to stand relative to the prediction.

use gp_actor::{ActorMemory, ActorRng, TrackEstimate};
use gp_core::{ActorId, Cell, Role};
use gp_grid::{Grid, Pathfinder};

use crate::model::absorb_view;
use crate::{intent::priority, CoordinationBoard, Intent, LocalView, Strategy};

/// Tuning knobs for [`PursuerStrategy`].
#[derive(Clone, Debug)]
pub struct PursuerTuning {
    /// Turns of velocity projection for the chase prediction.
    pub lookahead: i32,
    /// Per-turn probability of a lunge (priority bonus).
    pub lunge_chance: f64,
    /// Probability of side-stepping instead of holding when the intended
    /// next step is already reserved by another pursuer.
    pub sidestep_chance: f64,
    /// Chebyshev radius searched for choke/ambush cells around the anchor.
    pub choke_radius: i32,
    /// Flood-fill depth for connectivity scoring.
    pub conn_depth: u32,
    /// Per-axis jitter applied to a blocker's choke point.
    pub jitter: i32,
    /// Walkable cells sampled when picking a patrol target.
    pub patrol_samples: usize,
}

impl Default for PursuerTuning {
    fn default() -> Self {
        Self {
            lookahead:       2,
            lunge_chance:    0.15,
            sidestep_chance: 0.3,
            choke_radius:    2,
            conn_depth:      2,
            jitter:          1,
            patrol_samples:  8,
        }
    }
}

/// Role-parameterized pursuer.
pub struct PursuerStrategy {
    pub role:   Role,
    pub tuning: PursuerTuning,
}

impl PursuerStrategy {
    pub fn new(role: Role) -> Self {
        Self { role, tuning: PursuerTuning::default() }
    }
}

impl Strategy for PursuerStrategy {
    fn decide(
        &self,
        actor:  ActorId,
        view:   &LocalView<'_>,
        memory: &mut ActorMemory,
        board:  &mut CoordinationBoard,
        rng:    &mut ActorRng,
    ) -> Intent {
        // Pursuer evader-tracking happens in the mediator's post-turn hook;
        // absorbing here only folds in elements, sightings, and visits.
        absorb_view(view, memory, false);

        if view.status.is_disabled() {
            return Intent::wait(view.pos);
        }

        // Fold direct sightings into the board before claiming: an evader in
        // sight right now is always a fresher track than anything a memory
        // contributed at turn start.
        for evader in view.visible_opponents() {
            if let Some(pos) = evader.pos {
                let vel = memory
                    .track_estimate(evader.id)
                    .filter(|t| view.turn.since(t.turn) <= 2)
                    .map(|t| t.vel)
                    .unwrap_or((0, 0));
                board.insert_track(evader.id, TrackEstimate { pos, turn: view.turn, vel });
            }
        }

        let target = match board.claim_nearest(actor, view.pos) {
            Some((_evader, estimate)) => match self.role {
                Role::Blocker  => self.choke_target(view.grid, &estimate, board.exit_pos, rng),
                Role::Ambusher => self.ambush_target(view.grid, &estimate),
                _              => chase_target(view.grid, &estimate, self.tuning.lookahead),
            },
            None => self.patrol_target(view, memory, rng),
        };

        let mut prio = priority::PURSUE;
        if rng.gen_bool(self.tuning.lunge_chance) {
            prio += priority::LUNGE_BONUS;
        }

        self.reserve_step(view, board, rng, target, prio)
    }
}

impl PursuerStrategy {
    /// A low-connectivity cell near the prediction, biased toward the exit —
    /// deny the likely goal line — with per-actor jitter so several blockers
    /// spread instead of stacking.
    fn choke_target(
        &self,
        grid: &Grid,
        estimate: &TrackEstimate,
        exit_pos: Cell,
        rng: &mut ActorRng,
    ) -> Cell {
        let anchor = chase_target(grid, estimate, self.tuning.lookahead);
        let choke = cells_within(grid, anchor, self.tuning.choke_radius)
            .min_by_key(|&c| (grid.connectivity(c, self.tuning.conn_depth), c.manhattan(exit_pos), c))
            .unwrap_or(anchor);

        let j = self.tuning.jitter;
        let jittered = choke.offset(rng.gen_range(-j..=j), rng.gen_range(-j..=j));
        if grid.is_walkable(jittered) { jittered } else { choke }
    }

    /// A low-connectivity cell ahead of the predicted path.
    fn ambush_target(&self, grid: &Grid, estimate: &TrackEstimate) -> Cell {
        let ahead = chase_target(grid, estimate, self.tuning.lookahead * 2);
        cells_within(grid, ahead, self.tuning.choke_radius)
            .min_by_key(|&c| (grid.connectivity(c, self.tuning.conn_depth), c.manhattan(ahead), c))
            .unwrap_or(ahead)
    }

    /// No claimable track: wander toward a seldom-visited walkable cell.
    fn patrol_target(
        &self,
        view:   &LocalView<'_>,
        memory: &ActorMemory,
        rng:    &mut ActorRng,
    ) -> Cell {
        let cells = view.grid.walkable_cells();
        let mut best: Option<(u32, Cell)> = None;
        for _ in 0..self.tuning.patrol_samples {
            let candidate = cells[rng.gen_range(0..cells.len())];
            let visits = memory.visit_count(candidate);
            if best.is_none_or(|(bv, _)| visits < bv) {
                best = Some((visits, candidate));
            }
        }
        best.map(|(_, c)| c).unwrap_or(view.pos)
    }

    /// Reserve the next step on the board.  A conflicting reservation
    /// either side-steps to an open neighbor (small probability) or holds
    /// position — pursuers never contest each other's cells.
    fn reserve_step(
        &self,
        view:   &LocalView<'_>,
        board:  &mut CoordinationBoard,
        rng:    &mut ActorRng,
        target: Cell,
        prio:   i32,
    ) -> Intent {
        let pf = Pathfinder::new(view.grid);
        let next = pf.next_step(view.pos, target);

        if next == view.pos {
            board.reserve(view.pos);
            return Intent::wait(view.pos);
        }

        if board.reserve(next) {
            return Intent::movement(target, prio);
        }

        if rng.gen_bool(self.tuning.sidestep_chance) {
            if let Some(alt) = view
                .grid
                .moves_from(view.pos)
                .find(|&c| !board.is_reserved(c))
            {
                board.reserve(alt);
                return Intent::movement(alt, prio);
            }
        }

        board.reserve(view.pos);
        Intent::wait(view.pos)
    }
}

// ── Free helpers ──────────────────────────────────────────────────────────────

/// The chase anchor: the track projected `lookahead` turns forward, snapped
/// back onto walkable ground (falling back to the last confirmed cell).
fn chase_target(grid: &Grid, estimate: &TrackEstimate, lookahead: i32) -> Cell {
    let predicted = estimate.project(lookahead);
    grid.nearest_walkable(predicted, 2).unwrap_or(estimate.pos)
}

/// Walkable cells within a Chebyshev radius of `center`, in row-major order.
fn cells_within(grid: &Grid, center: Cell, radius: i32) -> impl Iterator<Item = Cell> + '_ {
    (-radius..=radius)
        .flat_map(move |dy| (-radius..=radius).map(move |dx| center.offset(dx, dy)))
        .filter(|&c| grid.is_walkable(c))
}
