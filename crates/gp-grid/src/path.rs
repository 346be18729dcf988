//! Grid-constrained shortest paths and line-of-sight.
//!
//! # Cost units
//!
//! All costs are scaled integers: an orthogonal step costs 10, a diagonal
//! step 14 (≈ 10·√2).  Integer costs keep the open-set ordering exact — no
//! float comparison subtleties — and make the octile heuristic trivially
//! admissible and consistent.
//!
//! # Determinism
//!
//! Equal-f frontier nodes are expanded in FIFO insertion order via a
//! monotonically increasing sequence number in the heap key, so the same
//! query always returns the same path.
//!
//! # Failure mode
//!
//! Pathfinding fails closed: an out-of-bounds, walled, or unreachable goal
//! yields the single-cell path `[start]`, which downstream resolution treats
//! as "stay in place".  No query ever errors.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gp_core::Cell;

use crate::Grid;

/// Scaled cost of an orthogonal step.
const COST_ORTHO: u32 = 10;
/// Scaled cost of a diagonal step.
const COST_DIAG: u32 = 14;

/// Shortest-path search and visibility queries over one [`Grid`].
///
/// Cheap to construct — borrow a grid wherever a path is needed:
///
/// ```
/// use gp_core::Cell;
/// use gp_grid::{GridBuilder, Pathfinder};
///
/// let grid = GridBuilder::new(4, 4).build().unwrap();
/// let pf = Pathfinder::new(&grid);
/// let path = pf.find_path(Cell::new(0, 0), Cell::new(3, 3));
/// assert_eq!(path.len(), 4); // three diagonal steps
/// ```
pub struct Pathfinder<'a> {
    grid: &'a Grid,
}

impl<'a> Pathfinder<'a> {
    #[inline]
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    // ── Shortest path ─────────────────────────────────────────────────────

    /// 8-directional A* from `start` to `goal`, inclusive of both endpoints.
    ///
    /// Returns `[start]` when the goal is invalid or unreachable.
    pub fn find_path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        if !self.grid.is_walkable(goal) || !self.grid.is_walkable(start) {
            return vec![start];
        }
        if start == goal {
            return vec![start];
        }

        let n = (self.grid.width() * self.grid.height()) as usize;
        let idx = |c: Cell| (c.y * self.grid.width() + c.x) as usize;

        // g[v] = best known cost to reach v; INVALID parent marks unreached.
        let mut g_score = vec![u32::MAX; n];
        let mut parent: Vec<Option<Cell>> = vec![None; n];
        g_score[idx(start)] = 0;

        // Min-heap on (f, seq): seq is FIFO among equal f-scores.
        let mut heap: BinaryHeap<Reverse<(u32, u64, Cell)>> = BinaryHeap::new();
        let mut seq = 0u64;
        heap.push(Reverse((octile(start, goal), seq, start)));

        while let Some(Reverse((_, _, current))) = heap.pop() {
            if current == goal {
                return self.reconstruct(&parent, start, goal, idx);
            }

            let g_here = g_score[idx(current)];

            for next in self.grid.moves_from(current) {
                let step = if next.x != current.x && next.y != current.y {
                    COST_DIAG
                } else {
                    COST_ORTHO
                };
                let tentative = g_here.saturating_add(step);
                if tentative < g_score[idx(next)] {
                    g_score[idx(next)] = tentative;
                    parent[idx(next)] = Some(current);
                    seq += 1;
                    heap.push(Reverse((tentative + octile(next, goal), seq, next)));
                }
            }
        }

        vec![start]
    }

    /// First cell after `start` on the path to `goal`, or `start` when no
    /// path advances.
    pub fn next_step(&self, start: Cell, goal: Cell) -> Cell {
        let path = self.find_path(start, goal);
        if path.len() > 1 { path[1] } else { start }
    }

    fn reconstruct(
        &self,
        parent: &[Option<Cell>],
        start:  Cell,
        goal:   Cell,
        idx:    impl Fn(Cell) -> usize,
    ) -> Vec<Cell> {
        let mut path = vec![goal];
        let mut cur = goal;
        while cur != start {
            match parent[idx(cur)] {
                Some(prev) => {
                    path.push(prev);
                    cur = prev;
                }
                None => return vec![start],
            }
        }
        path.reverse();
        path
    }

    // ── Line of sight ─────────────────────────────────────────────────────

    /// `true` when no *interior* cell of the segment `a`–`b` is a wall.
    ///
    /// Endpoints are excluded from the wall test, so actors standing in a
    /// doorway can see (and be seen).  Endpoints outside the map never have
    /// visibility.  The walk is run over canonically ordered endpoints, so
    /// `has_line_of_sight(a, b) == has_line_of_sight(b, a)` always holds.
    pub fn has_line_of_sight(&self, a: Cell, b: Cell) -> bool {
        if !self.grid.in_bounds(a) || !self.grid.in_bounds(b) {
            return false;
        }
        // Canonical endpoint order makes the traversal direction-independent.
        let (p, q) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };

        let dx = (q.x - p.x).abs();
        let dy = (q.y - p.y).abs();
        let x_inc = if q.x > p.x { 1 } else { -1 };
        let y_inc = if q.y > p.y { 1 } else { -1 };

        let mut x = p.x;
        let mut y = p.y;
        let mut error = dx - dy;
        let (dx2, dy2) = (dx * 2, dy * 2);

        // The walk visits 1 + dx + dy cells, stepping one axis at a time.
        for _ in 0..(dx + dy + 1) {
            let here = Cell::new(x, y);
            if here != p && here != q && self.grid.is_wall(here) {
                return false;
            }
            if error > 0 {
                x += x_inc;
                error -= dy2;
            } else {
                y += y_inc;
                error += dx2;
            }
        }
        true
    }
}

/// Octile-distance heuristic in scaled cost units: exact on an open grid,
/// therefore admissible and consistent on any grid.
#[inline]
fn octile(a: Cell, b: Cell) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    COST_DIAG * lo + COST_ORTHO * (hi - lo)
}
