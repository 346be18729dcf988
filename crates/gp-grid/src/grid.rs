//! Grid representation and builder.
//!
//! # Data layout
//!
//! The wall bitmap is a row-major `Vec<bool>` (`walls[y * width + x]`), with
//! a derived cache of all walkable cells built once at construction.  The
//! cache backs frontier sampling and patrol-target selection, which need
//! uniform draws over walkable cells without re-scanning the bitmap.
//!
//! # Movement rule
//!
//! Movement is 8-directional.  A diagonal step is legal only when both
//! orthogonal "corner" cells are walkable — actors cannot squeeze between
//! two diagonally touching walls.  [`Grid::moves_from`] is the single
//! authority for that rule; the pathfinder and the strategies both go
//! through it.

use gp_core::Cell;

use crate::{GridError, GridResult};

/// Neighbor offsets in fixed scan order: orthogonal first, then diagonal.
/// Every neighbor iteration in the crate uses this order, which keeps tie
/// situations deterministic.
pub(crate) const DIRS: [(i32, i32); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Static wall bitmap with bounds and walkability queries.
///
/// Construct via [`GridBuilder`]; dimensions are validated once and the
/// walkable-cell cache is derived at build time.
pub struct Grid {
    width:    i32,
    height:   i32,
    walls:    Vec<bool>,
    walkable: Vec<Cell>,
}

impl Grid {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn idx(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    /// `true` if `cell` lies inside the map rectangle.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// `true` if `cell` is in bounds and a wall.
    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.walls[self.idx(cell)]
    }

    /// `true` if `cell` is in bounds and not a wall.
    #[inline]
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.walls[self.idx(cell)]
    }

    /// All walkable cells in row-major order.  Stable across the run.
    #[inline]
    pub fn walkable_cells(&self) -> &[Cell] {
        &self.walkable
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Legal single-step destinations from `cell`, in [`DIRS`] order.
    ///
    /// Applies the corner-cut rule: a diagonal step requires both adjacent
    /// orthogonal cells to be walkable.
    pub fn moves_from(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRS.iter().filter_map(move |&(dx, dy)| {
            let next = cell.offset(dx, dy);
            if !self.is_walkable(next) {
                return None;
            }
            if dx != 0 && dy != 0 {
                let corner_a = cell.offset(dx, 0);
                let corner_b = cell.offset(0, dy);
                if !self.is_walkable(corner_a) || !self.is_walkable(corner_b) {
                    return None;
                }
            }
            Some(next)
        })
    }

    // ── Terrain scoring ───────────────────────────────────────────────────

    /// Bounded-depth flood-fill connectivity score for `cell`.
    ///
    /// Breadth-first fill up to `depth` steps; each reached cell contributes
    /// `depth + 1 - distance`, so branches close to `cell` weigh more than
    /// distant ones.  High scores mean open ground with many escape lines;
    /// low scores mark chokes and dead ends.
    pub fn connectivity(&self, cell: Cell, depth: u32) -> u32 {
        if !self.is_walkable(cell) {
            return 0;
        }

        let mut seen = vec![false; (self.width * self.height) as usize];
        seen[self.idx(cell)] = true;
        let mut frontier = vec![cell];
        let mut score = 0u32;

        for dist in 1..=depth {
            let mut next_frontier = Vec::new();
            for &c in &frontier {
                for n in self.moves_from(c) {
                    let i = self.idx(n);
                    if !seen[i] {
                        seen[i] = true;
                        score += depth + 1 - dist;
                        next_frontier.push(n);
                    }
                }
            }
            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }
        score
    }

    /// The walkable cell nearest to `cell` within `radius` Chebyshev rings,
    /// scanning rings outward in deterministic order.  Returns `cell` itself
    /// if it is already walkable, `None` if no ring contains one.
    pub fn nearest_walkable(&self, cell: Cell, radius: i32) -> Option<Cell> {
        if self.is_walkable(cell) {
            return Some(cell);
        }
        for r in 1..=radius {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs() != r && dy.abs() != r {
                        continue; // interior of the ring, already scanned
                    }
                    let c = cell.offset(dx, dy);
                    if self.is_walkable(c) {
                        return Some(c);
                    }
                }
            }
        }
        None
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Grid`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gp_core::Cell;
/// use gp_grid::GridBuilder;
///
/// let grid = GridBuilder::new(5, 5)
///     .wall(Cell::new(2, 2))
///     .build()
///     .unwrap();
/// assert!(grid.is_wall(Cell::new(2, 2)));
/// assert_eq!(grid.walkable_cells().len(), 24);
/// ```
pub struct GridBuilder {
    width:  i32,
    height: i32,
    walls:  Vec<bool>,
}

impl GridBuilder {
    /// Start an all-open grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self { width, height, walls: vec![false; len] }
    }

    /// Adopt a pre-built row-major wall bitmap (e.g. from a generator).
    ///
    /// Fails if the bitmap length does not match `width * height`.
    pub fn from_bitmap(width: i32, height: i32, walls: Vec<bool>) -> GridResult<Grid> {
        let expected = (width.max(0) * height.max(0)) as usize;
        if walls.len() != expected {
            return Err(GridError::BitmapSizeMismatch { expected, got: walls.len() });
        }
        Self { width, height, walls }.build()
    }

    /// Mark `cell` as a wall.  Out-of-bounds cells are ignored.
    pub fn wall(mut self, cell: Cell) -> Self {
        if cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height {
            self.walls[(cell.y * self.width + cell.x) as usize] = true;
        }
        self
    }

    /// Mark every cell in `cells` as a wall.
    pub fn walls<I: IntoIterator<Item = Cell>>(mut self, cells: I) -> Self {
        for c in cells {
            self = self.wall(c);
        }
        self
    }

    /// Validate dimensions and derive the walkable-cell cache.
    pub fn build(self) -> GridResult<Grid> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::EmptyGrid { width: self.width, height: self.height });
        }

        let walkable = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Cell::new(x, y)))
            .filter(|&c| !self.walls[(c.y * self.width + c.x) as usize])
            .collect();

        Ok(Grid {
            width:  self.width,
            height: self.height,
            walls:  self.walls,
            walkable,
        })
    }
}
