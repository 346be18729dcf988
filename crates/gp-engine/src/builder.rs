//! Fluent builder for constructing a [`Simulation`].
//!
//! All setup validation happens here, before turn 0 — a malformed world is
//! a fatal error, never something the turn loop has to survive.

use rustc_hash::FxHashSet;

use gp_actor::{ActorConfig, ActorStoreBuilder};
use gp_behavior::Brain;
use gp_core::{ActorId, Cell, SimConfig};
use gp_grid::Grid;

use crate::element::{ElementKind, ElementTable};
use crate::mediator::VisibilityMediator;
use crate::resolver::ActionResolver;
use crate::state::WorldState;
use crate::{EngineError, EngineResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, turn limit, thresholds, tie-break policy
/// - a built [`Grid`]
/// - a non-empty actor roster
/// - map elements including exactly one [`ElementKind::Exit`]
///
/// # Example
///
/// ```rust,ignore
/// let grid = GridBuilder::new(9, 9).build()?;
/// let mut sim = SimulationBuilder::new(SimConfig::default(), grid)
///     .actor(ActorConfig::new(Role::Scout, Cell::new(0, 0)))
///     .actor(ActorConfig::new(Role::Chaser, Cell::new(8, 8)))
///     .element(Cell::new(4, 4), ElementKind::Exit)
///     .element(Cell::new(2, 6), ElementKind::Key { real: true })
///     .build()?;
/// let last = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimulationBuilder {
    config:   SimConfig,
    grid:     Grid,
    roster:   Vec<ActorConfig>,
    elements: Vec<(Cell, ElementKind)>,
}

impl SimulationBuilder {
    pub fn new(config: SimConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            roster:   Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Append one actor; its `ActorId` is the insertion index.
    pub fn actor(mut self, config: ActorConfig) -> Self {
        self.roster.push(config);
        self
    }

    /// Append a whole roster.
    pub fn roster<I: IntoIterator<Item = ActorConfig>>(mut self, configs: I) -> Self {
        self.roster.extend(configs);
        self
    }

    /// Place a map element; `ElementId`s follow insertion order.
    pub fn element(mut self, pos: Cell, kind: ElementKind) -> Self {
        self.elements.push((pos, kind));
        self
    }

    /// Validate everything and assemble a ready-to-run [`Simulation`].
    pub fn build(self) -> EngineResult<Simulation> {
        self.config.validate()?;

        if self.roster.is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        // ── Spawn validation ──────────────────────────────────────────────
        let mut spawn_cells: FxHashSet<Cell> = FxHashSet::default();
        for (i, actor) in self.roster.iter().enumerate() {
            if !self.grid.is_walkable(actor.spawn) {
                return Err(EngineError::BadSpawn { id: ActorId(i as u32), cell: actor.spawn });
            }
            if !spawn_cells.insert(actor.spawn) {
                return Err(EngineError::SpawnCollision(actor.spawn));
            }
        }

        // ── Element validation ────────────────────────────────────────────
        let mut element_cells: FxHashSet<Cell> = FxHashSet::default();
        let mut exit_pos = None;
        for &(pos, kind) in &self.elements {
            if !self.grid.is_walkable(pos) {
                return Err(EngineError::BadElementCell(pos));
            }
            if !element_cells.insert(pos) {
                return Err(EngineError::ElementCollision(pos));
            }
            if kind == ElementKind::Exit {
                if exit_pos.is_some() {
                    return Err(EngineError::ExitCount(2));
                }
                exit_pos = Some(pos);
            }
        }
        let Some(exit_pos) = exit_pos else {
            return Err(EngineError::ExitCount(0));
        };

        // ── Assembly ──────────────────────────────────────────────────────
        let brains: Vec<Brain> = self.roster.iter().map(|c| Brain::for_role(c.role)).collect();

        let (store, rngs, memories) = ActorStoreBuilder::new(self.config.seed)
            .roster(self.roster)
            .build();

        let mut elements = ElementTable::new();
        for (pos, kind) in self.elements {
            elements.insert(pos, kind);
        }

        let mediator = VisibilityMediator::new(&self.config);
        let resolver = ActionResolver::new(self.config.precedence);
        let world = WorldState::new(self.config, self.grid, store, elements, exit_pos);

        Ok(Simulation {
            world,
            memories,
            rngs,
            brains,
            mediator,
            resolver,
        })
    }
}
