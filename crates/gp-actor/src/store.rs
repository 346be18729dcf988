//! Core actor storage: `ActorStore` (SoA data) and `ActorRngs` (per-actor RNG).
//!
//! # Why separate structs?
//!
//! The decision phase needs `&mut` access to one actor's RNG and memory
//! while everything else is read through shared borrows of the store.
//! Keeping RNGs (and memories, see [`crate::memory`]) in parallel
//! collections outside `ActorStore` gives the borrow checker the disjoint
//! access it needs without any interior mutability.
//!
//! Every `Vec` field has exactly `count` elements; the `ActorId` value is
//! the index into all of them.

use gp_core::{ActorId, ActorPublic, ActorRng, Cell, Faction, Role};

use crate::StatusSet;

// ── ActorRngs ─────────────────────────────────────────────────────────────────

/// Per-actor deterministic RNG state, parallel to [`ActorStore`].
pub struct ActorRngs {
    pub inner: Vec<ActorRng>,
}

impl ActorRngs {
    /// Allocate and seed `count` per-actor RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| ActorRng::new(global_seed, ActorId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one actor's RNG.
    #[inline]
    pub fn get_mut(&mut self, actor: ActorId) -> &mut ActorRng {
        &mut self.inner[actor.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── ActorStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all actor state.
///
/// Owned by the world state; mutated only during the commit step.  All
/// fields are `pub` for direct indexed access on hot paths — the engine is
/// the only writer by construction.
pub struct ActorStore {
    /// Number of actors.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Identity ──────────────────────────────────────────────────────────
    pub role: Vec<Role>,

    // ── Board state ───────────────────────────────────────────────────────
    /// Current cell; `None` when dead or escaped.
    pub pos: Vec<Option<Cell>>,
    /// Start-of-run cell, kept for reporting.
    pub spawn: Vec<Cell>,
    pub alive: Vec<bool>,
    pub escaped: Vec<bool>,

    // ── Capabilities ──────────────────────────────────────────────────────
    pub vision_range: Vec<u32>,
    pub base_speed: Vec<u32>,

    // ── Resources ─────────────────────────────────────────────────────────
    pub stamina: Vec<u32>,
    pub stamina_max: Vec<u32>,
    /// Casting resource; nonzero max only for support actors.
    pub charge: Vec<u32>,
    pub charge_max: Vec<u32>,
    /// Single-use guard charms held.
    pub charms: Vec<u32>,

    // ── Conditions ────────────────────────────────────────────────────────
    pub status: Vec<StatusSet>,
}

impl ActorStore {
    /// `true` if there are no actors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `ActorId`s in ascending index order.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.count as u32).map(ActorId)
    }

    #[inline]
    pub fn faction(&self, id: ActorId) -> Faction {
        self.role[id.index()].faction()
    }

    /// Alive and not escaped — the actor still acts and occupies a cell.
    #[inline]
    pub fn is_active(&self, id: ActorId) -> bool {
        self.alive[id.index()] && !self.escaped[id.index()]
    }

    /// Cells-per-turn this actor moves right now (haste adds one).
    #[inline]
    pub fn effective_speed(&self, id: ActorId) -> u32 {
        let base = self.base_speed[id.index()];
        if self.status[id.index()].hastened() { base + 1 } else { base }
    }

    /// The externally observable slice of this actor.
    pub fn public(&self, id: ActorId) -> ActorPublic {
        let i = id.index();
        ActorPublic {
            id,
            faction: self.role[i].faction(),
            pos:     self.pos[i],
            alive:   self.alive[i],
            escaped: self.escaped[i],
        }
    }

    // ── Package-private constructor used by ActorStoreBuilder ─────────────

    pub(crate) fn from_roster(roster: &[crate::ActorConfig]) -> Self {
        let count = roster.len();
        Self {
            count,
            role:         roster.iter().map(|c| c.role).collect(),
            pos:          roster.iter().map(|c| Some(c.spawn)).collect(),
            spawn:        roster.iter().map(|c| c.spawn).collect(),
            alive:        vec![true; count],
            escaped:      vec![false; count],
            vision_range: roster.iter().map(|c| c.vision_range).collect(),
            base_speed:   roster.iter().map(|c| c.speed).collect(),
            stamina:      roster.iter().map(|c| c.stamina_max).collect(),
            stamina_max:  roster.iter().map(|c| c.stamina_max).collect(),
            charge:       vec![0; count],
            charge_max:   roster.iter().map(|c| c.charge_max).collect(),
            charms:       roster.iter().map(|c| c.charms).collect(),
            status:       vec![StatusSet::default(); count],
        }
    }
}
