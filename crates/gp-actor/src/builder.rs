//! Roster configuration and fluent store construction.

use gp_core::{Cell, Role};

use crate::{ActorMemories, ActorRngs, ActorStore};

/// Per-actor configuration handed in by the external generator.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorConfig {
    pub role:         Role,
    pub spawn:        Cell,
    pub vision_range: u32,
    pub speed:        u32,
    pub stamina_max:  u32,
    /// Casting pool ceiling; meaningful only for `Role::Support`.
    pub charge_max:   u32,
    /// Guard charms carried at spawn.
    pub charms:       u32,
}

impl ActorConfig {
    /// Role-typical defaults; tweak fields afterwards as needed.
    pub fn new(role: Role, spawn: Cell) -> Self {
        let (vision_range, charge_max) = match role {
            Role::Scout    => (6, 0),
            Role::Support  => (6, 50),
            Role::Chaser | Role::Blocker | Role::Ambusher => (8, 0),
        };
        Self {
            role,
            spawn,
            vision_range,
            speed: 1,
            stamina_max: 100,
            charge_max,
            charms: 0,
        }
    }

    pub fn with_charms(mut self, charms: u32) -> Self {
        self.charms = charms;
        self
    }

    pub fn with_vision(mut self, range: u32) -> Self {
        self.vision_range = range;
        self
    }
}

/// Fluent builder for `ActorStore` + `ActorRngs` + `ActorMemories`.
///
/// # Example
///
/// ```
/// use gp_actor::{ActorConfig, ActorStoreBuilder};
/// use gp_core::{Cell, Role};
///
/// let (store, rngs, memories) = ActorStoreBuilder::new(42)
///     .actor(ActorConfig::new(Role::Scout, Cell::new(0, 0)))
///     .actor(ActorConfig::new(Role::Chaser, Cell::new(4, 4)))
///     .build();
/// assert_eq!(store.count, 2);
/// assert_eq!(rngs.len(), 2);
/// assert_eq!(memories.len(), 2);
/// ```
pub struct ActorStoreBuilder {
    seed:   u64,
    roster: Vec<ActorConfig>,
}

impl ActorStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, roster: Vec::new() }
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

    /// Construct the three parallel collections.
    ///
    /// Spatial validation (spawns in bounds, walkable, distinct) is the
    /// engine builder's job — it has the grid.
    pub fn build(self) -> (ActorStore, ActorRngs, ActorMemories) {
        let count = self.roster.len();
        let store = ActorStore::from_roster(&self.roster);
        let rngs = ActorRngs::new(count, self.seed);
        let memories = ActorMemories::new(count);
        (store, rngs, memories)
    }
}
