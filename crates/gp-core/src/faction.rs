//! Faction and role vocabulary shared across all crates.
//!
//! Roles replace a class hierarchy: each actor carries one `Role` tag and the
//! behavior crate dispatches on it through a tagged enum.  The faction is
//! derived from the role, never stored separately, so the two can't disagree.

/// Which side an actor is on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    /// Tries to open the exit and escape.
    Evader,
    /// Tries to intercept evaders.
    Pursuer,
}

impl Faction {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Evader  => "evader",
            Faction::Pursuer => "pursuer",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-actor behavioral role.
///
/// Evader roles: `Scout` (default goal-seeking evader) and `Support`
/// (resource-casting ally).  Pursuer roles: `Chaser` (direct pursuit),
/// `Blocker` (choke-point denial), `Ambusher` (path-ahead interception).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Scout,
    Support,
    Chaser,
    Blocker,
    Ambusher,
}

impl Role {
    /// The faction this role belongs to.
    #[inline]
    pub fn faction(self) -> Faction {
        match self {
            Role::Scout | Role::Support => Faction::Evader,
            Role::Chaser | Role::Blocker | Role::Ambusher => Faction::Pursuer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Scout    => "scout",
            Role::Support  => "support",
            Role::Chaser   => "chaser",
            Role::Blocker  => "blocker",
            Role::Ambusher => "ambusher",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
