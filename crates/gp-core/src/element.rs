//! Public map-element vocabulary.
//!
//! `ElementClass` is what an actor can *see*: it deliberately carries no
//! authenticity information.  Whether a key is real or a decoy lives only in
//! the world's element table and in memories that learned it through the
//! identification channel — a sighting never leaks it.

/// Consumable pickups that grant an immediate effect on claim.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupKind {
    /// Restores stamina.
    Medkit,
    /// Grants a single-use guard charm that absorbs one interception.
    Charm,
}

/// The publicly observable class of a map element.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementClass {
    /// A key — real or decoy, indistinguishable on sight.
    Key,
    /// The exit tile.  Never consumed.
    Exit,
    /// A trap that stuns whoever steps on it.
    Trap,
    /// A consumable pickup.
    Pickup(PickupKind),
}

impl ElementClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementClass::Key                        => "key",
            ElementClass::Exit                       => "exit",
            ElementClass::Trap                       => "trap",
            ElementClass::Pickup(PickupKind::Medkit) => "medkit",
            ElementClass::Pickup(PickupKind::Charm)  => "charm",
        }
    }
}

impl std::fmt::Display for ElementClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
