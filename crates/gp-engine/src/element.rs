//! World-owned map elements.
//!
//! `ElementKind` is the ground truth — it knows whether a key is real.  The
//! public projection [`ElementClass`] handed to views deliberately does not;
//! authenticity leaves this table only through the identification hook.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use gp_core::{Cell, ElementClass, ElementId, PickupKind};

/// The true nature of a map element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A key.  Consuming a real one opens the exit; a decoy is spent for
    /// nothing.
    Key { real: bool },
    /// The exit tile.  Never consumed.
    Exit,
    /// Stuns whoever steps on it, then is spent.
    Trap,
    /// A consumable pickup.
    Pickup(PickupKind),
}

impl ElementKind {
    /// The authenticity-free class actors are allowed to see.
    pub fn class(self) -> ElementClass {
        match self {
            ElementKind::Key { .. }  => ElementClass::Key,
            ElementKind::Exit        => ElementClass::Exit,
            ElementKind::Trap        => ElementClass::Trap,
            ElementKind::Pickup(p)   => ElementClass::Pickup(p),
        }
    }

    /// `true` for elements removed from the world when claimed.
    pub fn consumable(self) -> bool {
        !matches!(self, ElementKind::Exit)
    }
}

/// One element on the board.
#[derive(Copy, Clone, Debug)]
pub struct MapElement {
    pub id:   ElementId,
    pub pos:  Cell,
    pub kind: ElementKind,
    /// Set once any actor has had it in view.
    pub discovered: bool,
    /// Set once a channeling support has identified it.
    pub identified: bool,
}

/// The world's element table, keyed by id with a cell index for pickup
/// lookups.  Iteration is ascending-id, so every scan over elements is
/// deterministic.
#[derive(Default)]
pub struct ElementTable {
    elements: BTreeMap<ElementId, MapElement>,
    by_cell:  FxHashMap<Cell, ElementId>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element at `pos`; ids are assigned in insertion order.
    /// The builder guarantees one element per cell.
    pub fn insert(&mut self, pos: Cell, kind: ElementKind) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.insert(id, MapElement {
            id,
            pos,
            kind,
            discovered: false,
            identified: false,
        });
        self.by_cell.insert(pos, id);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&MapElement> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut MapElement> {
        self.elements.get_mut(&id)
    }

    /// The element standing on `cell`, if any.
    pub fn at_cell(&self, cell: Cell) -> Option<&MapElement> {
        self.by_cell.get(&cell).and_then(|id| self.elements.get(id))
    }

    /// Remove a consumed element.  Returns it for effect processing.
    pub fn remove(&mut self, id: ElementId) -> Option<MapElement> {
        let element = self.elements.remove(&id)?;
        self.by_cell.remove(&element.pos);
        Some(element)
    }

    /// Ascending-id iteration.
    pub fn iter(&self) -> impl Iterator<Item = &MapElement> + '_ {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
