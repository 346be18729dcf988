//! `gp-core` — foundational types for the gridpursuit simulation.
//!
//! This crate is a dependency of every other `gp-*` crate.  It intentionally
//! has no `gp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`ids`]      | `ActorId`, `ElementId`                            |
//! | [`cell`]     | `Cell`, Manhattan/Chebyshev metrics               |
//! | [`turn`]     | `Turn` counter                                    |
//! | [`faction`]  | `Faction`, `Role`                                 |
//! | [`element`]  | `ElementClass`, `PickupKind` (public vocabulary)  |
//! | [`snapshot`] | `ActorPublic` — cross-actor visibility currency   |
//! | [`config`]   | `SimConfig`, `FactionPrecedence`, `StatusPolicy`  |
//! | [`rng`]      | `ActorRng` (per-actor deterministic RNG)          |
//! | [`error`]    | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod cell;
pub mod config;
pub mod element;
pub mod error;
pub mod faction;
pub mod ids;
pub mod rng;
pub mod snapshot;
pub mod turn;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{FactionPrecedence, SimConfig, StatusPolicy};
pub use element::{ElementClass, PickupKind};
pub use error::{CoreError, CoreResult};
pub use faction::{Faction, Role};
pub use ids::{ActorId, ElementId};
pub use rng::ActorRng;
pub use snapshot::ActorPublic;
pub use turn::Turn;
