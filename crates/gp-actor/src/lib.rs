//! `gp-actor` — Structure-of-Arrays actor storage for gridpursuit.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`status`] | `StatusSet` — typed timed conditions                         |
//! | [`store`]  | `ActorStore` (SoA arrays), `ActorRngs` (per-actor RNG)       |
//! | [`memory`] | `ActorMemory`, `ActorMemories`, `TrackEstimate`              |
//! | [`builder`]| `ActorConfig`, `ActorStoreBuilder`                           |
//!
//! The three collections returned by the builder (`ActorStore`,
//! `ActorRngs`, `ActorMemories`) are parallel, indexed by `ActorId`.  They
//! are separate structs so the engine can hold `&ActorStore` while handing
//! a strategy `&mut` its own RNG and memory.

pub mod builder;
pub mod memory;
pub mod status;
pub mod store;


pub use builder::{ActorConfig, ActorStoreBuilder};
pub use memory::{ActorMemories, ActorMemory, KnownElement, Sighting, TrackEstimate};
pub use status::StatusSet;
pub use gp_core::ActorRng;
pub use store::{ActorRngs, ActorStore};
