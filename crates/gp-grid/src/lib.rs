//! `gp-grid` — wall bitmap, pathfinding, and line-of-sight.
//!
//! # Crate layout
//!
//! | Module   | Contents                                                   |
//! |----------|------------------------------------------------------------|
//! | [`grid`] | `Grid` (bitmap + walkable cache), `GridBuilder`            |
//! | [`path`] | `Pathfinder` — A*, `next_step`, `has_line_of_sight`        |
//! | [`error`]| `GridError`, `GridResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod error;
pub mod grid;
pub mod path;


pub use error::{GridError, GridResult};
pub use grid::{Grid, GridBuilder};
pub use path::Pathfinder;
