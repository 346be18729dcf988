//! `gp-behavior` — the agent decision protocol.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`intent`]  | `Intent`, `IntentKind`, `Skill`, the priority ladder        |
//! | [`view`]    | `LocalView<'a>`, `ElementSighting`                          |
//! | [`board`]   | `CoordinationBoard` — turn-scoped pursuer registry          |
//! | [`model`]   | `Strategy` trait, `Brain` dispatcher                        |
//! | [`evader`]  | `ScoutStrategy` — flee / goal / explore                     |
//! | [`support`] | `SupportStrategy` — casts, channel, retreat scoring         |
//! | [`pursuer`] | `PursuerStrategy` — chaser / blocker / ambusher             |
//!
//! # Design notes
//!
//! Decisions are pure functions of `(view, own memory, board, own rng)`.
//! The engine builds every view from one frozen snapshot before the first
//! `decide` call, so the decide phase cannot observe a half-resolved turn.
//! The coordination board is the single sanctioned exception: it is shared
//! mutable state *within* the pursuer faction, rebuilt from scratch each
//! turn, and threaded explicitly through every call — never static.

pub mod board;
pub mod evader;
pub mod intent;
pub mod model;
pub mod pursuer;
pub mod support;
pub mod view;


pub use board::{CoordinationBoard, EvaderTrack};
pub use evader::{ScoutStrategy, ScoutTuning};
pub use intent::{priority, Intent, IntentKind, Skill, SkillCast};
pub use model::{Brain, Strategy};
pub use pursuer::{PursuerStrategy, PursuerTuning};
pub use support::{SupportStrategy, SupportTuning};
pub use view::{ElementSighting, LocalView};
