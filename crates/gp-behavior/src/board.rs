//! The pursuer coordination board.
//!
//! Pursuers coordinate through this turn-scoped registry instead of any
//! shared static state: the engine rebuilds it from scratch every turn from
//! pursuer memories, passes it into each pursuer's decide call, and drops it
//! at turn end.  Nothing on it survives a turn, so there is no cross-turn or
//! cross-run leakage to reason about.
//!
//! Tracks live in a `BTreeMap` keyed by evader id — iteration order (and
//! therefore claim tie-breaking) is deterministic by construction.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use gp_actor::TrackEstimate;
use gp_core::{ActorId, Cell};

/// One evader's merged track plus its claim marker.
#[derive(Copy, Clone, Debug)]
pub struct EvaderTrack {
    pub estimate:   TrackEstimate,
    pub claimed_by: Option<ActorId>,
}

/// Turn-scoped shared state for the pursuer faction.
pub struct CoordinationBoard {
    /// The exit cell — the evaders' presumed long-term goal, used for
    /// choke-point placement.
    pub exit_pos: Cell,
    tracks:   BTreeMap<ActorId, EvaderTrack>,
    reserved: FxHashSet<Cell>,
}

impl CoordinationBoard {
    /// Fresh empty board for one turn.
    pub fn new(exit_pos: Cell) -> Self {
        Self {
            exit_pos,
            tracks:   BTreeMap::new(),
            reserved: FxHashSet::default(),
        }
    }

    // ── Tracks ────────────────────────────────────────────────────────────

    /// Register (or overwrite with a fresher) track for `evader`.
    ///
    /// The engine merges per-pursuer memories here; only the freshest
    /// observation per evader survives.
    pub fn insert_track(&mut self, evader: ActorId, estimate: TrackEstimate) {
        match self.tracks.get_mut(&evader) {
            Some(existing) if existing.estimate.turn >= estimate.turn => {}
            Some(existing) => existing.estimate = estimate,
            None => {
                self.tracks.insert(evader, EvaderTrack { estimate, claimed_by: None });
            }
        }
    }

    pub fn track(&self, evader: ActorId) -> Option<&EvaderTrack> {
        self.tracks.get(&evader)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Claim the unclaimed evader nearest to `from` for `pursuer`.
    ///
    /// Nearest by Manhattan distance from the track's last cell; equal
    /// distances break toward the lower evader id (ascending map order).
    /// Returns the claimed evader and its estimate, or `None` when every
    /// track is already claimed (or none exist).
    pub fn claim_nearest(&mut self, pursuer: ActorId, from: Cell) -> Option<(ActorId, TrackEstimate)> {
        let mut best: Option<(u32, ActorId)> = None;
        for (&evader, track) in &self.tracks {
            if track.claimed_by.is_some() {
                continue;
            }
            let dist = from.manhattan(track.estimate.pos);
            // Strict less-than keeps the lowest id among equal distances.
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, evader));
            }
        }
        let (_, evader) = best?;
        let track = self.tracks.get_mut(&evader)?;
        track.claimed_by = Some(pursuer);
        Some((evader, track.estimate))
    }

    // ── Step reservations ─────────────────────────────────────────────────

    /// Reserve `cell` as a pursuer's next step.  Returns `false` if another
    /// pursuer already reserved it this turn.
    pub fn reserve(&mut self, cell: Cell) -> bool {
        self.reserved.insert(cell)
    }

    #[inline]
    pub fn is_reserved(&self, cell: Cell) -> bool {
        self.reserved.contains(&cell)
    }
}
