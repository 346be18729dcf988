//! Top-level simulation configuration.
//!
//! Plain data, typically produced by an external generator or loaded from a
//! config file by the application crate.  Validation happens once, before
//! turn 0; a bad configuration is fatal, never silently patched.

use crate::{CoreError, CoreResult};

/// Which faction wins a movement-priority tie during collision arbitration.
///
/// Observed ancestors of this design disagreed on the direction; it is an
/// explicit configuration knob here rather than an implicit rule.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactionPrecedence {
    /// Pursuers claim contested cells first (default).
    #[default]
    PursuerFirst,
    /// Evaders claim contested cells first.
    EvaderFirst,
}

/// What to do with a status update that does not apply to the target actor
/// (e.g. a charge grant aimed at a non-support actor).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusPolicy {
    /// Drop the update silently (default).
    #[default]
    Ignore,
    /// Treat it as a fatal consistency error.
    Reject,
}

/// World-level scalar parameters.
///
/// Behavioral tuning (flee weights, cast thresholds, …) lives with the
/// strategies in `gp-behavior`; this struct only holds what the engine itself
/// reads.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Hard turn limit; the run terminates with `MaxTurnsReached` at this
    /// turn if nothing else ended it first.
    pub max_turns: u32,

    /// Stamina below this halves an actor's effective vision range.
    pub low_stamina_threshold: u32,

    /// A pursuer track older than this many turns no longer counts as
    /// "recently seen" and cannot be claimed.
    pub track_expiry_turns: u32,

    /// Movement-priority tie-break between factions.
    pub precedence: FactionPrecedence,

    /// Handling of inapplicable status updates.
    pub status_policy: StatusPolicy,
}

impl SimConfig {
    /// Check the scalar invariants the engine relies on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_turns == 0 {
            return Err(CoreError::Config("max_turns must be positive".into()));
        }
        if self.track_expiry_turns == 0 {
            return Err(CoreError::Config("track_expiry_turns must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_turns: 200,
            low_stamina_threshold: 10,
            track_expiry_turns: 5,
            precedence: FactionPrecedence::default(),
            status_policy: StatusPolicy::default(),
        }
    }
}
