//! Actor intents — what an actor asks to do this turn.
//!
//! An `Intent` is produced fresh each turn by a strategy and is immutable
//! once emitted.  The resolver turns the full intent map into actions; an
//! intent is a request, not a guarantee.

use gp_core::Cell;

/// Movement-priority ladder.  Higher wins contested cells (before the
/// configured faction tie-break).
pub mod priority {
    /// Stand still (stunned, confused, channeling, or deliberate hold).
    pub const WAIT: i32 = 0;
    /// Undirected exploration / patrol movement.
    pub const EXPLORE: i32 = 20;
    /// Movement toward a known goal element.
    pub const GOAL: i32 = 30;
    /// Pursuit movement.
    pub const PURSUE: i32 = 40;
    /// Added to `PURSUE` on a lunge turn.
    pub const LUNGE_BONUS: i32 = 5;
    /// Evader flight from visible pursuers — outranks ordinary movement.
    pub const FLEE: i32 = 60;
    /// Skill casts resolve before any movement contest.
    pub const SKILL: i32 = 80;
}

/// The skills a support evader can cast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Skill {
    /// Confuse pursuers in a small blast around the target cell.
    Shockwave,
    /// Haste nearby allies (speed +1, cheaper movement) for a few turns.
    Rally,
    /// Enter the identification/broadcast trance.
    Channel,
}

impl Skill {
    /// Charge cost.  Strategies gate on this and the resolver deducts it —
    /// one table, no drift.
    pub const fn cost(self) -> u32 {
        match self {
            Skill::Shockwave => 30,
            Skill::Rally     => 20,
            Skill::Channel   => 25,
        }
    }

    /// Maximum Manhattan distance from caster to target cell.
    pub const fn cast_range(self) -> u32 {
        match self {
            Skill::Shockwave => 4,
            // Self-targeted: the target must be the caster's own cell.
            Skill::Rally | Skill::Channel => 0,
        }
    }

    /// Manhattan radius of the applied effect around the target cell.
    pub const fn effect_radius(self) -> u32 {
        match self {
            Skill::Shockwave => 1,
            Skill::Rally     => 3,
            Skill::Channel   => 0,
        }
    }

    /// Duration (turns) of the status the skill applies.
    pub const fn effect_turns(self) -> u32 {
        match self {
            Skill::Shockwave => 3, // confusion
            Skill::Rally     => 3, // haste
            Skill::Channel   => 3, // trance
        }
    }
}

/// A skill plus its aim point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SkillCast {
    pub skill:  Skill,
    /// Blast center for `Shockwave`; the caster's own cell for the rest.
    pub target: Cell,
}

/// What kind of action the intent requests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntentKind {
    Move,
    Wait,
    Skill(SkillCast),
}

/// One actor's request for the current turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Intent {
    /// Where the actor wants to end up.  For `Wait` and `Skill` this is the
    /// current cell.
    pub target:   Cell,
    pub priority: i32,
    pub kind:     IntentKind,
}

impl Intent {
    /// Hold position at `at`.
    pub fn wait(at: Cell) -> Self {
        Self { target: at, priority: priority::WAIT, kind: IntentKind::Wait }
    }

    /// Move toward `target` at the given priority.
    pub fn movement(target: Cell, priority: i32) -> Self {
        Self { target, priority, kind: IntentKind::Move }
    }

    /// Cast `cast` while standing at `at`.
    pub fn skill(at: Cell, cast: SkillCast) -> Self {
        Self { target: at, priority: priority::SKILL, kind: IntentKind::Skill(cast) }
    }
}
