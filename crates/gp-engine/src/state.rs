//! World state: the single owner of actors and elements, and the turn
//! commit/termination state machine.
//!
//! `WorldState` mutates only inside [`apply`](WorldState::apply) — the
//! decide and resolve phases read it through shared borrows.  The terminal
//! phase is absorbing: once set, `apply` is a no-op and the reason never
//! changes.

use std::collections::BTreeMap;

use gp_actor::{ActorMemories, ActorStore};
use gp_behavior::Intent;
use gp_core::{ActorId, Cell, Faction, Role, SimConfig, StatusPolicy, Turn};
use gp_grid::Grid;

use crate::action::{Action, Resolution, StatusUpdate};
use crate::element::{ElementKind, ElementTable};
use crate::result::StepResult;
use crate::{EngineError, EngineResult};

/// Stun applied when a channel trance runs out.
pub const CHANNEL_BACKLASH_TURNS: u32 = 4;
/// Per-turn charge regeneration for support actors.
pub const CHARGE_REGEN_PER_TURN: u32 = 4;

// ── Termination ───────────────────────────────────────────────────────────────

/// Why a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every evader escaped.
    PerfectEscape,
    /// Some escaped; the rest died (or the board emptied otherwise).
    PartialEscape { escaped: u32, dead: u32 },
    /// No evader escaped.
    TotalAnnihilation,
    /// The configured turn limit was reached first.
    MaxTurnsReached,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::PerfectEscape       => "perfect_escape",
            TerminationReason::PartialEscape { .. } => "partial_escape_and_death",
            TerminationReason::TotalAnnihilation   => "total_annihilation",
            TerminationReason::MaxTurnsReached     => "max_turns_reached",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The run state machine: `Terminal` is absorbing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminal(TerminationReason),
}

// ── WorldState ────────────────────────────────────────────────────────────────

/// All simulation state for one run.
pub struct WorldState {
    pub config:   SimConfig,
    pub grid:     Grid,
    pub actors:   ActorStore,
    pub elements: ElementTable,
    pub turn:     Turn,
    pub phase:    Phase,
    pub exit_open: bool,
    pub exit_pos:  Cell,
}

impl WorldState {
    pub(crate) fn new(
        config:   SimConfig,
        grid:     Grid,
        actors:   ActorStore,
        elements: ElementTable,
        exit_pos: Cell,
    ) -> Self {
        Self {
            config,
            grid,
            actors,
            elements,
            turn: Turn::ZERO,
            phase: Phase::Running,
            exit_open: false,
            exit_pos,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    pub fn reason(&self) -> Option<TerminationReason> {
        match self.phase {
            Phase::Terminal(r) => Some(r),
            Phase::Running     => None,
        }
    }

    // ── Commit ────────────────────────────────────────────────────────────

    /// Commit one turn's resolution: positions and status updates, element
    /// consumption, status-timer ticks, turn advance, escapes, termination.
    ///
    /// A no-op once the run is terminal.  The whole turn commits or — if a
    /// caller aborts before calling this — nothing does; there is no
    /// partial application path.
    pub fn apply(&mut self, resolution: &Resolution) -> EngineResult<()> {
        if self.is_terminal() {
            return Ok(());
        }

        // ── Positions, updates, consumption (ascending actor id) ──────────
        for (&id, action) in &resolution.actions {
            let i = id.index();
            if let Some(cell) = action.target {
                if self.actors.alive[i] && !self.actors.escaped[i] {
                    self.actors.pos[i] = Some(cell);
                }
            }
            for &update in &action.updates {
                self.apply_update(id, update)?;
            }
            if let Some(eid) = action.pickup {
                if let Some(element) = self.elements.remove(eid) {
                    if let ElementKind::Key { real: true } = element.kind {
                        self.exit_open = true;
                    }
                }
            }
        }

        // ── Status timers and regeneration ────────────────────────────────
        for i in 0..self.actors.count {
            if !self.actors.alive[i] || self.actors.escaped[i] {
                continue;
            }
            self.actors.status[i].tick_control(CHANNEL_BACKLASH_TURNS);
            if self.actors.role[i] == Role::Support {
                let max = self.actors.charge_max[i];
                self.actors.charge[i] = (self.actors.charge[i] + CHARGE_REGEN_PER_TURN).min(max);
            }
        }

        self.turn = self.turn + 1;

        // ── Escapes ───────────────────────────────────────────────────────
        if self.exit_open {
            for i in 0..self.actors.count {
                let id = ActorId(i as u32);
                if self.actors.faction(id) == Faction::Evader
                    && self.actors.is_active(id)
                    && self.actors.pos[i] == Some(self.exit_pos)
                {
                    self.actors.escaped[i] = true;
                    self.actors.pos[i] = None;
                }
            }
        }

        self.check_termination();
        Ok(())
    }

    /// Apply one typed update to one actor, honoring the configured policy
    /// for updates that do not fit the target's kind.
    fn apply_update(&mut self, id: ActorId, update: StatusUpdate) -> EngineResult<()> {
        let i = id.index();
        let faction = self.actors.faction(id);
        let role = self.actors.role[i];

        let applicable = match update {
            StatusUpdate::Dead => {
                self.actors.alive[i] = false;
                self.actors.pos[i] = None;
                true
            }
            StatusUpdate::ConsumeCharm if faction == Faction::Evader => {
                self.actors.charms[i] = self.actors.charms[i].saturating_sub(1);
                true
            }
            StatusUpdate::GrantCharm if faction == Faction::Evader => {
                self.actors.charms[i] += 1;
                true
            }
            StatusUpdate::Stun(turns) => {
                self.actors.status[i].stun = self.actors.status[i].stun.max(turns);
                true
            }
            StatusUpdate::Confuse(turns) if faction == Faction::Pursuer => {
                self.actors.status[i].confusion = self.actors.status[i].confusion.max(turns);
                true
            }
            StatusUpdate::Haste(turns) if faction == Faction::Evader => {
                self.actors.status[i].haste = self.actors.status[i].haste.max(turns);
                true
            }
            StatusUpdate::HasteTick => {
                self.actors.status[i].tick_haste();
                true
            }
            StatusUpdate::Channel(turns) if role == Role::Support => {
                self.actors.status[i].channel = self.actors.status[i].channel.max(turns);
                true
            }
            StatusUpdate::SpendCharge(amount) if role == Role::Support => {
                self.actors.charge[i] = self.actors.charge[i].saturating_sub(amount);
                true
            }
            StatusUpdate::SpendStamina(amount) => {
                self.actors.stamina[i] = self.actors.stamina[i].saturating_sub(amount);
                true
            }
            StatusUpdate::RestoreStamina(amount) => {
                let max = self.actors.stamina_max[i];
                self.actors.stamina[i] = (self.actors.stamina[i] + amount).min(max);
                true
            }
            _ => false,
        };

        if !applicable && self.config.status_policy == StatusPolicy::Reject {
            return Err(EngineError::InvalidStatusUpdate { id, update });
        }
        Ok(())
    }

    /// Exhaustive, priority-ordered termination rules.
    fn check_termination(&mut self) {
        let mut total = 0u32;
        let mut escaped = 0u32;
        let mut dead = 0u32;
        let mut active = 0u32;

        for id in self.actors.actor_ids() {
            if self.actors.faction(id) != Faction::Evader {
                continue;
            }
            total += 1;
            let i = id.index();
            if self.actors.escaped[i] {
                escaped += 1;
            } else if !self.actors.alive[i] {
                dead += 1;
            } else {
                active += 1;
            }
        }

        if total > 0 && active == 0 {
            let reason = if escaped == total {
                TerminationReason::PerfectEscape
            } else if escaped > 0 {
                TerminationReason::PartialEscape { escaped, dead }
            } else {
                TerminationReason::TotalAnnihilation
            };
            self.phase = Phase::Terminal(reason);
        } else if self.turn.0 >= self.config.max_turns {
            self.phase = Phase::Terminal(TerminationReason::MaxTurnsReached);
        }
    }

    // ── Export ────────────────────────────────────────────────────────────

    /// Package the turn's inputs and outputs as plain data for external
    /// consumers (evaluator, visualizer, logger).
    pub fn export_step_result(
        &self,
        intents: BTreeMap<ActorId, Intent>,
        actions: BTreeMap<ActorId, Action>,
    ) -> StepResult {
        StepResult {
            turn:     self.turn,
            terminal: self.is_terminal(),
            reason:   self.reason(),
            intents,
            actions,
            snapshot: self.actors.actor_ids().map(|id| self.actors.public(id)).collect(),
        }
    }

    /// Forget consumed elements in every memory so nobody paths to a cell
    /// whose element is gone.  Called by the mediator's post-turn hook.
    pub(crate) fn purge_consumed(memories: &mut ActorMemories, resolution: &Resolution) {
        for action in resolution.actions.values() {
            if let Some(eid) = action.pickup {
                for memory in &mut memories.inner {
                    memory.forget_element(eid);
                }
            }
        }
    }
}
