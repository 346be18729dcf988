//! Typed status effects.
//!
//! Every timed condition an actor can carry is an explicit counter here —
//! there is no open-ended attribute bag to probe at runtime.  A counter of 0
//! means "not affected"; positive values are remaining turns.

/// The set of timed status effects on one actor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    /// Cannot act at all.  Applied by traps and by channel backlash.
    pub stun: u32,
    /// Cannot act; the pursuer-side incapacitation from a shockwave.
    pub confusion: u32,
    /// The information-sharing trance: identification, broadcast, and
    /// clairvoyant vision while active; backlash stun when it runs out.
    pub channel: u32,
    /// Speed +1 and halved movement stamina cost while active.
    pub haste: u32,
}

impl StatusSet {
    /// `true` when the actor cannot emit anything but a wait intent.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.stun > 0 || self.confusion > 0
    }

    #[inline]
    pub fn channeling(&self) -> bool {
        self.channel > 0
    }

    #[inline]
    pub fn hastened(&self) -> bool {
        self.haste > 0
    }

    /// Decrement the control timers (stun, confusion, channel) by one turn.
    ///
    /// A channel that reaches 0 by this tick applies the backlash stun —
    /// the documented cost of the trance ending.
    pub fn tick_control(&mut self, channel_backlash: u32) {
        self.stun = self.stun.saturating_sub(1);
        self.confusion = self.confusion.saturating_sub(1);
        if self.channel > 0 {
            self.channel -= 1;
            if self.channel == 0 {
                self.stun = self.stun.max(channel_backlash);
            }
        }
    }

    /// Decrement the haste timer by one turn.  Driven by the resolver's
    /// upkeep phase rather than the control tick, so buff expiry lands in
    /// the action stream where observers can see it.
    #[inline]
    pub fn tick_haste(&mut self) {
        self.haste = self.haste.saturating_sub(1);
    }
}
