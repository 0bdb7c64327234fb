//! The momentum/speed state machine. Every mobile vessel has two coupled
//! counters: momentum accumulates each turn, and when it runs past either end
//! of its range it carries into a one-step change of speed.

use crate::{config::EngineConfig, hex::Direction};
use log::trace;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What's pushing on a vessel's momentum
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MomentumCause {
    Rowing,
    Wind,
    Drag,
}

/// How the wind sits relative to a vessel's facing, which decides what it
/// does to momentum
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WindAlignment {
    /// Blowing the same way the vessel faces
    Aligned,
    /// One step off the facing, either side
    Adjacent,
    /// Blowing straight into the bow
    Opposed,
    /// Two steps off in either direction. No effect.
    Crosswind,
}

impl WindAlignment {
    /// `wind` is the direction the wind blows towards
    pub fn between(wind: Direction, facing: Direction) -> Self {
        match facing.steps_to(wind) {
            0 => Self::Aligned,
            1 | 5 => Self::Adjacent,
            3 => Self::Opposed,
            _ => Self::Crosswind,
        }
    }

    /// Signed momentum this alignment adds, for a base propulsion value
    pub fn impulse(self, propulsion: i32) -> i32 {
        match self {
            Self::Aligned => 2 * propulsion,
            Self::Adjacent => propulsion,
            Self::Opposed => -propulsion,
            Self::Crosswind => 0,
        }
    }
}

/// Resolve a momentum total that may have run outside `[0, max_momentum]`.
/// Returns the change in speed (-1, 0 or +1) and the momentum left over.
///
/// Overflow carries exactly: going one past the max is a speed step with
/// nothing left over, so the remainder is `total - max - 1`. Underflow is the
/// mirror image, `total + max + 1`.
pub fn carry(total: i32, max_momentum: i32) -> (i32, i32) {
    if total > max_momentum {
        (1, total - max_momentum - 1)
    } else if total < 0 {
        (-1, total + max_momentum + 1)
    } else {
        (0, total)
    }
}

/// Movement state of a single vessel. Speed is in hexes per turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mobility {
    facing: Direction,
    speed: i32,
    max_speed: i32,
    momentum: i32,
    max_momentum: i32,
    /// Did the wind do anything for us this turn?
    #[serde(default)]
    catching_wind: bool,
}

impl Mobility {
    /// A stationary vessel. Negative maximums are treated as 0.
    pub fn new(facing: Direction, max_speed: i32, max_momentum: i32) -> Self {
        Self {
            facing,
            speed: 0,
            max_speed: max_speed.max(0),
            momentum: 0,
            max_momentum: max_momentum.max(0),
            catching_wind: false,
        }
    }

    /// Set the current speed and momentum, clamped into their ranges
    pub fn with_state(mut self, speed: i32, momentum: i32) -> Self {
        self.speed = speed.clamp(0, self.max_speed);
        self.momentum = momentum.clamp(0, self.max_momentum);
        self
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn max_speed(&self) -> i32 {
        self.max_speed
    }

    pub fn momentum(&self) -> i32 {
        self.momentum
    }

    pub fn max_momentum(&self) -> i32 {
        self.max_momentum
    }

    pub fn catching_wind(&self) -> bool {
        self.catching_wind
    }

    /// Turn by some number of steps. Positive is to port.
    pub fn rotate(&mut self, steps: i32) {
        self.facing = self.facing.rotate(steps);
    }

    /// Add momentum. The sign of `amount` is ignored.
    ///
    /// If the total goes over the max, it carries into a speed increase, but
    /// only when the vessel is dead in the water or the push comes from the
    /// wind. Anything else just saturates: oars alone can't push a moving
    /// hull past its momentum cap. A vessel already at max speed also
    /// saturates.
    pub fn increase(&mut self, amount: i32, cause: MomentumCause) {
        let total = self.momentum.saturating_add(amount.saturating_abs());
        if total <= self.max_momentum {
            self.momentum = total;
            return;
        }

        let can_carry = cause == MomentumCause::Wind || self.speed == 0;
        if can_carry && self.speed < self.max_speed {
            self.settle(total);
        } else {
            self.momentum = self.max_momentum;
        }
    }

    /// Take momentum away. The sign of `amount` is ignored.
    ///
    /// A moving vessel that runs out of momentum drops a speed step and the
    /// deficit wraps around from the top of the momentum range. A stopped
    /// vessel has nowhere to go, so its momentum just floors at 0.
    pub fn decrease(&mut self, amount: i32, cause: MomentumCause) {
        let total = self.momentum.saturating_sub(amount.saturating_abs());
        if total >= 0 {
            self.momentum = total;
        } else if self.speed == 0 {
            trace!("{} can't slow a stopped vessel", cause);
            self.momentum = 0;
        } else {
            self.settle(total);
        }
    }

    /// Apply the carry rule to an out-of-range total, then clamp so nothing
    /// out of range ever escapes. A push bigger than the whole momentum range
    /// still only moves speed one step.
    fn settle(&mut self, total: i32) {
        let (speed_delta, momentum) = carry(total, self.max_momentum);
        self.speed = (self.speed + speed_delta).clamp(0, self.max_speed);
        self.momentum = momentum.clamp(0, self.max_momentum);
    }

    /// Apply wind from the given direction. Calm air does nothing. Returns
    /// whether the wind had any effect, which is also stored as the
    /// catching-wind flag.
    pub fn apply_wind(
        &mut self,
        wind: Option<Direction>,
        propulsion: i32,
    ) -> bool {
        let alignment = match wind {
            Some(wind) => WindAlignment::between(wind, self.facing),
            None => {
                self.catching_wind = false;
                return false;
            }
        };

        let impulse = alignment.impulse(propulsion);
        if impulse > 0 {
            self.increase(impulse, MomentumCause::Wind);
        } else if impulse < 0 {
            self.decrease(impulse, MomentumCause::Wind);
        }
        self.catching_wind = alignment != WindAlignment::Crosswind;
        self.catching_wind
    }

    /// Run the per-turn propulsion sequence: rowing, then wind, then drag.
    /// Drag only applies if neither of the others contributed.
    pub fn apply_impulses(
        &mut self,
        rowing: bool,
        wind: Option<Direction>,
        config: &EngineConfig,
    ) {
        if rowing {
            self.increase(config.rowing_impulse, MomentumCause::Rowing);
            trace!("After rowing: {:?}", self);
        }

        let caught_wind = self.apply_wind(wind, config.wind_propulsion);
        trace!("After wind {:?}: {:?}", wind, self);

        if !rowing && !caught_wind {
            self.decrease(config.drag, MomentumCause::Drag);
            trace!("After drag: {:?}", self);
        }
    }

    /// Kill all speed and momentum, e.g. after running aground
    pub fn stop(&mut self) {
        self.speed = 0;
        self.momentum = 0;
    }
}
