mod seed;

pub use self::seed::Seed;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tunable constants for a battle. Every value has a sensible default, so a
/// partial config file only needs to list what it changes. Validated once when
/// a [Battle](crate::Battle) is created; the engine trusts it after that.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EngineConfig {
    /// Momentum added each turn by a vessel whose oars are out
    #[validate(range(min = 0, max = 10))]
    pub rowing_impulse: i32,

    /// Momentum lost each turn by a vessel that got no propulsion at all (no
    /// rowing, no wind)
    #[validate(range(min = 0, max = 10))]
    pub drag: i32,

    /// Base momentum the wind provides. Running straight downwind gets double
    /// this, a wind off either bow quarter gets it once, and a headwind takes
    /// it away.
    #[validate(range(min = 0, max = 10))]
    pub wind_propulsion: i32,

    #[validate]
    pub vision: VisionConfig,

    #[validate]
    pub wind: WindConfig,
}

/// Config for the field-of-view sweep
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VisionConfig {
    /// View radius (in hexes) of an observer before any time, lunar or
    /// weather modifiers
    #[validate(range(min = 1, max = 30))]
    pub base_radius: i32,

    /// How much fog a sight line can pass through. Fog density is summed hex
    /// by hex along each ray, and the ray ends once the total goes over this.
    #[validate(range(min = 0.0))]
    pub fog_allowance: f64,
}

/// Config for how often the wind gets a chance to change
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WindConfig {
    /// Number of turns the wind holds steady before it rolls for a change
    #[validate(range(min = 1))]
    pub max_turns_before_change_roll: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rowing_impulse: 1,
            drag: 1,
            wind_propulsion: 1,
            vision: VisionConfig::default(),
            wind: WindConfig::default(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_radius: 4,
            fog_allowance: 2.0,
        }
    }
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            max_turns_before_change_roll: 3,
        }
    }
}
