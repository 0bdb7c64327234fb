use anyhow::Context;
use broadside::{
    hex::disk, Battle, Direction, EngineConfig, Mobility, OffsetPoint, Seed,
    TileMap, Vessel, ViewModifiers, WeaponMount,
};
use serde::Deserialize;

/// Everything needed to set up and run a battle, as loaded from a scenario
/// file
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    /// Seed for the wind rolls
    #[serde(default)]
    pub seed: Seed,

    /// Number of turns to run, unless overridden on the command line
    #[serde(default = "default_turns")]
    pub turns: u32,

    #[serde(default)]
    pub engine: EngineConfig,

    /// Time of day, moon and weather. The fog allowance here is on top of the
    /// engine's.
    #[serde(default)]
    pub conditions: ViewModifiers,

    /// Map rows, one glyph per hex (see [broadside::Elevation])
    pub map: Vec<String>,

    /// Patches of fog laid over the map
    #[serde(default)]
    pub fog: Vec<FogBank>,

    /// Starting wind direction. Leave out for a calm.
    #[serde(default)]
    pub wind: Option<Direction>,

    /// Name of the vessel whose view uncovers the map. Defaults to the first.
    #[serde(default)]
    pub primary: Option<String>,

    #[serde(default)]
    pub vessels: Vec<VesselSpec>,
}

fn default_turns() -> u32 {
    10
}

/// A disk of uniform fog
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct FogBank {
    pub center: OffsetPoint,
    pub radius: i32,
    pub density: f64,
}

/// Starting state of a single vessel
#[derive(Clone, Debug, Deserialize)]
pub struct VesselSpec {
    pub name: String,
    pub position: OffsetPoint,
    /// Shore batteries and the like. Stationary vessels ignore every
    /// movement field.
    #[serde(default)]
    pub stationary: bool,
    #[serde(default = "default_facing")]
    pub facing: Direction,
    #[serde(default = "default_max")]
    pub max_speed: i32,
    #[serde(default = "default_max")]
    pub max_momentum: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub momentum: i32,
    #[serde(default)]
    pub rowing: bool,
    #[serde(default)]
    pub can_fly: bool,
    #[serde(default)]
    pub weapons: Vec<WeaponMount>,
}

fn default_facing() -> Direction {
    Direction::North
}

fn default_max() -> i32 {
    3
}

impl VesselSpec {
    fn build(&self) -> Vessel {
        let mut vessel = Vessel::new(self.name.clone(), self.position)
            .flying(self.can_fly)
            .with_weapons(self.weapons.clone());
        if !self.stationary {
            vessel = vessel.with_mobility(
                Mobility::new(self.facing, self.max_speed, self.max_momentum)
                    .with_state(self.speed, self.momentum),
            );
            vessel.intents_mut().rowing = self.rowing;
        }
        vessel
    }
}

impl Scenario {
    /// Set up the battle this scenario describes
    pub fn build(&self) -> anyhow::Result<Battle> {
        let mut map =
            TileMap::from_rows(self.map.as_slice()).context("invalid map")?;
        for bank in &self.fog {
            for hex in disk(bank.center.to_cube(), bank.radius) {
                let pos = hex.to_offset();
                if map.tile(pos).is_some() {
                    map.set_fog(pos, bank.density)?;
                }
            }
        }

        let vessels = self.vessels.iter().map(VesselSpec::build).collect();
        let mut battle = Battle::new(self.engine, map, self.wind, vessels)?;
        battle.set_conditions(self.conditions);
        if let Some(primary) = &self.primary {
            battle.set_primary(primary)?;
        }
        Ok(battle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKIRMISH: &str = include_str!("../scenarios/skirmish.toml");

    #[test]
    fn test_sample_scenario() {
        let scenario: Scenario = toml::from_str(SKIRMISH).unwrap();
        assert_eq!(scenario.seed, Seed::Text("skirmish".into()));
        let battle = scenario.build().unwrap();
        assert_eq!(battle.vessels().count(), 3);
        assert_eq!(battle.primary().unwrap().name(), "Swallow");
        assert!(battle.vessel("Fort Ketch").unwrap().mobility().is_none());
    }

    #[test]
    fn test_defaults() {
        let scenario: Scenario = toml::from_str(
            r#"
            map = ["~~~", "~~~"]

            [[vessels]]
            name = "Dinghy"
            position = {col = 1, row = 1}
            "#,
        )
        .unwrap();
        assert_eq!(scenario.turns, 10);
        assert_eq!(scenario.engine, EngineConfig::default());
        let battle = scenario.build().unwrap();
        let dinghy = battle.vessel("Dinghy").unwrap();
        assert_eq!(dinghy.facing(), Direction::North);
        assert_eq!(dinghy.mobility().unwrap().max_speed(), 3);
    }

    #[test]
    fn test_bad_map() {
        let scenario: Scenario =
            toml::from_str(r#"map = ["~~", "~?"]"#).unwrap();
        let err = scenario.build().unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "invalid map: unknown elevation glyph '?' at [1, 1]"
        );
    }
}
