//! Firing arcs. Bow and stern guns fire straight along the keel, broadside
//! guns cover a 60° sector off either beam.

use crate::hex::{CubeVector, Direction, OffsetPoint, OffsetPointSet};
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Hexes straight out from `origin` along `facing`, nearest first. The origin
/// itself is never included. Empty for a non-positive range.
pub fn targeting_axis(
    origin: OffsetPoint,
    facing: Direction,
    range: i32,
) -> Vec<OffsetPoint> {
    let origin = origin.to_cube();
    let step = facing.to_vector();
    (1..=range)
        .map(|distance| (origin + step * distance).to_offset())
        .collect()
}

/// The broadside sector of the given radius for a vessel facing north: every
/// hex in the wedge between the north-west and south-west directions, both
/// edges included. That's the port side; other facings rotate this.
fn port_sector_template(range: i32) -> Vec<CubeVector> {
    let forward_edge = Direction::North.rotate(1).to_vector();
    let aft_edge = Direction::North.rotate(2).to_vector();
    (1..=range)
        .flat_map(|radius| {
            (0..=radius).map(move |k| {
                forward_edge * (radius - k) + aft_edge * k
            })
        })
        .collect()
}

/// The 60° broadside sector off the port beam of a vessel with the given
/// facing, out to `range` hexes. For the starboard broadside, ask for the
/// port side of the opposite facing. Empty for a non-positive range.
pub fn targeting_cone(
    origin: OffsetPoint,
    facing: Direction,
    range: i32,
) -> Vec<OffsetPoint> {
    let origin = origin.to_cube();
    port_sector_template(range)
        .into_iter()
        .map(|offset| (origin + offset.rotate(facing.index())).to_offset())
        .collect()
}

/// Where on the hull a weapon is mounted, which determines its arc
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountSide {
    Bow,
    Stern,
    Port,
    Starboard,
}

/// A single weapon. After firing it needs `reload` turns before it's ready
/// again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponMount {
    pub side: MountSide,
    pub range: i32,
    pub reload: u32,
    #[serde(default)]
    cooldown: u32,
}

impl WeaponMount {
    pub fn new(side: MountSide, range: i32, reload: u32) -> Self {
        Self {
            side,
            range,
            reload,
            cooldown: 0,
        }
    }

    /// Turns left until this weapon can fire
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }

    /// Fire the weapon, starting its reload. Fails if it's still reloading.
    pub fn fire(&mut self) -> anyhow::Result<()> {
        if !self.is_ready() {
            bail!(
                "{:?} weapon is still reloading ({} turns left)",
                self.side,
                self.cooldown
            );
        }
        self.cooldown = self.reload;
        Ok(())
    }

    /// Advance the reload by one turn
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Hexes this weapon covers from the given position and facing,
    /// regardless of whether it's loaded
    pub fn arc(&self, origin: OffsetPoint, facing: Direction) -> Vec<OffsetPoint> {
        match self.side {
            MountSide::Bow => targeting_axis(origin, facing, self.range),
            MountSide::Stern => {
                targeting_axis(origin, facing.opposite(), self.range)
            }
            MountSide::Port => targeting_cone(origin, facing, self.range),
            MountSide::Starboard => {
                targeting_cone(origin, facing.opposite(), self.range)
            }
        }
    }
}

/// Every hex that a multi-weapon attack can reach right now. Only weapons that
/// are loaded contribute.
pub fn attack_hexes(
    origin: OffsetPoint,
    facing: Direction,
    mounts: &[WeaponMount],
) -> OffsetPointSet {
    mounts
        .iter()
        .filter(|mount| mount.is_ready())
        .flat_map(|mount| mount.arc(origin, facing))
        .collect()
}
