//! The map collaborator. The engine only ever reads the map through
//! [MapQuery]; [TileMap] is the concrete grid that battles are fought on.

use crate::hex::{
    neighbors_matching, Cluster, OffsetPoint, OffsetPointMap, OffsetPointSet,
};
use anyhow::{anyhow, bail};
use log::debug;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum::EnumIter;

/// Ordinal height class of a hex. Anything above [Elevation::ShallowWater] is
/// dry land: it blocks movement, and it blocks sight for anyone who can't fly.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Elevation {
    DeepWater,
    ShallowWater,
    Sand,
    Lowland,
    Hill,
    Mountain,
}

impl Elevation {
    /// The highest elevation that still counts as water
    pub const SHALLOW_WATER_THRESHOLD: Self = Self::ShallowWater;

    pub fn is_water(self) -> bool {
        self <= Self::SHALLOW_WATER_THRESHOLD
    }

    /// Does a hex at this elevation end a line of sight? Flying observers
    /// ignore this.
    pub fn blocks_sight(self) -> bool {
        !self.is_water()
    }

    /// Single-character representation used in map rows
    pub fn glyph(self) -> char {
        match self {
            Self::DeepWater => '~',
            Self::ShallowWater => '-',
            Self::Sand => '.',
            Self::Lowland => ',',
            Self::Hill => 'n',
            Self::Mountain => '^',
        }
    }
}

impl Default for Elevation {
    fn default() -> Self {
        Self::DeepWater
    }
}

impl TryFrom<char> for Elevation {
    type Error = anyhow::Error;

    fn try_from(glyph: char) -> Result<Self, Self::Error> {
        match glyph {
            '~' => Ok(Self::DeepWater),
            '-' => Ok(Self::ShallowWater),
            '.' => Ok(Self::Sand),
            ',' => Ok(Self::Lowland),
            'n' => Ok(Self::Hill),
            '^' => Ok(Self::Mountain),
            _ => Err(anyhow!("unknown elevation glyph {:?}", glyph)),
        }
    }
}

/// Everything the engine needs to know about a map. Implementations decide
/// what lies outside their bounds; the engine checks [MapQuery::in_bounds]
/// before trusting anything else about a hex.
pub trait MapQuery {
    /// Height class of the hex
    fn elevation_at(&self, pos: OffsetPoint) -> Elevation;

    /// Fog density of the hex. 0 is clear air.
    fn fog_at(&self, pos: OffsetPoint) -> f64;

    fn in_bounds(&self, pos: OffsetPoint) -> bool;

    /// Can a vessel sail into this hex?
    fn is_navigable(&self, pos: OffsetPoint) -> bool {
        self.in_bounds(pos) && self.elevation_at(pos).is_water()
    }
}

/// A single hex on a [TileMap]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    position: OffsetPoint,
    elevation: Elevation,
    fog: f64,
    /// Has the primary observer ever had this hex in view?
    seen: bool,
}

impl Tile {
    fn new(position: OffsetPoint) -> Self {
        Self {
            position,
            elevation: Elevation::default(),
            fog: 0.0,
            seen: false,
        }
    }

    pub fn position(&self) -> OffsetPoint {
        self.position
    }

    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    pub fn fog(&self) -> f64 {
        self.fog
    }

    pub fn seen(&self) -> bool {
        self.seen
    }
}

/// A rectangular grid of hexes, `width` columns by `height` rows, with the
/// top-left hex at `[0, 0]`. New maps are open ocean with no fog.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: OffsetPointMap<Tile>,
}

impl TileMap {
    pub fn new(width: i32, height: i32) -> Self {
        let tiles = (0..width)
            .flat_map(|col| (0..height).map(move |row| OffsetPoint::new(col, row)))
            .map(|pos| (pos, Tile::new(pos)))
            .collect();
        Self {
            width: width.max(0),
            height: height.max(0),
            tiles,
        }
    }

    /// Build a map from rows of elevation glyphs (see [Elevation::glyph]).
    /// Rows shorter than the longest one are padded with deep water.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> anyhow::Result<Self> {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut map = Self::new(width as i32, rows.len() as i32);
        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.as_ref().chars().enumerate() {
                let pos = OffsetPoint::new(col as i32, row as i32);
                let elevation = Elevation::try_from(glyph)
                    .map_err(|err| anyhow!("{} at {}", err, pos))?;
                map.set_elevation(pos, elevation)?;
            }
        }
        debug!(
            "Parsed {}x{} map with {} land hexes",
            map.width,
            map.height,
            map.tiles.values().filter(|t| !t.elevation.is_water()).count()
        );
        Ok(map)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile(&self, pos: OffsetPoint) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    pub fn tiles(&self) -> &OffsetPointMap<Tile> {
        &self.tiles
    }

    fn tile_mut(&mut self, pos: OffsetPoint) -> anyhow::Result<&mut Tile> {
        let (width, height) = (self.width, self.height);
        self.tiles.get_mut(&pos).ok_or_else(|| {
            anyhow!("{} is outside the {}x{} map", pos, width, height)
        })
    }

    pub fn set_elevation(
        &mut self,
        pos: OffsetPoint,
        elevation: Elevation,
    ) -> anyhow::Result<()> {
        self.tile_mut(pos)?.elevation = elevation;
        Ok(())
    }

    /// Set the fog density of a hex. Density can't be negative.
    pub fn set_fog(&mut self, pos: OffsetPoint, fog: f64) -> anyhow::Result<()> {
        if fog.is_nan() || fog < 0.0 {
            bail!("invalid fog density {} at {}", fog, pos);
        }
        self.tile_mut(pos)?.fog = fog;
        Ok(())
    }

    /// Mark every in-bounds hex in the set as seen. Returns the number of hexes
    /// that had never been seen before.
    pub fn reveal(&mut self, visible: &OffsetPointSet) -> usize {
        let mut newly_seen = 0;
        for pos in visible {
            if let Some(tile) = self.tiles.get_mut(pos) {
                if !tile.seen {
                    tile.seen = true;
                    newly_seen += 1;
                }
            }
        }
        newly_seen
    }

    pub fn seen_count(&self) -> usize {
        self.tiles.values().filter(|tile| tile.seen).count()
    }

    /// Every contiguous landmass on the map
    pub fn islands(&self) -> Vec<Cluster<&Tile>> {
        Cluster::predicate(&self.tiles, |tile| !tile.elevation.is_water())
    }

    /// Every contiguous body of water on the map. Ships can't sail between
    /// two different bodies.
    pub fn waters(&self) -> Vec<Cluster<&Tile>> {
        Cluster::predicate(&self.tiles, |tile| tile.elevation.is_water())
    }

    /// Water hexes that border land
    pub fn coast(&self) -> OffsetPointSet {
        self.tiles
            .values()
            .filter(|tile| tile.elevation.is_water())
            .filter(|tile| {
                !neighbors_matching(tile.position, |adj| {
                    self.in_bounds(adj) && !self.elevation_at(adj).is_water()
                })
                .is_empty()
            })
            .map(|tile| tile.position)
            .collect()
    }
}

impl MapQuery for TileMap {
    /// Out of bounds hexes read as deep water
    fn elevation_at(&self, pos: OffsetPoint) -> Elevation {
        self.tile(pos).map(Tile::elevation).unwrap_or_default()
    }

    /// Out of bounds hexes read as clear
    fn fog_at(&self, pos: OffsetPoint) -> f64 {
        self.tile(pos).map(Tile::fog).unwrap_or(0.0)
    }

    fn in_bounds(&self, pos: OffsetPoint) -> bool {
        (0..self.width).contains(&pos.col) && (0..self.height).contains(&pos.row)
    }
}
