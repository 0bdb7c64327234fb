//! Broadside is the tactical engine for a turn-based naval combat game played
//! on a hex grid. This crate contains the geometry (coordinates, lines, field
//! of view, firing arcs), the classifier that tells a steering policy where
//! other vessels are, and the momentum/speed state machine that moves ships
//! around. Rendering, input and AI policy live elsewhere.
//!
//! ```
//! use broadside::{Battle, Direction, EngineConfig, Mobility, OffsetPoint, TileMap, Vessel};
//! use rand::SeedableRng;
//!
//! let map = TileMap::from_rows(&["~~~~~~", "~~~.~~", "~~~~~~", "~~~~~~"]).unwrap();
//! let sloop = Vessel::new("Sloop", OffsetPoint::new(1, 1))
//!     .with_mobility(Mobility::new(Direction::South, 2, 3));
//! let mut battle =
//!     Battle::new(EngineConfig::default(), map, Some(Direction::South), vec![sloop])
//!         .unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let report = battle.resolve_turn(&mut rng).unwrap();
//! println!("{:?}", report);
//! ```
//!
//! See [EngineConfig] for the tunable constants.

mod battle;
mod config;
mod fov;
pub mod hex;
mod map;
mod mobility;
mod relation;
mod targeting;
mod util;
mod vessel;
mod wind;

pub use crate::{
    battle::{Battle, TurnReport},
    config::{EngineConfig, Seed, VisionConfig, WindConfig},
    fov::{field_of_view, ViewModifiers, Visibility},
    hex::{CubePoint, Direction, OffsetPoint, OffsetPointSet},
    map::{Elevation, MapQuery, Tile, TileMap},
    mobility::{carry, Mobility, MomentumCause, WindAlignment},
    relation::{classify_relation, project, SpatialRelation, Zone},
    targeting::{
        attack_hexes, targeting_axis, targeting_cone, MountSide, WeaponMount,
    },
    vessel::{Intents, Movement, Vessel},
    wind::WindState,
};
