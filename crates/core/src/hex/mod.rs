//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate Systems
//!
//! Broadside uses two coordinate systems for the same hexes.
//!
//! ### Offset Coordinates
//!
//! Offset coordinates are `(column, row)` pairs on a rectangular map of
//! flat-topped hexes, where every odd column is shoved down by half a hex.
//! These are what the map is indexed by and what every entity position is
//! stored as. They're easy to lay out and iterate over, but awful for math,
//! because stepping diagonally changes the row by a different amount
//! depending on which column you start in.
//!
//! ### Cube Coordinates
//!
//! All geometry (distance, rotation, lines, rings, neighbors) happens in the
//! [cube coordinate system described by Amit
//! Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//! Each hex has three integer components, and **for every hex `x + y + z =
//! 0`.** Cube points are never stored; they are always derived from an
//! [OffsetPoint] and converted back. The `From` impls between the two types
//! are the single place the column-parity rule lives.
//!
//! ```text
//!         North
//!     NW  _____  NE
//!        /     \
//!       /   o   \
//!       \       /
//!     SW \_____/ SE
//!         South
//! ```
//!
//! ### Directions
//!
//! The six [Direction]s point from a hex to its neighbors, numbered
//! counter-clockwise from north. Rotating by `+1` turns toward port (left),
//! `-1` toward starboard (right). Direction arithmetic always wraps modulo 6,
//! so there is no such thing as an invalid direction.

mod data_structure;
mod line;
mod unit;

pub use self::{data_structure::*, line::*, unit::*};
