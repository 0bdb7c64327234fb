//! This sub-module contains basic types for units that form the hex coordinate
//! system. See the parent module documentation for more info on the coordinate
//! system.

use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::{
    convert::{TryFrom, TryInto},
    ops,
};
use strum::{EnumIter, IntoEnumIterator};

/// A trait representing any three-component value in the cube coordinate
/// system. Points, vectors and fractional (mid-interpolation) values all
/// implement this, so generic math can be written once.
pub trait HexCoordinateValue: Sized {
    /// The primitive type of each component
    type Component: Copy + Into<f64>;

    /// The `x` component of the coordinate
    fn x(&self) -> Self::Component;

    /// The `y` component of the coordinate
    fn y(&self) -> Self::Component;

    /// The `z` component of the coordinate
    fn z(&self) -> Self::Component;
}

/// A point in the cube coordinate system that refers to a whole hex. For every
/// valid point, `x + y + z = 0`.
///
/// ## Implementation
///
/// Since `z` can always be derived from `x` and `y`, we only store those two.
/// That also makes it impossible to construct a point that breaks the zero-sum
/// invariant, which is what every other module in this crate leans on.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
pub struct CubePoint {
    x: i32,
    y: i32,
}

impl CubePoint {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// Construct a new cube point with the given x and y. Since x+y+z=0 for all
    /// points, we can derive z from x & y.
    pub const fn new_xy(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Construct a new cube point with the given x and z. The derived y wraps
    /// at the edges of `i32`, so this never panics and `z` reads back exactly.
    pub const fn new_xz(x: i32, z: i32) -> Self {
        Self::new_xy(x, x.wrapping_neg().wrapping_sub(z))
    }

    /// Construct a new cube point from all three components. Returns an error
    /// if the components don't fall on the plane `x + y + z = 0`.
    pub fn new(x: i32, y: i32, z: i32) -> anyhow::Result<Self> {
        if x + y + z != 0 {
            Err(anyhow!(
                "Invalid cube point ({}, {}, {}); must be on the plane x+y+z=0",
                x,
                y,
                z
            ))
        } else {
            Ok(Self::new_xy(x, y))
        }
    }

    /// Get the point of the hex adjacent to this one in the given direction
    pub fn adjacent(self, direction: Direction) -> Self {
        self + direction.to_vector()
    }

    /// Get an iterator of all the points directly adjacent to this one, in
    /// counter-clockwise order starting at [Direction::North]. Always contains
    /// exactly 6 values.
    pub fn adjacents(self) -> impl Iterator<Item = CubePoint> {
        Direction::iter().map(move |dir| self.adjacent(dir))
    }

    /// Rotate this point around the origin by `steps` sixths of a turn.
    /// Positive steps rotate counter-clockwise (towards port), negative steps
    /// rotate clockwise. Any number of steps is accepted.
    pub fn rotate(self, steps: i32) -> Self {
        let vector = (self - Self::ORIGIN).rotate(steps);
        Self::ORIGIN + vector
    }

    /// Calculate the path distance between two hexes, meaning the number of
    /// hops it takes to get from one to the other. 0 if the points are equal,
    /// 1 if the hexes are adjacent, etc.
    pub fn distance_to(self, other: CubePoint) -> u32 {
        (self - other).length()
    }

    /// Convert this point into the offset coordinate system
    pub fn to_offset(self) -> OffsetPoint {
        self.into()
    }
}

impl HexCoordinateValue for CubePoint {
    type Component = i32;

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn z(&self) -> i32 {
        self.x.wrapping_add(self.y).wrapping_neg()
    }
}

impl ops::Add<CubeVector> for CubePoint {
    type Output = CubePoint;

    fn add(self, rhs: CubeVector) -> Self::Output {
        // A point plus any zero-sum vector is still on the plane. Direction
        // vectors and point differences are always zero-sum.
        debug_assert_eq!(rhs.x + rhs.y + rhs.z, 0, "non-planar vector {}", rhs);
        Self::new_xy(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::AddAssign<CubeVector> for CubePoint {
    fn add_assign(&mut self, rhs: CubeVector) {
        *self = *self + rhs;
    }
}

impl ops::Sub for CubePoint {
    type Output = CubeVector;

    fn sub(self, rhs: CubePoint) -> Self::Output {
        CubeVector::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

/// A translation within the cube coordinate system. Unlike [CubePoint], the
/// components of a vector aren't validated, but every vector produced by this
/// module (direction vectors, differences between points, rotations of those)
/// is zero-sum.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    Mul,
    Neg,
    AddAssign,
    SubAssign,
)]
#[display(fmt = "<{}, {}, {}>", x, y, z)]
pub struct CubeVector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeVector {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Rotate this vector by `steps` sixths of a turn. Positive is
    /// counter-clockwise. Six steps in either direction is the identity.
    pub fn rotate(self, steps: i32) -> Self {
        let mut vector = self;
        for _ in 0..steps.rem_euclid(6) {
            // One sixth counter-clockwise: (x, y, z) -> (-y, -z, -x)
            vector = Self::new(-vector.y, -vector.z, -vector.x);
        }
        vector
    }

    /// Number of single-hex steps this vector spans
    pub fn length(self) -> u32 {
        self.x
            .unsigned_abs()
            .max(self.y.unsigned_abs())
            .max(self.z.unsigned_abs())
    }
}

impl HexCoordinateValue for CubeVector {
    type Component = i32;

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn z(&self) -> i32 {
        self.z
    }
}

/// A hex address on the map grid, as (column, row). Hexes are flat-topped and
/// odd columns are shoved down by half a hex relative to even columns. Every
/// entity position and map index uses this type; all math happens after
/// converting to [CubePoint].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "[{}, {}]", col, row)]
pub struct OffsetPoint {
    pub col: i32,
    pub row: i32,
}

impl OffsetPoint {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Convert this point into the cube coordinate system
    pub fn to_cube(self) -> CubePoint {
        self.into()
    }

    /// Get the offset point of the hex adjacent to this one. The row delta for
    /// the four diagonal directions depends on column parity, which is why
    /// this routes through cube space.
    pub fn adjacent(self, direction: Direction) -> Self {
        self.to_cube().adjacent(direction).to_offset()
    }

    /// All 6 neighbors of this hex, in the same order as [Direction]'s
    /// iteration. Some of them may be off the map; bounds are the map's
    /// problem.
    pub fn adjacents(self) -> impl Iterator<Item = OffsetPoint> {
        Direction::iter().map(move |dir| self.adjacent(dir))
    }

    /// See [CubePoint::distance_to]
    pub fn distance_to(self, other: OffsetPoint) -> u32 {
        self.to_cube().distance_to(other.to_cube())
    }
}

// https://www.redblobgames.com/grids/hexagons/#conversions-offset (odd-q)
// `col & 1` is the parity in two's complement too, so this stays exact for
// negative columns. The half-column shift can't overflow; the row adjustment
// wraps, which keeps both conversions total and exact inverses of each other.
impl From<OffsetPoint> for CubePoint {
    fn from(offset: OffsetPoint) -> Self {
        let x = offset.col;
        let z = offset.row.wrapping_sub((offset.col - (offset.col & 1)) / 2);
        Self::new_xz(x, z)
    }
}

impl From<CubePoint> for OffsetPoint {
    fn from(cube: CubePoint) -> Self {
        let col = cube.x();
        let row = cube.z().wrapping_add((cube.x() - (cube.x() & 1)) / 2);
        Self::new(col, row)
    }
}

impl From<(i32, i32)> for OffsetPoint {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// One of the six directions from a hex to its neighbors. The variants are in
/// counter-clockwise order, so the discriminant doubles as the direction's
/// index: rotating by +1 turns to port, -1 turns to starboard.
///
/// Directions serialize as their index. Deserializing accepts any integer and
/// wraps it modulo 6.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(from = "i32", into = "i32")]
pub enum Direction {
    North,
    NorthWest,
    SouthWest,
    South,
    SouthEast,
    NorthEast,
}

impl Direction {
    /// All directions in counter-clockwise order, starting at north
    pub const COUNTER_CLOCKWISE: [Self; 6] = [
        Self::North,
        Self::NorthWest,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
        Self::NorthEast,
    ];

    /// Get the direction with the given index. Any integer is valid; it's
    /// taken modulo 6.
    pub fn from_index(index: i32) -> Self {
        // rem_euclid is always in [0, 6), so the cast can't truncate
        Self::COUNTER_CLOCKWISE[index.rem_euclid(6) as usize]
    }

    /// Index of this direction in [0, 6)
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Rotate by some number of sixths of a turn. Positive is towards port
    /// (counter-clockwise).
    pub fn rotate(self, steps: i32) -> Self {
        Self::from_index(self.index() + steps)
    }

    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Number of steps to rotate `self` by to reach `other`, in [0, 6)
    pub fn steps_to(self, other: Direction) -> i32 {
        (other.index() - self.index()).rem_euclid(6)
    }

    /// Get the unit vector that moves a point one hex in this direction
    pub fn to_vector(self) -> CubeVector {
        match self {
            Self::North => CubeVector::new(0, 1, -1),
            Self::NorthWest => CubeVector::new(-1, 1, 0),
            Self::SouthWest => CubeVector::new(-1, 0, 1),
            Self::South => CubeVector::new(0, -1, 1),
            Self::SouthEast => CubeVector::new(1, -1, 0),
            Self::NorthEast => CubeVector::new(1, 0, -1),
        }
    }
}

impl From<i32> for Direction {
    fn from(index: i32) -> Self {
        Self::from_index(index)
    }
}

impl From<Direction> for i32 {
    fn from(direction: Direction) -> Self {
        direction.index()
    }
}

impl TryFrom<CubeVector> for Direction {
    type Error = anyhow::Error;

    fn try_from(vector: CubeVector) -> Result<Self, Self::Error> {
        Direction::iter()
            .find(|dir| dir.to_vector() == vector)
            .ok_or_else(|| anyhow!("{} is not a unit direction vector", vector))
    }
}

/// Convert an offset step between two adjacent hexes back into a direction.
/// Returns an error if the hexes aren't adjacent.
pub fn direction_between(
    from: OffsetPoint,
    to: OffsetPoint,
) -> anyhow::Result<Direction> {
    (to.to_cube() - from.to_cube()).try_into()
}
