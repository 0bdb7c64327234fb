//! Straight lines, rings and disks of hexes. Everything here works in cube
//! space; offset wrappers convert at the edges.

use crate::hex::{
    CubePoint, CubeVector, Direction, HexCoordinateValue, OffsetPoint,
};

/// A point in cube space with fractional components. These only exist as
/// intermediate values while interpolating, and have to be rounded back to a
/// [CubePoint] before they can be used for anything.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractionalCube {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FractionalCube {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Linearly interpolate between two points. `t = 0` is `a`, `t = 1` is `b`
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }

    /// Round to the nearest hex. Each component is rounded on its own, then
    /// whichever component moved the most gets recomputed from the other two
    /// so the result lands back on the plane `x + y + z = 0`.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(self) -> CubePoint {
        let mut rx = self.x.round();
        let mut ry = self.y.round();
        let rz = self.z.round();

        let dx = (rx - self.x).abs();
        let dy = (ry - self.y).abs();
        let dz = (rz - self.z).abs();

        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        }
        // z is implied by x and y, so the third case needs no fixup
        CubePoint::new_xy(rx as i32, ry as i32)
    }
}

impl<T: HexCoordinateValue> From<&T> for FractionalCube {
    fn from(value: &T) -> Self {
        Self::new(value.x().into(), value.y().into(), value.z().into())
    }
}

/// Offset applied to both ends of a line before interpolating. Without it,
/// lines running exactly along a hex edge land on x.5 values and the rounding
/// picks a side arbitrarily. Nudging both ends the same way keeps the choice
/// consistent.
const LINE_NUDGE: (f64, f64, f64) = (1e-6, 2e-6, -3e-6);

/// Get the ordered list of hexes on the straight line from `a` to `b`. Both
/// ends are included, so the output always has `distance + 1` elements. Drop
/// the first element if you only want the path leaving `a`.
pub fn line(a: CubePoint, b: CubePoint) -> Vec<CubePoint> {
    let distance = a.distance_to(b);
    if distance == 0 {
        return vec![a];
    }

    let nudge = |p: CubePoint| {
        let f = FractionalCube::from(&p);
        FractionalCube::new(
            f.x + LINE_NUDGE.0,
            f.y + LINE_NUDGE.1,
            f.z + LINE_NUDGE.2,
        )
    };
    let start = nudge(a);
    let end = nudge(b);
    let steps = f64::from(distance);

    (0..=distance)
        .map(|i| FractionalCube::lerp(start, end, f64::from(i) / steps).round())
        .collect()
}

/// [line], but for offset coordinates
pub fn offset_line(a: OffsetPoint, b: OffsetPoint) -> Vec<OffsetPoint> {
    line(a.to_cube(), b.to_cube())
        .into_iter()
        .map(OffsetPoint::from)
        .collect()
}

/// Get the hexes that are exactly `radius` steps from `center`. Walks the ring
/// starting from the hex `radius` steps south-west of center, then takes
/// `radius` steps in each direction (counter-clockwise order rotated to start
/// at south). Radius 0 is just the center, negative radius is empty.
///
/// https://www.redblobgames.com/grids/hexagons/#rings
pub fn ring(center: CubePoint, radius: i32) -> Vec<CubePoint> {
    if radius < 0 {
        return Vec::new();
    }
    if radius == 0 {
        return vec![center];
    }

    let mut output = Vec::with_capacity(6 * radius as usize);
    let mut hex = center + Direction::SouthWest.to_vector() * radius;
    for side in 0..6 {
        // Starting from the south-west corner, walking south-east first keeps
        // us on the ring
        let step = Direction::SouthEast.rotate(side).to_vector();
        for _ in 0..radius {
            output.push(hex);
            hex += step;
        }
    }
    output
}

/// Every hex within `radius` steps of `center`, center included. Contains
/// [disk_len] hexes.
pub fn disk(center: CubePoint, radius: i32) -> Vec<CubePoint> {
    (0..=radius).flat_map(|r| ring(center, r)).collect()
}

/// Number of hexes in a filled disk of the given radius. Radius 0 means 1 hex,
/// 1 is 7 hexes, 2 is 19, etc.
pub fn disk_len(radius: u32) -> usize {
    // We'll always have 3r^2+3r+1 hexes. f(0) = 1, and we add 6r hexes for
    // every step after that: 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Vector of the given length along a direction
pub fn direction_vector(direction: Direction, length: i32) -> CubeVector {
    direction.to_vector() * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::OffsetPointSet;

    #[test]
    fn test_round() {
        assert_eq!(
            FractionalCube::new(0.1, 0.2, -0.3).round(),
            CubePoint::ORIGIN
        );
        // x drifts the most, so it's recomputed
        assert_eq!(
            FractionalCube::new(0.6, 0.7, -1.3).round(),
            CubePoint::new(0, 1, -1).unwrap()
        );
        assert_eq!(
            FractionalCube::new(-1.333, 2.0, -0.667).round(),
            CubePoint::new(-1, 2, -1).unwrap()
        );
    }

    #[test]
    fn test_line_same_point() {
        let a = CubePoint::new_xy(3, -1);
        assert_eq!(line(a, a), vec![a]);
    }

    #[test]
    fn test_line_straight() {
        let a = CubePoint::ORIGIN;
        let b = a + direction_vector(Direction::South, 3);
        assert_eq!(
            line(a, b),
            vec![
                a,
                a.adjacent(Direction::South),
                a + direction_vector(Direction::South, 2),
                b,
            ]
        );
    }

    #[test]
    fn test_line_is_contiguous() {
        let a = CubePoint::new_xy(-2, 5);
        let b = CubePoint::new_xy(4, -3);
        let points = line(a, b);
        assert_eq!(points.len(), a.distance_to(b) as usize + 1);
        assert_eq!(points.first(), Some(&a));
        assert_eq!(points.last(), Some(&b));
        for pair in points.windows(2) {
            assert_eq!(pair[0].distance_to(pair[1]), 1);
        }
    }

    #[test]
    fn test_offset_line() {
        let a = OffsetPoint::new(1, 1);
        let b = OffsetPoint::new(1, 4);
        assert_eq!(
            offset_line(a, b),
            vec![
                a,
                OffsetPoint::new(1, 2),
                OffsetPoint::new(1, 3),
                b
            ]
        );
    }

    #[test]
    fn test_ring() {
        let center = CubePoint::new_xy(1, 1);
        assert_eq!(ring(center, 0), vec![center]);
        assert!(ring(center, -1).is_empty());
        for radius in 1..5 {
            let hexes = ring(center, radius);
            assert_eq!(hexes.len(), 6 * radius as usize);
            assert!(hexes
                .iter()
                .all(|hex| hex.distance_to(center) == radius as u32));
        }
    }

    #[test]
    fn test_disk() {
        for radius in 0..5u32 {
            let hexes: OffsetPointSet = disk(CubePoint::ORIGIN, radius as i32)
                .into_iter()
                .map(OffsetPoint::from)
                .collect();
            assert_eq!(hexes.len(), disk_len(radius));
        }
    }

    #[test]
    fn test_disk_len() {
        assert_eq!(disk_len(0), 1);
        assert_eq!(disk_len(1), 7);
        assert_eq!(disk_len(2), 19);
        assert_eq!(disk_len(3), 37);
    }
}
