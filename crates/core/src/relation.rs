//! Where is that ship, from where I'm standing? This classifies another
//! vessel's position into one of twelve zones around the observer's hull,
//! which is all a steering policy needs to decide whether to turn, speed up or
//! hold course.

use crate::hex::{CubePoint, Direction, HexCoordinateValue, OffsetPoint};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A zone around an observer, in the observer's own frame (bow pointing at
/// direction 0).
///
/// The six directions out of the observer's hex are the axes; they are
/// zones of their own, since a target sitting exactly on one can be hit by an
/// axis-mounted gun or sailed onto without turning. Between each pair of
/// adjacent axes is an open hextant.
///
/// ```text
///                forward axis
///      port bow       |      starboard bow
///   port bow axis \   |   / starboard bow axis
///      port        -- o --       starboard
///   port quarter axis /   |   \ starboard quarter axis
///      port quarter   |      starboard quarter
///                 aft axis
/// ```
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
pub enum Zone {
    /// The target is in the observer's own hex
    Coincident,

    ForwardAxis,
    PortBowAxis,
    PortQuarterAxis,
    AftAxis,
    StarboardQuarterAxis,
    StarboardBowAxis,

    /// Between the forward axis and the port bow axis
    PortBow,
    /// Between the port bow and port quarter axes, i.e. abeam to port
    Port,
    /// Between the port quarter axis and the aft axis
    PortQuarter,
    /// Between the aft axis and the starboard quarter axis
    StarboardQuarter,
    /// Between the starboard quarter and starboard bow axes
    Starboard,
    /// Between the starboard bow axis and the forward axis
    StarboardBow,
}

impl Zone {
    /// Is this one of the six boundary zones?
    pub fn is_axis(self) -> bool {
        matches!(
            self,
            Self::ForwardAxis
                | Self::PortBowAxis
                | Self::PortQuarterAxis
                | Self::AftAxis
                | Self::StarboardQuarterAxis
                | Self::StarboardBowAxis
        )
    }

    /// Is this zone anywhere on the port side (excluding the fore/aft axes)?
    pub fn is_port(self) -> bool {
        matches!(
            self,
            Self::PortBow
                | Self::PortBowAxis
                | Self::Port
                | Self::PortQuarterAxis
                | Self::PortQuarter
        )
    }

    /// Is this zone anywhere on the starboard side (excluding the fore/aft
    /// axes)?
    pub fn is_starboard(self) -> bool {
        matches!(
            self,
            Self::StarboardBow
                | Self::StarboardBowAxis
                | Self::Starboard
                | Self::StarboardQuarterAxis
                | Self::StarboardQuarter
        )
    }

    /// Classify a position that's already in the observer's frame (observer
    /// at the origin, facing direction 0). Only the signs of the components
    /// matter. Since they always sum to zero, they can't all share a sign,
    /// which leaves exactly 13 possibilities.
    fn from_local(local: CubePoint) -> Self {
        let signs = (local.x().signum(), local.y().signum(), local.z().signum());
        match signs {
            (0, 0, 0) => Self::Coincident,

            // One component is 0: on an axis
            (0, 1, _) => Self::ForwardAxis,
            (0, -1, _) => Self::AftAxis,
            (-1, _, 0) => Self::PortBowAxis,
            (1, _, 0) => Self::StarboardQuarterAxis,
            (-1, 0, _) => Self::PortQuarterAxis,
            (1, 0, _) => Self::StarboardBowAxis,

            // All nonzero: inside a hextant
            (-1, 1, -1) => Self::PortBow,
            (-1, 1, 1) => Self::Port,
            (-1, -1, 1) => Self::PortQuarter,
            (1, -1, 1) => Self::StarboardQuarter,
            (1, -1, -1) => Self::Starboard,
            (1, 1, -1) => Self::StarboardBow,

            _ => unreachable!("cube point {} is off the plane", local),
        }
    }
}

/// The result of classifying a target relative to an observer
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialRelation {
    /// Where the target is around the observer's hull
    pub zone: Zone,
    /// The target's heading, relative to the observer's. `North` means the
    /// target is sailing the same way as the observer, `South` means it's
    /// coming straight back at it.
    pub relative_direction: Direction,
}

/// Classify where a target is from the observer's point of view. The target
/// position is rotated into the observer's frame, and the same rotation is
/// applied to the target's facing to get its relative heading.
///
/// Pass a projected position (see [project]) for the target to steer towards
/// where it'll be rather than where it is.
pub fn classify_relation(
    target: OffsetPoint,
    target_facing: Direction,
    observer: OffsetPoint,
    observer_facing: Direction,
) -> SpatialRelation {
    let undo_facing = -observer_facing.index();
    let local = CubePoint::ORIGIN
        + (target.to_cube() - observer.to_cube()).rotate(undo_facing);
    SpatialRelation {
        zone: Zone::from_local(local),
        relative_direction: target_facing.rotate(undo_facing),
    }
}

/// Where a vessel will be after sailing `speed` hexes straight ahead. Doesn't
/// account for terrain or map bounds.
pub fn project(position: OffsetPoint, facing: Direction, speed: i32) -> OffsetPoint {
    (position.to_cube() + facing.to_vector() * speed).to_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::CubeVector;
    use strum::IntoEnumIterator;

    const OBSERVER: OffsetPoint = OffsetPoint::new(4, 4);

    fn relative(x: i32, y: i32, z: i32) -> OffsetPoint {
        (OBSERVER.to_cube() + CubeVector::new(x, y, z)).to_offset()
    }

    /// One sample position per zone, for an observer facing north
    fn samples() -> Vec<(CubeVector, Zone)> {
        vec![
            (CubeVector::new(0, 0, 0), Zone::Coincident),
            (CubeVector::new(0, 2, -2), Zone::ForwardAxis),
            (CubeVector::new(-2, 2, 0), Zone::PortBowAxis),
            (CubeVector::new(-2, 0, 2), Zone::PortQuarterAxis),
            (CubeVector::new(0, -2, 2), Zone::AftAxis),
            (CubeVector::new(2, -2, 0), Zone::StarboardQuarterAxis),
            (CubeVector::new(2, 0, -2), Zone::StarboardBowAxis),
            (CubeVector::new(-1, 2, -1), Zone::PortBow),
            (CubeVector::new(-2, 1, 1), Zone::Port),
            (CubeVector::new(-1, -1, 2), Zone::PortQuarter),
            (CubeVector::new(1, -2, 1), Zone::StarboardQuarter),
            (CubeVector::new(2, -1, -1), Zone::Starboard),
            (CubeVector::new(1, 1, -2), Zone::StarboardBow),
        ]
    }

    #[test]
    fn test_all_zones_sampled() {
        let sampled: Vec<Zone> = samples().into_iter().map(|(_, z)| z).collect();
        for zone in Zone::iter() {
            assert!(sampled.contains(&zone), "{} not sampled", zone);
        }
    }

    #[test]
    fn test_classify_facing_north() {
        for (vector, zone) in samples() {
            let target = relative(vector.x, vector.y, vector.z);
            let relation = classify_relation(
                target,
                Direction::North,
                OBSERVER,
                Direction::North,
            );
            assert_eq!(relation.zone, zone, "wrong zone for {}", vector);
        }
    }

    #[test]
    fn test_classify_any_facing() {
        // Rotating the whole scene must not change anything
        for facing in Direction::COUNTER_CLOCKWISE {
            for (vector, zone) in samples() {
                let rotated = vector.rotate(facing.index());
                let target = relative(rotated.x, rotated.y, rotated.z);
                let relation =
                    classify_relation(target, facing, OBSERVER, facing);
                assert_eq!(relation.zone, zone);
                assert_eq!(relation.relative_direction, Direction::North);
            }
        }
    }

    #[test]
    fn test_dead_ahead_any_range() {
        for facing in Direction::COUNTER_CLOCKWISE {
            for range in 1..8 {
                let target = project(OBSERVER, facing, range);
                let relation = classify_relation(
                    target,
                    Direction::South,
                    OBSERVER,
                    facing,
                );
                assert_eq!(relation.zone, Zone::ForwardAxis);
                assert_eq!(
                    relation.relative_direction,
                    Direction::South.rotate(-facing.index())
                );
            }
        }
    }

    #[test]
    fn test_relative_direction() {
        let target = relative(0, 1, -1);
        let relation = classify_relation(
            target,
            Direction::North,
            OBSERVER,
            Direction::NorthWest,
        );
        // We're turned to port of the target, so it's heading off our
        // starboard bow
        assert_eq!(relation.relative_direction, Direction::NorthEast);
        assert_eq!(relation.zone, Zone::StarboardBowAxis);

        let relation = classify_relation(
            OBSERVER,
            Direction::South,
            OBSERVER,
            Direction::North,
        );
        assert_eq!(relation.zone, Zone::Coincident);
        assert_eq!(relation.relative_direction, Direction::South);
    }

    #[test]
    fn test_zone_sides() {
        assert!(Zone::PortBowAxis.is_axis());
        assert!(!Zone::Port.is_axis());
        assert!(Zone::PortQuarter.is_port());
        assert!(!Zone::ForwardAxis.is_port());
        assert!(!Zone::ForwardAxis.is_starboard());
        assert!(Zone::StarboardBowAxis.is_starboard());
        assert_eq!(Zone::StarboardQuarterAxis.to_string(), "starboard_quarter_axis");
    }

    #[test]
    fn test_project() {
        assert_eq!(project(OBSERVER, Direction::South, 0), OBSERVER);
        assert_eq!(
            project(OBSERVER, Direction::South, 2),
            OffsetPoint::new(4, 6)
        );
        assert_eq!(
            project(OBSERVER, Direction::NorthEast, 1),
            OBSERVER.adjacent(Direction::NorthEast)
        );
    }
}
