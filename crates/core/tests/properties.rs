use broadside::{
    carry,
    hex::{line, offset_line, CubePoint, HexCoordinateValue},
    Direction, Mobility, MomentumCause, OffsetPoint,
};
use proptest::prelude::*;

fn offset_point() -> impl Strategy<Value = OffsetPoint> {
    (-500..500, -500..500).prop_map(|(col, row)| OffsetPoint::new(col, row))
}

fn direction() -> impl Strategy<Value = Direction> {
    (0..6).prop_map(Direction::from_index)
}

fn cause() -> impl Strategy<Value = MomentumCause> {
    prop_oneof![
        Just(MomentumCause::Rowing),
        Just(MomentumCause::Wind),
        Just(MomentumCause::Drag),
    ]
}

proptest! {
    #[test]
    fn offset_round_trip(point in offset_point()) {
        let cube = point.to_cube();
        prop_assert_eq!(cube.to_offset(), point);
        prop_assert_eq!(OffsetPoint::from(CubePoint::from(point)), point);
    }

    #[test]
    fn cube_sums_to_zero(point in offset_point()) {
        let cube = point.to_cube();
        prop_assert_eq!(cube.x() + cube.y() + cube.z(), 0);
    }

    #[test]
    fn full_rotation_is_identity(
        point in offset_point(),
        steps in 0i32..6,
    ) {
        let vector = point.to_cube() - CubePoint::ORIGIN;
        prop_assert_eq!(vector.rotate(steps).rotate(6 - steps), vector);
        prop_assert_eq!(vector.rotate(steps).rotate(-steps), vector);
        prop_assert_eq!(vector.rotate(steps).length(), vector.length());
    }

    #[test]
    fn distance_is_a_metric(a in offset_point(), b in offset_point()) {
        prop_assert_eq!(a.distance_to(a), 0);
        prop_assert_eq!(a.distance_to(b), b.distance_to(a));
        prop_assert_eq!(a.distance_to(b) == 0, a == b);
    }

    #[test]
    fn neighbors_are_adjacent(point in offset_point()) {
        let neighbors: Vec<_> = point.adjacents().collect();
        prop_assert_eq!(neighbors.len(), 6);
        for neighbor in neighbors {
            prop_assert_eq!(point.distance_to(neighbor), 1);
        }
    }

    #[test]
    fn line_endpoints_and_length(a in offset_point(), b in offset_point()) {
        let hexes = offset_line(a, b);
        prop_assert_eq!(hexes.len() as u32, a.distance_to(b) + 1);
        prop_assert_eq!(hexes[0], a);
        prop_assert_eq!(hexes[hexes.len() - 1], b);
        // Every step moves exactly one hex
        for pair in hexes.windows(2) {
            prop_assert_eq!(pair[0].distance_to(pair[1]), 1);
        }
    }

    #[test]
    fn line_to_self(a in offset_point()) {
        let cube = a.to_cube();
        prop_assert_eq!(line(cube, cube), vec![cube]);
    }

    #[test]
    fn carry_is_exact(total in -10i32..20, max in 0i32..8) {
        let (speed_delta, momentum) = carry(total, max);
        prop_assert!((-1..=1).contains(&speed_delta));
        // Carrying is exact: nothing is created or destroyed, a speed step is
        // worth max + 1 momentum
        prop_assert_eq!(speed_delta * (max + 1) + momentum, total);
    }

    #[test]
    fn mobility_stays_in_bounds(
        facing in direction(),
        max_speed in 0i32..5,
        max_momentum in 0i32..5,
        pushes in prop::collection::vec((-6i32..7, cause()), 0..40),
    ) {
        let mut mobility = Mobility::new(facing, max_speed, max_momentum);
        for (amount, cause) in pushes {
            let before = mobility;
            if amount >= 0 {
                mobility.increase(amount, cause);
            } else {
                mobility.decrease(amount, cause);
            }
            prop_assert!((0..=max_speed).contains(&mobility.speed()));
            prop_assert!((0..=max_momentum).contains(&mobility.momentum()));
            prop_assert!((mobility.speed() - before.speed()).abs() <= 1);
            prop_assert_eq!(mobility.facing(), facing);
        }
    }
}
