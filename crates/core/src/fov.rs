//! Field of view. Vision is omnidirectional: an observer's facing never
//! matters, only where they are, how far they can see this turn, and what's
//! in the way.

use crate::{
    hex::{line, ring, OffsetPoint, OffsetPointSet},
    map::MapQuery,
};
use serde::{Deserialize, Serialize};

/// Per-turn adjustments to an observer's sight, supplied by the time, weather
/// and lunar collaborators. The radius deltas can be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewModifiers {
    /// Radius delta for the time of day (night shrinks the view)
    pub time_of_day: i32,
    /// Radius delta for the phase of the moon
    pub lunar_phase: i32,
    /// Radius delta for the weather
    pub weather: i32,
    /// Total fog density a single sight line can pass through
    pub fog_allowance: f64,
    /// Flyers see one hex further and see over land
    pub can_fly: bool,
}

impl ViewModifiers {
    /// Sum of all radius deltas
    pub fn radius_delta(&self) -> i32 {
        let flight = if self.can_fly { 1 } else { 0 };
        self.time_of_day + self.lunar_phase + self.weather + flight
    }

    /// Apply these modifiers to a base radius. A non-positive base radius
    /// means the observer is blind and stays at 0; otherwise modifiers can't
    /// push the radius below 1.
    pub fn effective_radius(&self, base_radius: i32) -> i32 {
        if base_radius <= 0 {
            0
        } else {
            (base_radius + self.radius_delta()).max(1)
        }
    }
}

/// Compute every hex visible from `observer`.
///
/// A line is cast from the observer to each hex on the ring at the effective
/// radius, and walked outward hex by hex. Each ray ends:
/// - before a hex that's off the map
/// - before a hex where the fog summed along the ray (not counting the
///   observer's own hex) goes over the allowance
/// - after a hex of dry land, unless the observer can fly. You can see the
///   island, just not what's behind it.
///
/// Rays overlap near the center, so most hexes get visited more than once;
/// the set takes care of that. Output depends only on the inputs.
pub fn field_of_view(
    observer: OffsetPoint,
    radius: i32,
    modifiers: &ViewModifiers,
    map: &impl MapQuery,
) -> OffsetPointSet {
    let mut visible = OffsetPointSet::default();
    let radius = modifiers.effective_radius(radius);
    if radius <= 0 {
        return visible;
    }

    let center = observer.to_cube();
    for target in ring(center, radius) {
        let mut fog = 0.0;
        for (i, hex) in line(center, target).into_iter().enumerate() {
            let pos = hex.to_offset();
            if !map.in_bounds(pos) {
                break;
            }

            let is_observer = i == 0;
            if !is_observer {
                fog += map.fog_at(pos);
                if fog > modifiers.fog_allowance {
                    break;
                }
            }

            visible.insert(pos);

            if !is_observer
                && !modifiers.can_fly
                && map.elevation_at(pos).blocks_sight()
            {
                break;
            }
        }
    }

    visible
}

/// The set of hexes an entity can currently see. Replaced wholesale every time
/// it's recomputed; there's no history.
#[derive(Clone, Debug, Default)]
pub struct Visibility {
    visible: OffsetPointSet,
}

impl Visibility {
    /// Throw out the old view and sweep a new one
    pub fn recompute(
        &mut self,
        observer: OffsetPoint,
        radius: i32,
        modifiers: &ViewModifiers,
        map: &impl MapQuery,
    ) {
        self.visible = field_of_view(observer, radius, modifiers, map);
    }

    pub fn can_see(&self, pos: OffsetPoint) -> bool {
        self.visible.contains(&pos)
    }

    pub fn hexes(&self) -> &OffsetPointSet {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hex::{disk_len, CubePoint, CubeVector, Direction},
        map::{Elevation, TileMap},
    };

    const OBSERVER: OffsetPoint = OffsetPoint::new(5, 5);

    fn open_sea() -> TileMap {
        TileMap::new(11, 11)
    }

    fn relative(x: i32, y: i32, z: i32) -> OffsetPoint {
        (OBSERVER.to_cube() + CubeVector::new(x, y, z)).to_offset()
    }

    #[test]
    fn test_open_sea_disk() {
        let map = open_sea();
        for radius in 1..=3 {
            let visible = field_of_view(
                OBSERVER,
                radius,
                &ViewModifiers::default(),
                &map,
            );
            assert_eq!(visible.len(), disk_len(radius as u32));
            assert!(visible.contains(&OBSERVER));
        }
    }

    #[test]
    fn test_no_radius() {
        let map = open_sea();
        let modifiers = ViewModifiers {
            weather: 5,
            ..Default::default()
        };
        assert!(field_of_view(OBSERVER, 0, &modifiers, &map).is_empty());
        assert!(field_of_view(OBSERVER, -2, &modifiers, &map).is_empty());
    }

    #[test]
    fn test_modifiers() {
        let map = open_sea();
        // Pitch black night can't take the radius below 1
        let night = ViewModifiers {
            time_of_day: -3,
            lunar_phase: -1,
            ..Default::default()
        };
        assert_eq!(night.effective_radius(2), 1);
        assert_eq!(field_of_view(OBSERVER, 2, &night, &map).len(), 7);

        let flyer = ViewModifiers {
            can_fly: true,
            ..Default::default()
        };
        assert_eq!(flyer.effective_radius(2), 3);
        assert_eq!(field_of_view(OBSERVER, 2, &flyer, &map).len(), 37);
    }

    #[test]
    fn test_land_blocks_ray() {
        let mut map = open_sea();
        let blocker = OBSERVER.adjacent(Direction::North);
        map.set_elevation(blocker, Elevation::Hill).unwrap();

        let visible =
            field_of_view(OBSERVER, 3, &ViewModifiers::default(), &map);
        // The island itself is visible
        assert!(visible.contains(&blocker));
        // Everything behind it along rays through it is hidden
        for hidden in [
            relative(0, 2, -2),
            relative(0, 3, -3),
            relative(-1, 3, -2),
            relative(1, 2, -3),
        ] {
            assert!(!visible.contains(&hidden), "{} should be hidden", hidden);
        }
        // Hexes that some other ray reaches are still visible
        assert!(visible.contains(&relative(-1, 2, -1)));
        assert!(visible.contains(&relative(1, 1, -2)));
        assert_eq!(visible.len(), 33);
    }

    #[test]
    fn test_flyer_sees_over_land() {
        let mut map = open_sea();
        map.set_elevation(OBSERVER.adjacent(Direction::North), Elevation::Mountain)
            .unwrap();
        let modifiers = ViewModifiers {
            can_fly: true,
            ..Default::default()
        };
        assert_eq!(field_of_view(OBSERVER, 2, &modifiers, &map).len(), 37);
    }

    #[test]
    fn test_fog() {
        let mut map = open_sea();
        for pos in map.tiles().keys().copied().collect::<Vec<_>>() {
            map.set_fog(pos, 0.6).unwrap();
        }
        let modifiers = ViewModifiers {
            fog_allowance: 1.0,
            ..Default::default()
        };
        // Second hex out puts every ray at 1.2
        let visible = field_of_view(OBSERVER, 3, &modifiers, &map);
        assert_eq!(visible.len(), 7);

        let clear = ViewModifiers {
            fog_allowance: 2.0,
            ..Default::default()
        };
        assert_eq!(field_of_view(OBSERVER, 3, &clear, &map).len(), 37);
    }

    #[test]
    fn test_map_edge() {
        let map = TileMap::new(5, 5);
        let corner = OffsetPoint::new(0, 0);
        let visible = field_of_view(corner, 1, &ViewModifiers::default(), &map);
        let mut expected = vec![
            corner,
            OffsetPoint::new(1, 0),
            OffsetPoint::new(0, 1),
        ];
        let mut actual: Vec<_> = visible.into_iter().collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_visibility_replaced() {
        let map = open_sea();
        let mut visibility = Visibility::default();
        assert!(visibility.is_empty());

        visibility.recompute(OBSERVER, 2, &ViewModifiers::default(), &map);
        assert_eq!(visibility.len(), 19);
        assert!(visibility.can_see(relative(0, 2, -2)));

        // Recomputing from somewhere else forgets the old view
        let moved = OffsetPoint::new(1, 1);
        visibility.recompute(moved, 1, &ViewModifiers::default(), &map);
        assert_eq!(visibility.len(), 7);
        assert!(!visibility.can_see(OBSERVER));

        // Same inputs, same output
        let again = field_of_view(moved, 1, &ViewModifiers::default(), &map);
        assert_eq!(visibility.hexes(), &again);
    }

    #[test]
    fn test_relative_helper() {
        assert_eq!(relative(0, 0, 0), OBSERVER);
        assert_eq!(
            relative(0, 1, -1).to_cube() - CubePoint::from(OBSERVER),
            Direction::North.to_vector()
        );
    }
}
