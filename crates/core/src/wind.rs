use crate::{config::WindConfig, hex::Direction};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The wind over a map. Shared read-only by every vessel during a turn and
/// updated once at the start of each turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindState {
    /// Direction the wind blows towards. `None` is a dead calm.
    direction: Option<Direction>,
    turns_since_change: u32,
    max_turns_before_change_roll: u32,
}

impl WindState {
    pub fn new(direction: Option<Direction>, config: &WindConfig) -> Self {
        Self {
            direction,
            turns_since_change: 0,
            max_turns_before_change_roll: config.max_turns_before_change_roll,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn turns_since_change(&self) -> u32 {
        self.turns_since_change
    }

    /// Advance the wind by one turn. Once it's held for long enough it rolls
    /// for a change: an existing wind veers one step either way or holds, a
    /// calm picks a fresh direction. The counter resets after every roll,
    /// whatever the outcome. Returns true if the direction changed.
    pub fn update(&mut self, rng: &mut impl Rng) -> bool {
        self.turns_since_change += 1;
        if self.turns_since_change < self.max_turns_before_change_roll {
            return false;
        }
        self.turns_since_change = 0;

        let new_direction = match self.direction {
            Some(direction) => direction.rotate(rng.gen_range(-1..=1)),
            None => Direction::from_index(rng.gen_range(0..6)),
        };
        let changed = self.direction != Some(new_direction);
        if changed {
            debug!("Wind shifted {:?} -> {:?}", self.direction, new_direction);
        }
        self.direction = Some(new_direction);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn config(turns: u32) -> WindConfig {
        WindConfig {
            max_turns_before_change_roll: turns,
        }
    }

    #[test]
    fn test_holds_until_roll() {
        let mut rng = Pcg64::seed_from_u64(7);
        let mut wind = WindState::new(Some(Direction::South), &config(3));
        assert!(!wind.update(&mut rng));
        assert!(!wind.update(&mut rng));
        assert_eq!(wind.direction(), Some(Direction::South));
        assert_eq!(wind.turns_since_change(), 2);

        // Third turn rolls, and the counter resets either way
        wind.update(&mut rng);
        assert_eq!(wind.turns_since_change(), 0);
    }

    #[test]
    fn test_veers_one_step_at_most() {
        let mut rng = Pcg64::seed_from_u64(1234);
        let mut wind = WindState::new(Some(Direction::North), &config(1));
        let mut changes = 0;
        for _ in 0..100 {
            let before = wind.direction().unwrap();
            if wind.update(&mut rng) {
                changes += 1;
            }
            let steps = before.steps_to(wind.direction().unwrap());
            assert!(matches!(steps, 0 | 1 | 5), "veered {} steps", steps);
        }
        // With a roll every turn, the wind has to shift sometimes
        assert!(changes > 0);
    }

    #[test]
    fn test_calm_picks_direction() {
        let mut rng = Pcg64::seed_from_u64(99);
        let mut wind = WindState::new(None, &config(1));
        assert!(wind.update(&mut rng));
        assert!(wind.direction().is_some());
    }

    #[test]
    fn test_deterministic() {
        let run = |seed| {
            let mut rng = Pcg64::seed_from_u64(seed);
            let mut wind = WindState::new(None, &config(2));
            (0..20)
                .map(|_| {
                    wind.update(&mut rng);
                    wind.direction()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }
}
