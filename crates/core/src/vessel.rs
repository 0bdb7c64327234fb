use crate::{
    fov::{ViewModifiers, Visibility},
    hex::{Direction, OffsetPoint, OffsetPointSet},
    map::MapQuery,
    mobility::{Mobility, MomentumCause},
    targeting::{attack_hexes, WeaponMount},
};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

/// What a vessel's crew has been ordered to do. Set by whatever is steering
/// the vessel (a player or an AI policy), consumed during turn resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intents {
    /// Oars out? Stays set until changed.
    pub rowing: bool,
    /// Steps to turn at the end of the next turn, positive to port. Cleared
    /// once applied.
    pub rotation: i32,
}

/// The result of moving a vessel for one turn
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    /// Number of hexes actually sailed
    pub hexes: i32,
    /// Did the vessel stop short because the way was blocked?
    pub aground: bool,
}

/// Anything that sits on the map and can see: ships, sea monsters, shore
/// batteries. Vessels without [Mobility] are stationary and always face
/// north.
#[derive(Clone, Debug)]
pub struct Vessel {
    name: String,
    position: OffsetPoint,
    mobility: Option<Mobility>,
    visibility: Visibility,
    can_fly: bool,
    weapons: Vec<WeaponMount>,
    intents: Intents,
}

impl Vessel {
    /// A stationary, earthbound, unarmed vessel
    pub fn new(name: impl Into<String>, position: OffsetPoint) -> Self {
        Self {
            name: name.into(),
            position,
            mobility: None,
            visibility: Visibility::default(),
            can_fly: false,
            weapons: Vec::new(),
            intents: Intents::default(),
        }
    }

    pub fn with_mobility(mut self, mobility: Mobility) -> Self {
        self.mobility = Some(mobility);
        self
    }

    pub fn with_weapons(mut self, weapons: Vec<WeaponMount>) -> Self {
        self.weapons = weapons;
        self
    }

    pub fn flying(mut self, can_fly: bool) -> Self {
        self.can_fly = can_fly;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> OffsetPoint {
        self.position
    }

    pub fn mobility(&self) -> Option<&Mobility> {
        self.mobility.as_ref()
    }

    pub fn facing(&self) -> Direction {
        self.mobility
            .as_ref()
            .map(Mobility::facing)
            .unwrap_or(Direction::North)
    }

    pub fn speed(&self) -> i32 {
        self.mobility.as_ref().map(Mobility::speed).unwrap_or(0)
    }

    pub fn can_fly(&self) -> bool {
        self.can_fly
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn weapons(&self) -> &[WeaponMount] {
        &self.weapons
    }

    pub fn intents(&self) -> &Intents {
        &self.intents
    }

    pub fn intents_mut(&mut self) -> &mut Intents {
        &mut self.intents
    }

    fn mobility_mut(&mut self) -> anyhow::Result<&mut Mobility> {
        let name = &self.name;
        self.mobility
            .as_mut()
            .ok_or_else(|| anyhow!("vessel {:?} has no mobility", name))
    }

    /// Turn by some number of steps, positive to port. Fails on a stationary
    /// vessel.
    pub fn rotate(&mut self, steps: i32) -> anyhow::Result<()> {
        self.mobility_mut()?.rotate(steps);
        Ok(())
    }

    /// See [Mobility::increase]. Fails on a stationary vessel.
    pub fn increase(
        &mut self,
        amount: i32,
        cause: MomentumCause,
    ) -> anyhow::Result<()> {
        self.mobility_mut()?.increase(amount, cause);
        Ok(())
    }

    /// See [Mobility::decrease]. Fails on a stationary vessel.
    pub fn decrease(
        &mut self,
        amount: i32,
        cause: MomentumCause,
    ) -> anyhow::Result<()> {
        self.mobility_mut()?.decrease(amount, cause);
        Ok(())
    }

    pub(crate) fn mobility_state_mut(&mut self) -> Option<&mut Mobility> {
        self.mobility.as_mut()
    }

    /// Sail straight ahead at the current speed, one hex at a time. The
    /// vessel stops before any hex it can't enter. Running into land or off
    /// the edge of the map kills all speed and momentum.
    pub fn advance(&mut self, map: &impl MapQuery) -> Movement {
        let (facing, speed) = match &self.mobility {
            Some(mobility) => (mobility.facing(), mobility.speed()),
            None => return Movement::default(),
        };

        let mut movement = Movement::default();
        for _ in 0..speed {
            let next = self.position.adjacent(facing);
            if !map.is_navigable(next) {
                movement.aground = true;
                break;
            }
            self.position = next;
            movement.hexes += 1;
        }

        if movement.aground {
            if let Some(mobility) = self.mobility.as_mut() {
                mobility.stop();
            }
        }
        movement
    }

    /// Check that the pending orders can be carried out, without changing
    /// anything
    pub(crate) fn check_orders(&self) -> anyhow::Result<()> {
        let steps = self.intents.rotation;
        if steps != 0 && self.mobility.is_none() {
            return Err(anyhow!("vessel {:?} has no mobility", self.name))
                .with_context(|| format!("cannot turn {} steps", steps));
        }
        Ok(())
    }

    /// Apply and clear the pending rotation order
    pub(crate) fn apply_rotation(&mut self) -> anyhow::Result<()> {
        let steps = std::mem::take(&mut self.intents.rotation);
        if steps != 0 {
            self.rotate(steps)
                .with_context(|| format!("cannot turn {} steps", steps))?;
        }
        Ok(())
    }

    /// The turn's view modifiers with this vessel's own abilities applied
    pub fn view_modifiers(&self, conditions: &ViewModifiers) -> ViewModifiers {
        ViewModifiers {
            can_fly: self.can_fly,
            ..*conditions
        }
    }

    /// Sweep a fresh field of view from the current position
    pub fn recompute_visibility(
        &mut self,
        base_radius: i32,
        conditions: &ViewModifiers,
        map: &impl MapQuery,
    ) {
        let modifiers = self.view_modifiers(conditions);
        self.visibility
            .recompute(self.position, base_radius, &modifiers, map);
    }

    /// Every hex the loaded weapons can hit right now
    pub fn attack_hexes(&self) -> OffsetPointSet {
        attack_hexes(self.position, self.facing(), &self.weapons)
    }

    /// Fire the weapon at the given index
    pub fn fire(&mut self, weapon: usize) -> anyhow::Result<()> {
        let name = &self.name;
        self.weapons
            .get_mut(weapon)
            .ok_or_else(|| anyhow!("vessel {:?} has no weapon #{}", name, weapon))?
            .fire()
            .with_context(|| format!("vessel {:?} cannot fire", name))
    }

    pub fn tick_cooldowns(&mut self) {
        for weapon in &mut self.weapons {
            weapon.tick_cooldown();
        }
    }
}
