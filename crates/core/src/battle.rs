use crate::{
    config::EngineConfig,
    fov::ViewModifiers,
    hex::Direction,
    map::{MapQuery, TileMap},
    relation::{classify_relation, project, SpatialRelation},
    timed,
    vessel::{Movement, Vessel},
    wind::WindState,
};
use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use log::{debug, info};
use rand::Rng;
use validator::Validate;

/// What happened during one call to [Battle::resolve_turn]
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub turn: u32,
    pub wind: Option<Direction>,
    pub wind_changed: bool,
    /// How far each vessel moved, in vessel order
    pub movements: Vec<(String, Movement)>,
    /// Hexes the primary observer saw for the first time this turn
    pub newly_seen: usize,
}

/// A map, the wind over it, and every vessel on it. Owns the turn loop.
#[derive(Clone, Debug)]
pub struct Battle {
    config: EngineConfig,
    map: TileMap,
    wind: WindState,
    /// Time of day, lunar and weather modifiers for the current turn. The fog
    /// allowance here is added on top of the configured one.
    conditions: ViewModifiers,
    vessels: IndexMap<String, Vessel>,
    /// Index of the vessel whose view uncovers the map
    primary: Option<usize>,
    turn: u32,
}

impl Battle {
    /// Set up a battle. The first vessel is the primary observer. Every
    /// vessel starts out with a fresh field of view.
    pub fn new(
        config: EngineConfig,
        map: TileMap,
        wind: Option<Direction>,
        vessels: Vec<Vessel>,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;

        let mut by_name = IndexMap::with_capacity(vessels.len());
        for vessel in vessels {
            if !map.in_bounds(vessel.position()) {
                bail!(
                    "vessel {:?} at {} is outside the {}x{} map",
                    vessel.name(),
                    vessel.position(),
                    map.width(),
                    map.height()
                );
            }
            if by_name.contains_key(vessel.name()) {
                bail!("duplicate vessel name {:?}", vessel.name());
            }
            by_name.insert(vessel.name().to_owned(), vessel);
        }

        let primary = if by_name.is_empty() { None } else { Some(0) };
        let mut battle = Self {
            wind: WindState::new(wind, &config.wind),
            config,
            map,
            conditions: ViewModifiers::default(),
            vessels: by_name,
            primary,
            turn: 0,
        };
        battle.recompute_visibility();
        info!(
            "Battle started with {} vessels on a {}x{} map",
            battle.vessels.len(),
            battle.map.width(),
            battle.map.height()
        );
        Ok(battle)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    /// Number of turns resolved so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn conditions(&self) -> &ViewModifiers {
        &self.conditions
    }

    /// Change the sight conditions. They apply from the next visibility
    /// sweep on.
    pub fn set_conditions(&mut self, conditions: ViewModifiers) {
        self.conditions = conditions;
    }

    pub fn vessels(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.values()
    }

    pub fn vessel(&self, name: &str) -> Option<&Vessel> {
        self.vessels.get(name)
    }

    /// Get a vessel to give it orders
    pub fn vessel_mut(&mut self, name: &str) -> Option<&mut Vessel> {
        self.vessels.get_mut(name)
    }

    pub fn primary(&self) -> Option<&Vessel> {
        self.primary
            .and_then(|index| self.vessels.get_index(index))
            .map(|(_, vessel)| vessel)
    }

    /// Make a different vessel the primary observer. Its current view is
    /// revealed immediately.
    pub fn set_primary(&mut self, name: &str) -> anyhow::Result<()> {
        let index = self
            .vessels
            .get_index_of(name)
            .ok_or_else(|| anyhow!("no vessel named {:?}", name))?;
        self.primary = Some(index);
        self.reveal_primary();
        Ok(())
    }

    /// The modifiers every observer shares this turn, before their own
    /// abilities are applied
    fn shared_modifiers(&self) -> ViewModifiers {
        ViewModifiers {
            fog_allowance: self.config.vision.fog_allowance
                + self.conditions.fog_allowance,
            ..self.conditions
        }
    }

    /// Sweep a new field of view for every vessel, then uncover whatever the
    /// primary observer can see. Returns the number of newly seen hexes.
    pub fn recompute_visibility(&mut self) -> usize {
        let modifiers = self.shared_modifiers();
        let base_radius = self.config.vision.base_radius;
        let map = &self.map;
        timed!("Visibility", {
            for vessel in self.vessels.values_mut() {
                vessel.recompute_visibility(base_radius, &modifiers, map);
            }
        });
        self.reveal_primary()
    }

    fn reveal_primary(&mut self) -> usize {
        match self.primary.and_then(|index| self.vessels.get_index(index)) {
            Some((_, vessel)) => self.map.reveal(vessel.visibility().hexes()),
            None => 0,
        }
    }

    /// Resolve one full turn. The wind updates first. Then each vessel, in
    /// order, gets its rowing, wind and drag impulses, sails, and applies any
    /// pending turn. Once everyone has moved, fields of view are recomputed
    /// and weapons get a turn closer to reloaded.
    ///
    /// Fails if a stationary vessel was ordered to turn. Orders are checked
    /// before anything moves, so a failed turn leaves the battle untouched.
    pub fn resolve_turn(
        &mut self,
        rng: &mut impl Rng,
    ) -> anyhow::Result<TurnReport> {
        for (name, vessel) in &self.vessels {
            vessel.check_orders().with_context(|| {
                format!("vessel {:?} on turn {}", name, self.turn + 1)
            })?;
        }

        timed!("Turn", log::Level::Info, {
            self.turn += 1;
            let wind_changed = self.wind.update(rng);
            let wind = self.wind.direction();
            info!("Turn {}: wind {:?}", self.turn, wind);

            let turn = self.turn;
            let config = self.config;
            let map = &self.map;
            let mut movements = Vec::with_capacity(self.vessels.len());
            for (name, vessel) in self.vessels.iter_mut() {
                let rowing = vessel.intents().rowing;
                if let Some(mobility) = vessel.mobility_state_mut() {
                    mobility.apply_impulses(rowing, wind, &config);
                }
                let movement = vessel.advance(map);
                vessel.apply_rotation().with_context(|| {
                    format!("vessel {:?} on turn {}", name, turn)
                })?;
                debug!(
                    "{} at {} facing {:?}: {:?} {:?}",
                    name,
                    vessel.position(),
                    vessel.facing(),
                    movement,
                    vessel.mobility()
                );
                movements.push((name.clone(), movement));
            }

            let newly_seen = self.recompute_visibility();
            for vessel in self.vessels.values_mut() {
                vessel.tick_cooldowns();
            }

            Ok(TurnReport {
                turn: self.turn,
                wind,
                wind_changed,
                movements,
                newly_seen,
            })
        })
    }

    /// How every other vessel relates to `observer`, using where each target
    /// will be next turn if it holds its course and speed
    pub fn relations(
        &self,
        observer: &str,
    ) -> anyhow::Result<Vec<(&str, SpatialRelation)>> {
        let observer = self
            .vessel(observer)
            .ok_or_else(|| anyhow!("no vessel named {:?}", observer))?;
        Ok(self
            .vessels()
            .filter(|target| target.name() != observer.name())
            .map(|target| {
                let projected =
                    project(target.position(), target.facing(), target.speed());
                let relation = classify_relation(
                    projected,
                    target.facing(),
                    observer.position(),
                    observer.facing(),
                );
                (target.name(), relation)
            })
            .collect())
    }
}
