//! Turn coordination.
//!
//! [`Game`] is the authoritative owner of the world: every level, the player
//! and the item arena. Each call to [`Game::handle_input`] resolves exactly
//! one turn (the player's input against the active level, then every living
//! monster) and publishes a [`Snapshot`] of the result.

mod integrity;
mod monster;
mod player;
mod snapshot;

use std::collections::BTreeMap;

pub use integrity::IntegrityError;
pub use snapshot::Snapshot;

use crate::action::Input;
use crate::blueprint::WorldBlueprint;
use crate::config::GameConfig;
use crate::env::TemplateOracle;
use crate::error::GenerationError;
use crate::level::{EventKind, Level, Portal};
use crate::state::{ActorId, Character, ItemArena, LevelId};

/// Where a turn is in its resolution cycle.
///
/// `Idle → PlayerResolving → MonstersResolving → Published`, returning to
/// `Idle` when the next input arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    #[default]
    Idle,
    PlayerResolving,
    MonstersResolving,
    Published,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::PlayerResolving => "player_resolving",
            TurnPhase::MonstersResolving => "monsters_resolving",
            TurnPhase::Published => "published",
        }
    }
}

/// What the UI receives after submitting an input.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    Continue(Box<Snapshot>),
    Quit,
}

impl TurnOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            TurnOutcome::Continue(snapshot) => Some(snapshot),
            TurnOutcome::Quit => None,
        }
    }

    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            TurnOutcome::Continue(snapshot) => Some(*snapshot),
            TurnOutcome::Quit => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    levels: Vec<Level>,
    level_names: BTreeMap<String, LevelId>,
    current: LevelId,
    player: Character,
    items: ItemArena,
    phase: TurnPhase,
    turn: u64,
    over: bool,
}

impl Game {
    /// Generates every level of `world` and links its portals.
    ///
    /// The player spawns where the start level's map places the player glyph;
    /// player glyphs in other levels are ignored.
    pub fn from_blueprint<O>(
        world: &WorldBlueprint,
        oracle: &O,
        config: GameConfig,
    ) -> Result<Self, GenerationError>
    where
        O: TemplateOracle + ?Sized,
    {
        let mut items = ItemArena::new();
        let mut levels = Vec::with_capacity(world.levels.len());
        let mut level_names = BTreeMap::new();
        let mut starts = Vec::with_capacity(world.levels.len());

        for (index, blueprint) in world.levels.iter().enumerate() {
            let id = LevelId(index as u32);
            if level_names.insert(blueprint.name.clone(), id).is_some() {
                return Err(GenerationError::DuplicateLevel(blueprint.name.clone()));
            }
            let generated = Level::generate(id, blueprint, oracle, &mut items, config.log_capacity)?;
            starts.push(generated.player_start);
            levels.push(generated.level);
        }

        let lookup = |name: &str| {
            level_names
                .get(name)
                .copied()
                .ok_or_else(|| GenerationError::UnknownLevel(name.to_owned()))
        };

        let current = lookup(&world.start_level)?;
        let start = starts[current.index()].ok_or_else(|| GenerationError::MissingPlayer {
            level: world.start_level.clone(),
        })?;

        for link in &world.portals {
            let from = lookup(&link.from_level)?;
            let to = lookup(&link.to_level)?;
            for (level, position) in [(from, link.from), (to, link.to)] {
                if !levels[level.index()].grid().contains(position) {
                    return Err(GenerationError::PortalOutOfBounds {
                        level: levels[level.index()].name().to_owned(),
                        position,
                    });
                }
            }
            if !levels[to.index()].can_walk(link.to) {
                return Err(GenerationError::UnwalkablePortal {
                    level: link.to_level.clone(),
                    position: link.to,
                });
            }
            levels[from.index()].link_portal(
                link.from,
                Portal {
                    level: to,
                    position: link.to,
                },
            );
        }

        let player = Character::from_template(ActorId::Player, oracle.player(), start);

        Ok(Self {
            config,
            levels,
            level_names,
            current,
            player,
            items,
            phase: TurnPhase::Idle,
            turn: 0,
            over: false,
        })
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id.index())
    }

    pub fn level_id(&self, name: &str) -> Option<LevelId> {
        self.level_names.get(name).copied()
    }

    pub fn current_level_id(&self) -> LevelId {
        self.current
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current.index()]
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn items(&self) -> &ItemArena {
        &self.items
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Number of inputs resolved so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// True once the player has died.
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            level: self.current_level().clone(),
            player: self.player.clone(),
            items: self.items.clone(),
            over: self.over,
        }
    }

    // ===== turn loop =====

    /// Computes the initial field of view and returns the first snapshot.
    pub fn start(&mut self) -> Snapshot {
        self.refresh_visibility();
        self.phase = TurnPhase::Published;
        self.snapshot()
    }

    /// Resolves one input. `Quit` leaves the world untouched.
    pub fn handle_input(&mut self, input: Input) -> TurnOutcome {
        if input.is_quit() {
            return TurnOutcome::Quit;
        }

        self.phase = TurnPhase::Idle;
        self.current_level_mut().clear_events();

        self.phase = TurnPhase::PlayerResolving;
        let consumed_turn = self.resolve_player(input);

        let monsters_act = consumed_turn
            || (self.config.inventory_actions_take_turn && !input.is_turn_action());
        if monsters_act && !self.over {
            self.phase = TurnPhase::MonstersResolving;
            self.update_monsters();
        }

        self.turn += 1;
        self.phase = TurnPhase::Published;
        TurnOutcome::Continue(Box::new(self.snapshot()))
    }

    // ===== internals =====

    fn current_level_mut(&mut self) -> &mut Level {
        let index = self.current.index();
        &mut self.levels[index]
    }

    fn refresh_visibility(&mut self) {
        let index = self.current.index();
        self.levels[index].refresh_visibility(&self.player, &self.config);
    }

    /// Moves the player through a portal, carrying this turn's events along.
    fn travel(&mut self, portal: Portal) {
        if portal.level.index() >= self.levels.len() {
            return;
        }
        let events = self.current_level_mut().take_events();
        self.current = portal.level;
        self.player.position = portal.position;

        let destination = self.current_level_mut();
        destination.extend_events(events);
        destination.push_event(EventKind::Portal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::blueprint::{LevelBlueprint, PortalLink};
    use crate::env::Catalog;
    use crate::state::Position;

    fn single(rows: &[&str]) -> Game {
        let world = WorldBlueprint::single(LevelBlueprint::new("test").with_rows(rows.iter().copied()));
        Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()).unwrap()
    }

    #[test]
    fn player_spawns_at_start_level_glyph() {
        let game = single(&["#####", "#..@#", "#####"]);
        assert_eq!(game.player().position, Position::new(3, 1));
        assert_eq!(game.player().hitpoints, 20);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn missing_player_is_fatal() {
        let world = WorldBlueprint::single(LevelBlueprint::new("empty").with_rows(["..."]));
        let error = Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()).unwrap_err();
        assert_eq!(error, GenerationError::MissingPlayer { level: "empty".into() });
    }

    #[test]
    fn unknown_start_level_is_fatal() {
        let world = WorldBlueprint::new("nowhere").with_level(LevelBlueprint::new("a").with_rows(["@"]));
        let error = Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()).unwrap_err();
        assert_eq!(error, GenerationError::UnknownLevel("nowhere".into()));
    }

    #[test]
    fn duplicate_level_names_are_rejected() {
        let world = WorldBlueprint::new("a")
            .with_level(LevelBlueprint::new("a").with_rows(["@"]))
            .with_level(LevelBlueprint::new("a").with_rows(["."]));
        assert!(matches!(
            Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()),
            Err(GenerationError::DuplicateLevel(name)) if name == "a"
        ));
    }

    #[test]
    fn portal_endpoints_must_be_inside_their_levels() {
        let world = WorldBlueprint::new("a")
            .with_level(LevelBlueprint::new("a").with_rows(["@.."]))
            .with_level(LevelBlueprint::new("b").with_rows(["..."]))
            .with_portal(PortalLink::new("a", Position::new(2, 0), "b", Position::new(9, 9)));
        assert!(matches!(
            Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()),
            Err(GenerationError::PortalOutOfBounds { level, .. }) if level == "b"
        ));
    }

    #[test]
    fn portals_must_not_land_in_walls() {
        let world = WorldBlueprint::new("a")
            .with_level(LevelBlueprint::new("a").with_rows(["@.."]))
            .with_level(LevelBlueprint::new("b").with_rows(["#..", "..."]))
            .with_portal(PortalLink::new("a", Position::new(2, 0), "b", Position::new(0, 0)));
        assert_eq!(
            Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()).unwrap_err(),
            GenerationError::UnwalkablePortal {
                level: "b".into(),
                position: Position::new(0, 0),
            }
        );
    }

    #[test]
    fn portals_may_land_on_stairs_over_resolved_floor() {
        let world = WorldBlueprint::new("a")
            .with_level(LevelBlueprint::new("a").with_rows(["@.>"]))
            .with_level(LevelBlueprint::new("b").with_rows(["%%%", "%<_", "%%%"]))
            .with_portal(PortalLink::new("a", Position::new(2, 0), "b", Position::new(1, 1)));
        let game = Game::from_blueprint(&world, &Catalog::builtin(), GameConfig::default()).unwrap();
        let lower = game.level(game.level_id("b").unwrap()).unwrap();
        assert!(lower.can_walk(Position::new(1, 1)));
    }

    #[test]
    fn quit_does_not_advance_the_turn() {
        let mut game = single(&["@.."]);
        game.start();
        assert_eq!(game.handle_input(Input::Quit), TurnOutcome::Quit);
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn every_other_input_publishes_a_snapshot() {
        let mut game = single(&["@.."]);
        game.start();
        let outcome = game.handle_input(Input::Move(Direction::Right));
        let snapshot = outcome.snapshot().unwrap();
        assert_eq!(snapshot.turn, 1);
        assert_eq!(snapshot.player.position, Position::new(1, 0));
        assert_eq!(game.phase(), TurnPhase::Published);
    }
}
