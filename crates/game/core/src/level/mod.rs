//! A single dungeon map and everything placed on it.
//!
//! [`Level`] aggregates the tile grid, monsters (living and dead), ground
//! item stacks, storages and outgoing portals, plus the rolling log and the
//! event kinds raised during the current turn. It exposes the movement and
//! interaction primitives the engine composes into turns.
mod generation;
mod log;
mod occupancy;

use std::collections::BTreeMap;

pub use log::{EventKind, EventLog};
pub use occupancy::LivingIndex;

use crate::config::GameConfig;
use crate::env::CharacterTemplate;
use crate::pathfinding;
use crate::state::{ActorId, Character, Grid, ItemId, LevelId, MonsterId, Position, Storage};
use crate::visibility;

/// Destination of a portal: a cell in some level of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portal {
    pub level: LevelId,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    id: LevelId,
    name: String,
    grid: Grid,
    monsters: Vec<Character>,
    living: LivingIndex,
    ground: BTreeMap<Position, Vec<ItemId>>,
    storages: BTreeMap<Position, Storage>,
    portals: BTreeMap<Position, Portal>,
    log: EventLog,
    events: Vec<EventKind>,
}

impl Level {
    pub(crate) fn new(id: LevelId, name: impl Into<String>, grid: Grid, log_capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            grid,
            monsters: Vec::new(),
            living: LivingIndex::default(),
            ground: BTreeMap::new(),
            storages: BTreeMap::new(),
            portals: BTreeMap::new(),
            log: EventLog::new(log_capacity),
            events: Vec::new(),
        }
    }

    // ===== read access =====

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every monster ever spawned here, corpses included.
    pub fn monsters(&self) -> &[Character] {
        &self.monsters
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Character> {
        self.monsters.get(id.index())
    }

    pub fn living(&self) -> &LivingIndex {
        &self.living
    }

    /// Living monster standing at `position`.
    pub fn monster_at(&self, position: Position) -> Option<(MonsterId, &Character)> {
        let id = self.living.get(position)?;
        self.monster(id).map(|monster| (id, monster))
    }

    pub fn living_monsters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.monsters.iter().filter(|monster| monster.is_alive())
    }

    pub fn corpses(&self) -> impl Iterator<Item = &Character> + '_ {
        self.monsters.iter().filter(|monster| !monster.is_alive())
    }

    /// Ground stack at `position`, bottom first.
    pub fn items_at(&self, position: Position) -> &[ItemId] {
        self.ground.get(&position).map(Vec::as_slice).unwrap_or_default()
    }

    /// Non-empty ground stacks.
    pub fn ground(&self) -> impl Iterator<Item = (Position, &[ItemId])> + '_ {
        self.ground
            .iter()
            .filter(|(_, stack)| !stack.is_empty())
            .map(|(position, stack)| (*position, stack.as_slice()))
    }

    pub fn storage_at(&self, position: Position) -> Option<&Storage> {
        self.storages.get(&position)
    }

    pub fn storages(&self) -> impl Iterator<Item = &Storage> + '_ {
        self.storages.values()
    }

    pub fn portal_at(&self, position: Position) -> Option<Portal> {
        self.portals.get(&position).copied()
    }

    pub fn portals(&self) -> impl Iterator<Item = (Position, Portal)> + '_ {
        self.portals.iter().map(|(position, portal)| (*position, *portal))
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Event kinds raised so far this turn.
    pub fn events(&self) -> &[EventKind] {
        &self.events
    }

    pub fn can_walk(&self, position: Position) -> bool {
        self.grid.can_walk(position)
    }

    // ===== turn bookkeeping =====

    pub(crate) fn push_event(&mut self, kind: EventKind) {
        self.events.push(kind);
    }

    pub(crate) fn record(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    pub(crate) fn take_events(&mut self) -> Vec<EventKind> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn extend_events(&mut self, events: Vec<EventKind>) {
        self.events.extend(events);
    }

    // ===== terrain =====

    /// Opens a closed door at `position`, raising `DoorOpen` on success.
    pub(crate) fn open_door(&mut self, position: Position) -> bool {
        let opened = self.grid.open_door(position);
        if opened {
            self.push_event(EventKind::DoorOpen);
        }
        opened
    }

    /// Closes an open door at `position`, raising `DoorClose` on success.
    pub(crate) fn close_door(&mut self, position: Position) -> bool {
        let closed = self.grid.close_door(position);
        if closed {
            self.push_event(EventKind::DoorClose);
        }
        closed
    }

    /// Rebuilds the visible set around `viewer`.
    pub(crate) fn refresh_visibility(&mut self, viewer: &Character, config: &GameConfig) {
        visibility::refresh(
            &mut self.grid,
            viewer.position,
            viewer.sight_range,
            config.sight_padding,
        );
    }

    /// Cheapest path between two cells. Cells held by living monsters cost
    /// `occupied_step_cost` to enter.
    pub fn path_to(&self, from: Position, to: Position, config: &GameConfig) -> Option<Vec<Position>> {
        let living = &self.living;
        let occupied = config.occupied_step_cost;
        pathfinding::find_path(&self.grid, from, to, |cell| {
            if living.is_occupied(cell) { occupied } else { 1 }
        })
    }

    // ===== monsters =====

    pub(crate) fn spawn_monster(&mut self, template: &CharacterTemplate, position: Position) -> MonsterId {
        let id = MonsterId(self.monsters.len() as u32);
        let actor = ActorId::Monster {
            level: self.id,
            monster: id,
        };
        let monster = Character::from_template(actor, template, position);
        if monster.is_alive() {
            self.living.insert(position, id);
        }
        self.monsters.push(monster);
        id
    }

    pub(crate) fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Character> {
        self.monsters.get_mut(id.index())
    }

    /// Steps a living monster onto `to`. Fails when `to` is not walkable or
    /// another living monster stands there.
    pub(crate) fn move_monster(&mut self, id: MonsterId, to: Position) -> bool {
        if !self.grid.can_walk(to) {
            return false;
        }
        let Some(monster) = self.monsters.get_mut(id.index()) else {
            return false;
        };
        if !monster.is_alive() || !self.living.relocate(id, monster.position, to) {
            return false;
        }
        monster.position = to;
        true
    }

    /// Drops a dead monster from the living index. The corpse stays in the
    /// monster list. Returns whether the monster was just buried.
    pub(crate) fn bury_if_dead(&mut self, id: MonsterId) -> bool {
        match self.monsters.get(id.index()) {
            Some(monster) if !monster.is_alive() => self.living.remove(monster.position, id),
            _ => false,
        }
    }

    // ===== item containers =====

    pub(crate) fn push_ground(&mut self, position: Position, item: ItemId) {
        self.ground.entry(position).or_default().push(item);
    }

    pub(crate) fn remove_ground(&mut self, position: Position, item: ItemId) -> bool {
        let Some(stack) = self.ground.get_mut(&position) else {
            return false;
        };
        let Some(index) = stack.iter().position(|held| *held == item) else {
            return false;
        };
        stack.remove(index);
        if stack.is_empty() {
            self.ground.remove(&position);
        }
        true
    }

    pub(crate) fn take_ground(&mut self, position: Position) -> Vec<ItemId> {
        self.ground.remove(&position).unwrap_or_default()
    }

    pub(crate) fn storage_at_mut(&mut self, position: Position) -> Option<&mut Storage> {
        self.storages.get_mut(&position)
    }

    pub(crate) fn insert_storage(&mut self, storage: Storage) {
        self.storages.insert(storage.position(), storage);
    }

    pub(crate) fn link_portal(&mut self, from: Position, portal: Portal) {
        self.portals.insert(from, portal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Tile;

    fn open_level(rows: &[&str]) -> Level {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut grid = Grid::new(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                if let Some(tile) = Tile::from_glyph(glyph) {
                    grid.set(Position::new(x as i32, y as i32), tile);
                }
            }
        }
        Level::new(LevelId(0), "test", grid, 25)
    }

    fn spawn_rat(level: &mut Level, x: i32, y: i32) -> MonsterId {
        let template = CharacterTemplate::new("Rat", 'R', 5, 5, 2.0);
        level.spawn_monster(&template, Position::new(x, y))
    }

    #[test]
    fn spawned_monsters_get_level_scoped_ids() {
        let mut level = open_level(&["....."]);
        let first = spawn_rat(&mut level, 0, 0);
        let second = spawn_rat(&mut level, 3, 0);
        assert_eq!(second, MonsterId(1));
        assert_eq!(
            level.monster(first).unwrap().actor,
            ActorId::Monster {
                level: LevelId(0),
                monster: MonsterId(0)
            }
        );
        assert_eq!(level.monster_at(Position::new(3, 0)).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn monsters_cannot_share_a_cell_or_enter_walls() {
        let mut level = open_level(&["..#.."]);
        let first = spawn_rat(&mut level, 0, 0);
        spawn_rat(&mut level, 1, 0);

        assert!(!level.move_monster(first, Position::new(1, 0)));
        assert!(!level.move_monster(first, Position::new(0, 1)));
        assert_eq!(level.monster(first).unwrap().position, Position::new(0, 0));
    }

    #[test]
    fn moving_a_monster_updates_the_living_index() {
        let mut level = open_level(&["....."]);
        let rat = spawn_rat(&mut level, 3, 0);
        assert!(level.move_monster(rat, Position::new(4, 0)));
        assert_eq!(level.living().get(Position::new(4, 0)), Some(rat));
        assert!(!level.living().is_occupied(Position::new(3, 0)));
    }

    #[test]
    fn buried_monsters_stay_as_corpses() {
        let mut level = open_level(&["....."]);
        let rat = spawn_rat(&mut level, 2, 0);
        assert!(!level.bury_if_dead(rat));

        level.monster_mut(rat).unwrap().hitpoints = 0;
        assert!(level.bury_if_dead(rat));
        assert!(level.living().is_empty());
        assert_eq!(level.monsters().len(), 1);
        assert_eq!(level.corpses().count(), 1);
        assert!(!level.move_monster(rat, Position::new(3, 0)));
    }

    #[test]
    fn door_toggles_raise_events() {
        let mut level = open_level(&[".|."]);
        let door = Position::new(1, 0);
        assert!(!level.close_door(door));
        assert!(level.open_door(door));
        assert!(level.close_door(door));
        assert_eq!(level.events(), &[EventKind::DoorOpen, EventKind::DoorClose]);
    }

    #[test]
    fn path_prefers_free_cells_over_crowds() {
        let mut level = open_level(&["...", "...", "..."]);
        spawn_rat(&mut level, 1, 0);
        let config = GameConfig::default();
        let path = level
            .path_to(Position::new(0, 0), Position::new(2, 0), &config)
            .unwrap();
        assert!(!path.contains(&Position::new(1, 0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn empty_ground_stacks_disappear() {
        let mut level = open_level(&["..."]);
        let cell = Position::new(1, 0);
        level.push_ground(cell, ItemId(7));
        assert_eq!(level.items_at(cell), &[ItemId(7)]);
        assert!(level.remove_ground(cell, ItemId(7)));
        assert!(!level.remove_ground(cell, ItemId(7)));
        assert_eq!(level.ground().count(), 0);
    }
}
