//! Resolution of the player's half of a turn.

use super::Game;
use crate::action::Input;
use crate::level::{EventKind, Level};
use crate::state::{Character, ItemArena, MonsterId, Position};

impl Game {
    /// Applies `input` for the player. Returns whether it cost the player
    /// their turn, letting monsters act.
    pub(super) fn resolve_player(&mut self, input: Input) -> bool {
        let event = match input {
            Input::Move(_) | Input::Action(_) if self.over => return false,
            Input::Move(direction) => {
                self.resolve_movement(self.player.position.step(direction));
                return true;
            }
            Input::Action(direction) => {
                self.resolve_action(self.player.position.step(direction));
                return true;
            }
            Input::TakeItem(item) => self.with_player_and_level(|player, level, items| {
                player.take_item(level, items, item)
            })
            .then_some(EventKind::PickUp),
            Input::TakeAllAtFeet => self
                .with_player_and_level(|player, level, items| player.take_all(level, items) > 0)
                .then_some(EventKind::PickUp),
            Input::DropItem(item) => self.with_player_and_level(|player, level, items| {
                player.drop_item(level, items, item)
            })
            .then_some(EventKind::DropDown),
            Input::StoreItem(item) => self.with_player_and_level(|player, level, items| {
                player.store_item(level, items, item)
            })
            .then_some(EventKind::DropDown),
            Input::WithdrawItem(item) => self.with_player_and_level(|player, level, items| {
                player.withdraw_item(level, items, item)
            })
            .then_some(EventKind::PickUp),
            Input::EquipItem(item) => self
                .player
                .equip(&mut self.items, item)
                .then_some(EventKind::Equip),
            Input::TakeOffItem(item) => self
                .player
                .strip_equipped(&mut self.items, item)
                .then_some(EventKind::TakeOff),
            Input::Quit => None,
        };

        if let Some(event) = event {
            self.current_level_mut().push_event(event);
        }
        false
    }

    fn with_player_and_level<R>(
        &mut self,
        apply: impl FnOnce(&mut Character, &mut Level, &mut ItemArena) -> R,
    ) -> R {
        let index = self.current.index();
        apply(&mut self.player, &mut self.levels[index], &mut self.items)
    }

    /// Step into `target`: attack a living monster there, walk onto it, or
    /// try to open a closed door.
    fn resolve_movement(&mut self, target: Position) {
        let index = self.current.index();
        if let Some(monster) = self.levels[index].living().get(target) {
            self.player_attacks(monster);
            return;
        }

        if self.levels[index].can_walk(target) {
            self.player.position = target;
            self.levels[index].push_event(EventKind::Move);
            if let Some(portal) = self.levels[index].portal_at(target) {
                self.travel(portal);
            }
        } else {
            self.levels[index].open_door(target);
        }
        self.refresh_visibility();
    }

    /// Use `target`: attack a living monster there, or toggle a door.
    fn resolve_action(&mut self, target: Position) {
        let index = self.current.index();
        if let Some(monster) = self.levels[index].living().get(target) {
            self.player_attacks(monster);
            return;
        }

        let level = &mut self.levels[index];
        if level.open_door(target) || level.close_door(target) {
            self.refresh_visibility();
        }
    }

    fn player_attacks(&mut self, id: MonsterId) {
        let index = self.current.index();
        let level = &mut self.levels[index];
        let Some(monster) = level.monster_mut(id) else {
            return;
        };

        let outcome = self.player.attack(monster, &self.items);
        level.push_event(EventKind::Attack);
        level.record(outcome.description);
        if outcome.killed {
            level.bury_if_dead(id);
        }
    }
}
