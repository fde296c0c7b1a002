//! Item transfers between the ground, a character and storages.
//!
//! Every transfer removes the item from its source container before adding
//! it to the destination and updates the item's [`ItemLocation`] in the same
//! step, so an item is always referenced from exactly one place. Failed
//! transfers leave everything untouched and return `false`.

use crate::level::Level;
use crate::state::{Character, ItemArena, ItemId, ItemLocation};

impl Character {
    fn carried(&self) -> ItemLocation {
        ItemLocation::Carried { owner: self.actor }
    }

    fn remove_from_inventory(&mut self, item: ItemId) -> bool {
        match self.inventory.iter().position(|held| *held == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }

    /// Picks `item` up from the ground stack under the character.
    pub fn take_item(&mut self, level: &mut Level, items: &mut ItemArena, item: ItemId) -> bool {
        if !level.remove_ground(self.position, item) {
            return false;
        }
        self.inventory.push(item);
        items.relocate(item, self.carried());
        true
    }

    /// Picks up the whole ground stack under the character. Returns how many
    /// items were taken.
    pub fn take_all(&mut self, level: &mut Level, items: &mut ItemArena) -> usize {
        let stack = level.items_at(self.position).to_vec();
        let mut taken = 0;
        for item in stack {
            if self.take_item(level, items, item) {
                taken += 1;
            }
        }
        taken
    }

    /// Puts `item` on the ground under the character, taking it off first
    /// if it is equipped.
    pub fn drop_item(&mut self, level: &mut Level, items: &mut ItemArena, item: ItemId) -> bool {
        self.strip_equipped(items, item);
        if !self.remove_from_inventory(item) {
            return false;
        }
        level.push_ground(self.position, item);
        items.relocate(
            item,
            ItemLocation::Ground {
                level: level.id(),
                position: self.position,
            },
        );
        true
    }

    /// Moves `item` from the inventory into the unlocked storage under the
    /// character.
    pub fn store_item(&mut self, level: &mut Level, items: &mut ItemArena, item: ItemId) -> bool {
        let location = ItemLocation::Stored {
            level: level.id(),
            position: self.position,
        };
        let Some(storage) = level.storage_at_mut(self.position) else {
            return false;
        };
        if storage.is_locked() || !self.holds(item) {
            return false;
        }
        self.remove_from_inventory(item);
        storage.push(item);
        items.relocate(item, location);
        true
    }

    /// Moves `item` from the unlocked storage under the character into the
    /// inventory.
    pub fn withdraw_item(&mut self, level: &mut Level, items: &mut ItemArena, item: ItemId) -> bool {
        let Some(storage) = level.storage_at_mut(self.position) else {
            return false;
        };
        if storage.is_locked() || !storage.remove(item) {
            return false;
        }
        self.inventory.push(item);
        items.relocate(item, self.carried());
        true
    }

    /// Equips an inventory item in the slot its kind dictates. The previous
    /// occupant takes the item's place in the inventory.
    ///
    /// Equipping an item that already sits in its slot is a successful no-op.
    /// Items of kind `Other` cannot be equipped.
    pub fn equip(&mut self, items: &mut ItemArena, item: ItemId) -> bool {
        let Some(slot) = items.get(item).and_then(|found| found.kind.slot()) else {
            return false;
        };
        if self.equipment.get(slot) == Some(item) {
            return true;
        }
        let Some(index) = self.inventory.iter().position(|held| *held == item) else {
            return false;
        };

        match self.equipment.replace(slot, item) {
            Some(previous) => {
                self.inventory[index] = previous;
                items.relocate(previous, self.carried());
            }
            None => {
                self.inventory.remove(index);
            }
        }
        items.relocate(
            item,
            ItemLocation::Equipped {
                owner: self.actor,
                slot,
            },
        );
        true
    }

    /// Takes `item` off and appends it to the inventory. Returns false when
    /// no slot holds it.
    pub fn strip_equipped(&mut self, items: &mut ItemArena, item: ItemId) -> bool {
        let Some(slot) = self.equipment.slot_of(item) else {
            return false;
        };
        self.equipment.take(slot);
        self.inventory.push(item);
        items.relocate(item, self.carried());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::LevelBlueprint;
    use crate::env::Catalog;
    use crate::state::{ActorId, EquipSlot, ItemKind, LevelId, Position};

    struct Fixture {
        level: Level,
        items: ItemArena,
        player: Character,
    }

    fn fixture(blueprint: LevelBlueprint) -> Fixture {
        let catalog = Catalog::builtin();
        let mut items = ItemArena::new();
        let generated = Level::generate(LevelId(0), &blueprint, &catalog, &mut items, 25).unwrap();
        let start = generated.player_start.unwrap();
        Fixture {
            level: generated.level,
            items,
            player: Character::from_template(ActorId::Player, &catalog.player, start),
        }
    }

    fn gear_room() -> Fixture {
        fixture(
            LevelBlueprint::new("armory")
                .with_rows(["....."])
                .with_placement('@', 1, 0)
                .with_placement('s', 1, 0)
                .with_placement('h', 1, 0)
                .with_placement('s', 1, 0),
        )
    }

    #[test]
    fn take_then_drop_returns_item_to_the_ground() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = gear_room();
        let sword = level.items_at(player.position)[0];

        assert!(player.take_item(&mut level, &mut items, sword));
        assert!(player.holds(sword));
        assert!(!level.items_at(player.position).contains(&sword));
        assert!(!player.take_item(&mut level, &mut items, sword));

        player.position = Position::new(3, 0);
        assert!(player.drop_item(&mut level, &mut items, sword));
        assert!(!player.holds(sword));
        assert_eq!(level.items_at(Position::new(3, 0)), &[sword]);
        assert_eq!(items.get(sword).unwrap().position(), Some(Position::new(3, 0)));
    }

    #[test]
    fn take_all_empties_the_stack() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = gear_room();
        assert_eq!(player.take_all(&mut level, &mut items), 3);
        assert!(level.items_at(player.position).is_empty());
        assert_eq!(player.inventory.len(), 3);
        assert_eq!(player.take_all(&mut level, &mut items), 0);
    }

    #[test]
    fn equip_swaps_the_previous_item_into_the_same_index() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = gear_room();
        player.take_all(&mut level, &mut items);
        let [first_sword, helmet, second_sword] = player.inventory[..] else {
            panic!("expected three items");
        };

        assert!(player.equip(&mut items, first_sword));
        assert_eq!(player.inventory, vec![helmet, second_sword]);
        assert!(player.equip(&mut items, second_sword));
        assert_eq!(player.inventory, vec![helmet, first_sword]);
        assert_eq!(player.equipment.get(EquipSlot::Weapon), Some(second_sword));
        assert!(matches!(
            items.get(second_sword).unwrap().location(),
            ItemLocation::Equipped {
                slot: EquipSlot::Weapon,
                ..
            }
        ));
    }

    #[test]
    fn equipping_twice_is_a_no_op() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = gear_room();
        player.take_all(&mut level, &mut items);
        let helmet = player.inventory[1];

        assert!(player.equip(&mut items, helmet));
        let before = player.clone();
        assert!(player.equip(&mut items, helmet));
        assert_eq!(player, before);
    }

    #[test]
    fn other_items_cannot_be_equipped() {
        let Fixture {
            mut items,
            mut player,
            ..
        } = gear_room();
        let rock = items.spawn(
            "Rock",
            'r',
            ItemKind::Other,
            1.0,
            ItemLocation::Carried {
                owner: ActorId::Player,
            },
        );
        player.inventory.push(rock);
        assert!(!player.equip(&mut items, rock));
        assert!(player.holds(rock));
    }

    #[test]
    fn dropping_an_equipped_item_takes_it_off_first() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = gear_room();
        player.take_all(&mut level, &mut items);
        let helmet = player.inventory[1];
        player.equip(&mut items, helmet);

        assert!(player.drop_item(&mut level, &mut items, helmet));
        assert_eq!(player.equipment.get(EquipSlot::Helmet), None);
        assert!(!player.holds(helmet));
        assert!(level.items_at(player.position).contains(&helmet));
    }

    #[test]
    fn strip_appends_to_the_inventory() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = gear_room();
        player.take_all(&mut level, &mut items);
        let sword = player.inventory[0];
        player.equip(&mut items, sword);

        assert!(player.strip_equipped(&mut items, sword));
        assert_eq!(player.inventory.last(), Some(&sword));
        assert!(!player.strip_equipped(&mut items, sword));
    }

    #[test]
    fn storage_round_trip_requires_an_unlocked_chest_underfoot() {
        let Fixture {
            mut level,
            mut items,
            mut player,
        } = fixture(
            LevelBlueprint::new("vault")
                .with_rows(["....."])
                .with_placement('@', 2, 0)
                .with_placement('a', 2, 0)
                .with_placement('=', 4, 0),
        );
        player.take_all(&mut level, &mut items);
        let armor = player.inventory[0];

        assert!(!player.store_item(&mut level, &mut items, armor));

        player.position = Position::new(4, 0);
        assert!(player.store_item(&mut level, &mut items, armor));
        assert!(!player.holds(armor));
        assert!(level.storage_at(player.position).unwrap().contains(armor));
        assert!(!player.store_item(&mut level, &mut items, armor));

        level.storage_at_mut(player.position).unwrap().set_locked(true);
        assert!(!player.withdraw_item(&mut level, &mut items, armor));

        level.storage_at_mut(player.position).unwrap().set_locked(false);
        assert!(player.withdraw_item(&mut level, &mut items, armor));
        assert!(player.holds(armor));
        assert!(level.storage_at(player.position).unwrap().items().is_empty());
    }
}
