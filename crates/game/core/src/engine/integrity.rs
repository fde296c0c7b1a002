//! Whole-world consistency checks.
//!
//! Verifies the two ownership invariants the engine maintains: every item is
//! referenced from exactly one container matching its location tag, and the
//! living-monster index holds precisely the living monsters at their cells.

use std::collections::HashMap;

use super::Game;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Character, ItemId, ItemLocation, LevelId, MonsterId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("living monster {monster} of level {level} at {position} is missing from the index")]
    UnindexedMonster {
        level: LevelId,
        monster: MonsterId,
        position: Position,
    },

    #[error("index entry {position} in level {level} points at {monster}, which is dead or elsewhere")]
    StaleIndexEntry {
        level: LevelId,
        monster: MonsterId,
        position: Position,
    },

    #[error("item {item} is not held by any container")]
    OrphanItem { item: ItemId },

    #[error("item {item} is held by {count} containers")]
    SharedItem { item: ItemId, count: usize },

    #[error("item {item} is tagged {tagged:?} but held by {found:?}")]
    LocationMismatch {
        item: ItemId,
        tagged: ItemLocation,
        found: ItemLocation,
    },
}

impl GameError for IntegrityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnindexedMonster { .. } => "INTEGRITY_UNINDEXED_MONSTER",
            Self::StaleIndexEntry { .. } => "INTEGRITY_STALE_INDEX_ENTRY",
            Self::OrphanItem { .. } => "INTEGRITY_ORPHAN_ITEM",
            Self::SharedItem { .. } => "INTEGRITY_SHARED_ITEM",
            Self::LocationMismatch { .. } => "INTEGRITY_LOCATION_MISMATCH",
        }
    }
}

fn collect_held(character: &Character, holders: &mut HashMap<ItemId, Vec<ItemLocation>>) {
    for item in &character.inventory {
        holders
            .entry(*item)
            .or_default()
            .push(ItemLocation::Carried {
                owner: character.actor,
            });
    }
    for (slot, item) in character.equipment.iter() {
        holders
            .entry(item)
            .or_default()
            .push(ItemLocation::Equipped {
                owner: character.actor,
                slot,
            });
    }
}

impl Game {
    /// Checks both ownership invariants across every level.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        self.check_living_index()?;
        self.check_item_ownership()
    }

    fn check_living_index(&self) -> Result<(), IntegrityError> {
        for level in &self.levels {
            for (index, monster) in level.monsters().iter().enumerate() {
                let id = MonsterId(index as u32);
                if monster.is_alive() && level.living().get(monster.position) != Some(id) {
                    return Err(IntegrityError::UnindexedMonster {
                        level: level.id(),
                        monster: id,
                        position: monster.position,
                    });
                }
            }
            for (position, id) in level.living().iter() {
                let consistent = level
                    .monster(id)
                    .is_some_and(|monster| monster.is_alive() && monster.position == position);
                if !consistent {
                    return Err(IntegrityError::StaleIndexEntry {
                        level: level.id(),
                        monster: id,
                        position,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_item_ownership(&self) -> Result<(), IntegrityError> {
        let mut holders: HashMap<ItemId, Vec<ItemLocation>> = HashMap::new();

        collect_held(&self.player, &mut holders);
        for level in &self.levels {
            for monster in level.monsters() {
                collect_held(monster, &mut holders);
            }
            for (position, stack) in level.ground() {
                for item in stack {
                    holders.entry(*item).or_default().push(ItemLocation::Ground {
                        level: level.id(),
                        position,
                    });
                }
            }
            for storage in level.storages() {
                for item in storage.items() {
                    holders.entry(*item).or_default().push(ItemLocation::Stored {
                        level: level.id(),
                        position: storage.position(),
                    });
                }
            }
        }

        for item in self.items.iter() {
            match holders.get(&item.id).map(Vec::as_slice) {
                None | Some([]) => return Err(IntegrityError::OrphanItem { item: item.id }),
                Some([found]) if *found != item.location() => {
                    return Err(IntegrityError::LocationMismatch {
                        item: item.id,
                        tagged: item.location(),
                        found: *found,
                    });
                }
                Some([_]) => {}
                Some(many) => {
                    return Err(IntegrityError::SharedItem {
                        item: item.id,
                        count: many.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
