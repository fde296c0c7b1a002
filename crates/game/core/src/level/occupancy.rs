use std::collections::HashMap;

use crate::state::{MonsterId, Position};

/// Position-keyed index of living monsters.
///
/// Entries are added at generation, moved by monster steps and removed on
/// death. Nothing outside the crate can edit it, so it never drifts from the
/// monster list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LivingIndex {
    cells: HashMap<Position, MonsterId>,
}

impl LivingIndex {
    pub fn get(&self, position: Position) -> Option<MonsterId> {
        self.cells.get(&position).copied()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, MonsterId)> + '_ {
        self.cells.iter().map(|(position, monster)| (*position, *monster))
    }

    pub(crate) fn insert(&mut self, position: Position, monster: MonsterId) {
        self.cells.insert(position, monster);
    }

    /// Moves `monster` from `from` to `to`. Fails without touching the index
    /// if `to` is taken or `from` does not hold `monster`.
    pub(crate) fn relocate(&mut self, monster: MonsterId, from: Position, to: Position) -> bool {
        if self.cells.contains_key(&to) || self.get(from) != Some(monster) {
            return false;
        }
        self.cells.remove(&from);
        self.cells.insert(to, monster);
        true
    }

    pub(crate) fn remove(&mut self, position: Position, monster: MonsterId) -> bool {
        if self.get(position) == Some(monster) {
            self.cells.remove(&position);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocation_refuses_occupied_cells() {
        let mut index = LivingIndex::default();
        let (a, b) = (MonsterId(0), MonsterId(1));
        index.insert(Position::new(1, 1), a);
        index.insert(Position::new(2, 1), b);

        assert!(!index.relocate(a, Position::new(1, 1), Position::new(2, 1)));
        assert!(index.relocate(a, Position::new(1, 1), Position::new(1, 2)));
        assert_eq!(index.get(Position::new(1, 2)), Some(a));
        assert!(!index.is_occupied(Position::new(1, 1)));
    }

    #[test]
    fn remove_only_drops_the_matching_entry() {
        let mut index = LivingIndex::default();
        index.insert(Position::new(3, 3), MonsterId(4));
        assert!(!index.remove(Position::new(3, 3), MonsterId(5)));
        assert!(index.remove(Position::new(3, 3), MonsterId(4)));
        assert!(index.is_empty());
    }
}
