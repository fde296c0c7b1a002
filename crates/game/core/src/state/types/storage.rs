use super::{ItemId, Position};

/// A lockable container of items fixed at a grid position (a chest).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Storage {
    pub name: String,
    pub glyph: char,
    position: Position,
    locked: bool,
    items: Vec<ItemId>,
}

impl Storage {
    pub fn new(name: impl Into<String>, glyph: char, position: Position, locked: bool) -> Self {
        Self {
            name: name.into(),
            glyph,
            position,
            locked,
            items: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    #[cfg(test)]
    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub(crate) fn push(&mut self, item: ItemId) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, item: ItemId) -> bool {
        match self.items.iter().position(|held| *held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}
