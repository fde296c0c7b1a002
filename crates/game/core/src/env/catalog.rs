use super::{CharacterTemplate, ItemTemplate, StorageTemplate, TemplateOracle};
use crate::state::ItemKind;

/// In-memory template catalog keyed by glyph.
///
/// Lookups are linear; catalogs hold a handful of entries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub player: CharacterTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters: Vec<CharacterTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub storages: Vec<StorageTemplate>,
}

impl Catalog {
    pub fn new(player: CharacterTemplate) -> Self {
        Self {
            player,
            monsters: Vec::new(),
            items: Vec::new(),
            storages: Vec::new(),
        }
    }

    /// The stock dungeon content: rats, spiders, three pieces of gear and a chest.
    pub fn builtin() -> Self {
        Self::new(CharacterTemplate::new("Player", '@', 20, 20, 1.0))
            .with_monster(CharacterTemplate::new("Rat", 'R', 5, 5, 2.0))
            .with_monster(CharacterTemplate::new("Spider", 'S', 10, 10, 1.0))
            .with_item(ItemTemplate::new("Sword", 's', ItemKind::Weapon, 2.0))
            .with_item(ItemTemplate::new("Helmet", 'h', ItemKind::Helmet, 0.1))
            .with_item(ItemTemplate::new("Armor", 'a', ItemKind::Armor, 0.2))
            .with_storage(StorageTemplate::new("Chest", '=', false))
    }

    pub fn with_monster(mut self, template: CharacterTemplate) -> Self {
        self.monsters.push(template);
        self
    }

    pub fn with_item(mut self, template: ItemTemplate) -> Self {
        self.items.push(template);
        self
    }

    pub fn with_storage(mut self, template: StorageTemplate) -> Self {
        self.storages.push(template);
        self
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateOracle for Catalog {
    fn player(&self) -> &CharacterTemplate {
        &self.player
    }

    fn monster(&self, glyph: char) -> Option<&CharacterTemplate> {
        self.monsters.iter().find(|template| template.glyph == glyph)
    }

    fn item(&self, glyph: char) -> Option<&ItemTemplate> {
        self.items.iter().find(|template| template.glyph == glyph)
    }

    fn storage(&self, glyph: char) -> Option<&StorageTemplate> {
        self.storages.iter().find(|template| template.glyph == glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TemplateRef;

    #[test]
    fn builtin_resolves_every_placement_glyph() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve('@'), Some(TemplateRef::Player));
        assert!(matches!(catalog.resolve('R'), Some(TemplateRef::Monster(rat)) if rat.speed == 2.0));
        assert!(matches!(catalog.resolve('S'), Some(TemplateRef::Monster(spider)) if spider.hitpoints == 10));
        assert!(matches!(catalog.resolve('s'), Some(TemplateRef::Item(sword)) if sword.kind == ItemKind::Weapon));
        assert!(matches!(catalog.resolve('='), Some(TemplateRef::Storage(chest)) if !chest.locked));
        assert_eq!(catalog.resolve('#'), None);
    }

    #[test]
    fn player_template_matches_stock_stats() {
        let player = Catalog::builtin().player;
        assert_eq!(player.hitpoints, 20);
        assert_eq!(player.strength, 20);
        assert_eq!(player.sight_range, 7);
    }
}
