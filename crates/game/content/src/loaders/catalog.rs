//! Template catalog loader.
//!
//! Catalogs are RON documents mirroring [`game_core::Catalog`]:
//!
//! ```ron
//! (
//!     player: (name: "Player", glyph: '@', hitpoints: 20, strength: 20, speed: 1.0),
//!     monsters: [
//!         (name: "Rat", glyph: 'R', hitpoints: 5, strength: 5, speed: 2.0),
//!     ],
//!     items: [
//!         (name: "Sword", glyph: 's', kind: Weapon, power: 2.0),
//!     ],
//!     storages: [
//!         (name: "Chest", glyph: '=', locked: false),
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::bail;
use game_core::Catalog;

use crate::loaders::{LoadResult, read_file};

/// Loader for RON template catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))
    }

    /// Parse a catalog from RON text.
    ///
    /// Glyphs must be unique across every template kind, otherwise a map
    /// glyph would resolve ambiguously.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let catalog: Catalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        validate(&catalog)?;
        Ok(catalog)
    }
}

fn validate(catalog: &Catalog) -> LoadResult<()> {
    let glyphs = std::iter::once(catalog.player.glyph)
        .chain(catalog.monsters.iter().map(|t| t.glyph))
        .chain(catalog.items.iter().map(|t| t.glyph))
        .chain(catalog.storages.iter().map(|t| t.glyph));

    let mut seen = std::collections::BTreeSet::new();
    for glyph in glyphs {
        if !seen.insert(glyph) {
            bail!("glyph {:?} is defined more than once", glyph);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CharacterTemplate, ItemKind};

    #[test]
    fn parses_a_full_catalog() {
        let catalog = CatalogLoader::parse(
            r#"(
                player: (name: "Hero", glyph: '@', hitpoints: 30, strength: 12, speed: 1.0),
                monsters: [(name: "Ogre", glyph: 'G', hitpoints: 50, strength: 30, speed: 0.5, sight_range: 4)],
                items: [(name: "Club", glyph: 'c', kind: Weapon, power: 1.5)],
                storages: [(name: "Crate", glyph: '=', locked: true)],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.player.name, "Hero");
        assert_eq!(catalog.monsters[0].sight_range, 4);
        assert_eq!(catalog.items[0].kind, ItemKind::Weapon);
        assert!(catalog.storages[0].locked);
    }

    #[test]
    fn optional_fields_take_defaults() {
        let catalog = CatalogLoader::parse(
            r#"(player: (name: "Hero", glyph: '@', hitpoints: 30, strength: 12, speed: 1.0))"#,
        )
        .unwrap();

        assert_eq!(catalog.player.sight_range, CharacterTemplate::DEFAULT_SIGHT_RANGE);
        assert!(catalog.monsters.is_empty());
        assert!(catalog.storages.is_empty());
    }

    #[test]
    fn duplicate_glyphs_are_rejected() {
        let result = CatalogLoader::parse(
            r#"(
                player: (name: "Hero", glyph: '@', hitpoints: 30, strength: 12, speed: 1.0),
                monsters: [(name: "Rat", glyph: 's', hitpoints: 5, strength: 5, speed: 2.0)],
                items: [(name: "Sword", glyph: 's', kind: Weapon, power: 2.0)],
            )"#,
        );
        assert!(result.is_err());
    }
}
