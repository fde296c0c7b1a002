//! Read-only content consulted while generating levels.
//!
//! A [`TemplateOracle`] maps placement glyphs to monster, item and storage
//! templates. [`Catalog`] is the concrete oracle shipped with the crate; the
//! content crate can build one from a RON file.
mod catalog;
mod templates;

pub use catalog::Catalog;
pub use templates::{CharacterTemplate, ItemTemplate, StorageTemplate};

/// What a placement glyph stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TemplateRef<'a> {
    Player,
    Monster(&'a CharacterTemplate),
    Item(&'a ItemTemplate),
    Storage(&'a StorageTemplate),
}

/// Glyph lookup used during generation.
pub trait TemplateOracle: Send + Sync {
    fn player(&self) -> &CharacterTemplate;

    fn monster(&self, glyph: char) -> Option<&CharacterTemplate>;

    fn item(&self, glyph: char) -> Option<&ItemTemplate>;

    fn storage(&self, glyph: char) -> Option<&StorageTemplate>;

    /// Classifies a glyph. The player glyph wins over any other template that
    /// happens to share it.
    fn resolve(&self, glyph: char) -> Option<TemplateRef<'_>> {
        if glyph == self.player().glyph {
            return Some(TemplateRef::Player);
        }
        self.monster(glyph)
            .map(TemplateRef::Monster)
            .or_else(|| self.item(glyph).map(TemplateRef::Item))
            .or_else(|| self.storage(glyph).map(TemplateRef::Storage))
    }
}
