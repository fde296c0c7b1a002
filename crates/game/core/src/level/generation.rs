//! Text-to-grid conversion of a [`LevelBlueprint`].
//!
//! Terrain glyphs become tiles directly. Any other glyph must name a catalog
//! template; its cell becomes pending floor and the entity is placed there.
//! Pending floors are resolved once the whole grid exists, then
//! grid-embedded entities are placed followed by the explicit placements.

use super::Level;
use crate::blueprint::{LevelBlueprint, Placement};
use crate::env::{TemplateOracle, TemplateRef};
use crate::error::GenerationError;
use crate::state::{Grid, ItemArena, ItemLocation, LevelId, Position, Storage, Tile};

/// A generated level and where its map put the player, if anywhere.
#[derive(Debug)]
pub(crate) struct GeneratedLevel {
    pub level: Level,
    pub player_start: Option<Position>,
}

impl Level {
    pub(crate) fn generate<O>(
        id: LevelId,
        blueprint: &LevelBlueprint,
        oracle: &O,
        items: &mut ItemArena,
        log_capacity: usize,
    ) -> Result<GeneratedLevel, GenerationError>
    where
        O: TemplateOracle + ?Sized,
    {
        let width = blueprint.width();
        let height = blueprint.height();
        if width == 0 || height == 0 {
            return Err(GenerationError::EmptyMap {
                level: blueprint.name.clone(),
            });
        }

        let mut grid = Grid::new(width as u32, height as u32);
        let mut embedded = Vec::new();
        for (y, row) in blueprint.rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let tile = match Tile::from_glyph(glyph) {
                    Some(tile) => tile,
                    None if oracle.resolve(glyph).is_some() => {
                        embedded.push(Placement::new(glyph, position));
                        Tile::entity_floor()
                    }
                    None => {
                        return Err(GenerationError::UnknownGlyph {
                            level: blueprint.name.clone(),
                            glyph,
                            position,
                        });
                    }
                };
                grid.set(position, tile);
            }
        }
        grid.resolve_pending_floors();

        let mut level = Level::new(id, blueprint.name.clone(), grid, log_capacity);
        let mut player_start = None;
        for placement in embedded.iter().chain(&blueprint.placements) {
            if let Some(position) = level.place(*placement, player_start, oracle, items)? {
                player_start = Some(position);
            }
        }

        Ok(GeneratedLevel {
            level,
            player_start,
        })
    }

    /// Spawns the entity a placement names. Returns the position for a
    /// player placement.
    ///
    /// The player and monsters need a walkable cell that no other actor
    /// holds. Items and storages only need to be inside the grid.
    fn place<O>(
        &mut self,
        placement: Placement,
        player_start: Option<Position>,
        oracle: &O,
        items: &mut ItemArena,
    ) -> Result<Option<Position>, GenerationError>
    where
        O: TemplateOracle + ?Sized,
    {
        let Placement { glyph, position } = placement;
        if !self.grid.contains(position) {
            return Err(GenerationError::PlacementOutOfBounds {
                level: self.name.clone(),
                glyph,
                position,
            });
        }

        let Some(template) = oracle.resolve(glyph) else {
            return Err(GenerationError::UnknownGlyph {
                level: self.name.clone(),
                glyph,
                position,
            });
        };

        if matches!(template, TemplateRef::Player | TemplateRef::Monster(_)) {
            if !self.grid.can_walk(position) {
                return Err(GenerationError::UnwalkablePlacement {
                    level: self.name.clone(),
                    glyph,
                    position,
                });
            }
            let taken_by_player =
                matches!(template, TemplateRef::Monster(_)) && player_start == Some(position);
            if taken_by_player || self.living.is_occupied(position) {
                return Err(GenerationError::OccupiedPlacement {
                    level: self.name.clone(),
                    glyph,
                    position,
                });
            }
        }

        match template {
            TemplateRef::Player => return Ok(Some(position)),
            TemplateRef::Monster(template) => {
                self.spawn_monster(template, position);
            }
            TemplateRef::Item(template) => {
                let location = ItemLocation::Ground {
                    level: self.id,
                    position,
                };
                let item = items.spawn(
                    template.name.clone(),
                    template.glyph,
                    template.kind,
                    template.power,
                    location,
                );
                self.push_ground(position, item);
            }
            TemplateRef::Storage(template) => {
                // A chest swallows whatever was already lying on its cell.
                let mut storage =
                    Storage::new(template.name.clone(), template.glyph, position, template.locked);
                for item in self.take_ground(position) {
                    items.relocate(
                        item,
                        ItemLocation::Stored {
                            level: self.id,
                            position,
                        },
                    );
                    storage.push(item);
                }
                self.insert_storage(storage);
            }
        }
        Ok(None)
    }
}
