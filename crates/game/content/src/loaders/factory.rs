//! Content factory for building a game from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{Catalog, Game, GameConfig, WorldBlueprint};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, WorldLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional, defaults otherwise)
/// ├── catalog.ron     (optional, builtin templates otherwise)
/// └── maps/
///     ├── world.txt
///     ├── level1.map
///     └── level2.map
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const CATALOG_FILE: &'static str = "catalog.ron";
    pub const MAPS_DIR: &'static str = "maps";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the template catalog from `catalog.ron`, or the builtin one when absent.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let path = self.data_dir.join(Self::CATALOG_FILE);
        if !path.exists() {
            return Ok(Catalog::builtin());
        }
        CatalogLoader::load(&path)
    }

    /// Load every level and the world links from `maps/`.
    pub fn load_world(&self) -> LoadResult<WorldBlueprint> {
        WorldLoader::load_dir(&self.maps_dir())
    }

    /// Load everything and generate a ready-to-start game.
    pub fn build_game(&self) -> LoadResult<Game> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;
        let world = self.load_world()?;
        Game::from_blueprint(&world, &catalog, config)
            .with_context(|| format!("Failed to generate world from {}", self.maps_dir().display()))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn maps_dir(&self) -> PathBuf {
        self.data_dir.join(Self::MAPS_DIR)
    }
}
