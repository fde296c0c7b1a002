//! Content loaders for reading game data from files.
//!
//! Every loader has a `parse` entry point over text and a `load` entry point
//! over a path. Errors carry the offending file and line.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod map;
pub mod world;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use world::{WorldLinks, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
