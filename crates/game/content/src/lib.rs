//! Data-driven content and loaders.
//!
//! This crate turns files on disk into the data game-core consumes:
//! - Level maps (`*.map` text grids with an `ENTITIES:` section)
//! - World links (`world.txt`: start level plus portal rows)
//! - Template catalogs (RON)
//! - Game configuration (TOML)
//!
//! Loaders only produce blueprints and catalogs; generating levels from
//! them is game-core's job.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LoadResult, MapLoader, WorldLinks, WorldLoader,
};
