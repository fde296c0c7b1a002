//! Authoritative world data types.
//!
//! This module owns the data structures that describe tiles, characters,
//! items and storages. Levels and the engine mutate them exclusively through
//! crate-internal operations that keep the ownership invariants intact.
pub mod types;

pub use types::{
    ActorId, Character, EquipSlot, Equipment, EquipmentBuilder, Grid, Item, ItemArena, ItemId,
    ItemKind, ItemLocation, LevelId, MonsterId, Neighbors, Overlay, Position, Storage,
    TerrainKind, Tile, TileFlags,
};
