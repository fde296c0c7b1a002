pub mod actor;
pub mod common;
pub mod grid;
pub mod item;
pub mod storage;
pub mod tile;

// Re-export actor-related types
pub use actor::{Character, Equipment, EquipmentBuilder};

// Re-export common types
pub use common::{ActorId, ItemId, LevelId, MonsterId, Position};

// Re-export grid and tile types
pub use grid::{Grid, Neighbors};
pub use tile::{Overlay, TerrainKind, Tile, TileFlags};

// Re-export item and container types
pub use item::{EquipSlot, Item, ItemArena, ItemKind, ItemLocation};
pub use storage::Storage;
