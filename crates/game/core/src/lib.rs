//! Deterministic dungeon simulation shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical rules (tiles, levels, combat, item
//! ownership, monster AI) and exposes pure APIs with no I/O. All turn
//! resolution flows through [`engine::Game`], which owns every level, the
//! player and the item arena, and publishes a [`engine::Snapshot`] per turn.
pub mod action;
pub mod blueprint;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod inventory;
pub mod level;
pub mod pathfinding;
pub mod state;
pub mod visibility;

pub use action::{Direction, Input};
pub use blueprint::{LevelBlueprint, Placement, PortalLink, WorldBlueprint};
pub use combat::AttackOutcome;
pub use config::GameConfig;
pub use engine::{Game, IntegrityError, Snapshot, TurnOutcome, TurnPhase};
pub use env::{Catalog, CharacterTemplate, ItemTemplate, StorageTemplate, TemplateOracle, TemplateRef};
pub use error::{ErrorSeverity, GameError, GenerationError};
pub use level::{EventKind, EventLog, Level, LivingIndex, Portal};
pub use state::{
    ActorId, Character, EquipSlot, Equipment, Grid, Item, ItemArena, ItemId, ItemKind,
    ItemLocation, LevelId, MonsterId, Overlay, Position, Storage, TerrainKind, Tile, TileFlags,
};
