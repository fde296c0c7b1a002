//! Dungeon game client binary.
//!
//! This binary is the composition root that assembles:
//! 1. Content (maps, world links, catalog, config) via game-content loaders
//! 2. Runtime (game logic) via RuntimeBuilder
//! 3. Terminal front end reading commands from stdin
//!
//! # Examples
//!
//! ```bash
//! DUNGEON_MAPS_DIR=assets/maps RUST_LOG=runtime=debug cargo run -p dungeon-client
//! ```

mod config;
mod logging;
mod terminal;

use anyhow::Result;
use game_content::{CatalogLoader, ConfigLoader, WorldLoader};
use game_core::{Catalog, GameConfig};
use runtime::{Runtime, RuntimeConfig};

use config::CliConfig;
use terminal::StdinInputProvider;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging()?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Maps directory: {}", config.maps_dir.display());

    let world = WorldLoader::load_dir(&config.maps_dir)?;
    let catalog = match &config.catalog_path {
        Some(path) => CatalogLoader::load(path)?,
        None => Catalog::builtin(),
    };
    let game_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    tracing::debug!(levels = world.levels.len(), start = %world.start_level, "content loaded");

    let runtime_config = RuntimeConfig {
        game_config,
        event_buffer_size: config.event_buffer,
        command_buffer_size: config.command_buffer,
    };

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .world(world)
        .catalog(catalog)
        .input_provider(StdinInputProvider::new())
        .build()
        .await?;
    tracing::info!("Runtime built successfully");

    runtime.run().await?;
    runtime.shutdown().await?;

    tracing::info!("Dungeon client exited");
    Ok(())
}
