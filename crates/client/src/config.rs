//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

/// Configuration required to bootstrap the runtime and the terminal loop.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub maps_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub command_buffer: usize,
    pub event_buffer: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            maps_dir: PathBuf::from("assets/maps"),
            catalog_path: None,
            config_path: None,
            command_buffer: runtime.command_buffer_size,
            event_buffer: runtime.event_buffer_size,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_MAPS_DIR` - Directory holding `*.map` files and `world.txt` (default: assets/maps)
    /// - `DUNGEON_CATALOG` - RON template catalog (default: builtin templates)
    /// - `DUNGEON_CONFIG` - TOML game configuration (default: builtin values)
    /// - `DUNGEON_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `DUNGEON_EVENT_BUFFER` - Turn event queue size (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DUNGEON_MAPS_DIR") {
            config.maps_dir = PathBuf::from(dir);
        }
        config.catalog_path = env::var("DUNGEON_CATALOG").ok().map(PathBuf::from);
        config.config_path = env::var("DUNGEON_CONFIG").ok().map(PathBuf::from);

        if let Some(capacity) = read_env::<usize>("DUNGEON_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("DUNGEON_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
