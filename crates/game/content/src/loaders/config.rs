//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load GameConfig from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    /// Parse GameConfig from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        let capacity = config.log_capacity;
        Ok(config.with_log_capacity(capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("inventory_actions_take_turn = true\n").unwrap();
        assert!(config.inventory_actions_take_turn);
        assert_eq!(config.log_capacity, GameConfig::DEFAULT_LOG_CAPACITY);
        assert_eq!(config.occupied_step_cost, GameConfig::DEFAULT_OCCUPIED_STEP_COST);
    }

    #[test]
    fn zero_log_capacity_is_raised_to_one() {
        let config = ConfigLoader::parse("log_capacity = 0\n").unwrap();
        assert_eq!(config.log_capacity, 1);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(ConfigLoader::parse("sight_padding = \"wide\"\n").is_err());
    }
}
