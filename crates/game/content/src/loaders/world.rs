//! World file and map directory loader.
//!
//! `world.txt` is comma-separated. The first row names the start level; each
//! following row links a portal cell to its destination:
//!
//! ```text
//! level1
//! level1,15,2,level2,1,1
//! level2,1,1,level1,15,2
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use game_core::{LevelBlueprint, Position, PortalLink, WorldBlueprint};

use crate::loaders::{LoadResult, MapLoader, read_file};

/// File name of the world links inside a map directory.
pub const WORLD_FILE: &str = "world.txt";

const MAP_EXTENSION: &str = "map";
const PORTAL_FIELDS: usize = 6;

/// Start level and portal links parsed from a world file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldLinks {
    pub start_level: String,
    pub portals: Vec<PortalLink>,
}

/// Loader for world files and whole map directories.
pub struct WorldLoader;

impl WorldLoader {
    /// Load a world file.
    pub fn load(path: &Path) -> LoadResult<WorldLinks> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse world {}", path.display()))
    }

    /// Parse world text. Blank lines are ignored.
    pub fn parse(text: &str) -> LoadResult<WorldLinks> {
        let mut rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, first)) = rows.next() else {
            bail!("world file names no start level");
        };
        let start_level = first
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned();
        if start_level.is_empty() {
            bail!("world file names no start level");
        }

        let mut portals = Vec::new();
        for (index, line) in rows {
            let portal = parse_portal(line)
                .with_context(|| format!("Invalid portal on line {}: {:?}", index + 1, line))?;
            portals.push(portal);
        }

        Ok(WorldLinks {
            start_level,
            portals,
        })
    }

    /// Load every `*.map` file in `dir` plus its `world.txt`.
    ///
    /// Levels are ordered by file name so generation is reproducible.
    pub fn load_dir(dir: &Path) -> LoadResult<WorldBlueprint> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read map directory {}: {}", dir.display(), e))?;

        let mut map_paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list map directory {}", dir.display()))?
                .path();
            if path.extension().is_some_and(|ext| ext == MAP_EXTENSION) {
                map_paths.push(path);
            }
        }
        map_paths.sort();

        let levels = map_paths
            .iter()
            .map(|path| MapLoader::load(path))
            .collect::<LoadResult<Vec<LevelBlueprint>>>()?;
        let links = Self::load(&dir.join(WORLD_FILE))?;

        Ok(WorldBlueprint {
            levels,
            start_level: links.start_level,
            portals: links.portals,
        })
    }
}

fn parse_portal(line: &str) -> LoadResult<PortalLink> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != PORTAL_FIELDS {
        bail!("expected {} fields, found {}", PORTAL_FIELDS, fields.len());
    }

    let from = parse_position(fields[1], fields[2])?;
    let to = parse_position(fields[4], fields[5])?;
    Ok(PortalLink::new(fields[0], from, fields[3], to))
}

fn parse_position(x: &str, y: &str) -> LoadResult<Position> {
    let x = x
        .parse()
        .with_context(|| format!("x coordinate {:?} is not an integer", x))?;
    let y = y
        .parse()
        .with_context(|| format!("y coordinate {:?} is not an integer", y))?;
    Ok(Position::new(x, y))
}
