//! Level map loader.
//!
//! A map file is a block of terrain rows, optionally followed by a line
//! reading exactly `ENTITIES:` and one `glyph,x,y` placement per line.
//!
//! ```text
//! #######
//! #..@..#
//! #.|.R.#
//! #######
//! ENTITIES:
//! s,1,1
//! =,5,2
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use game_core::{LevelBlueprint, Placement, Position};

use crate::loaders::{LoadResult, read_file};

const ENTITIES_MARKER: &str = "ENTITIES:";

/// Loader for `.map` text files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map file. The level is named after the file stem.
    pub fn load(path: &Path) -> LoadResult<LevelBlueprint> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("Map path {} has no usable file name", path.display()))?;
        let content = read_file(path)?;
        Self::parse(name, &content).with_context(|| format!("Failed to parse map {}", path.display()))
    }

    /// Parse map text into a blueprint named `name`.
    ///
    /// Placement lines with fewer than three fields are skipped; a
    /// coordinate that is not an integer is an error.
    pub fn parse(name: &str, text: &str) -> LoadResult<LevelBlueprint> {
        let mut blueprint = LevelBlueprint::new(name);
        let mut lines = text.lines().enumerate();

        for (_, line) in lines.by_ref() {
            if line == ENTITIES_MARKER {
                break;
            }
            blueprint.rows.push(line.to_owned());
        }

        for (index, line) in lines {
            if let Some(placement) = parse_placement(line)
                .with_context(|| format!("Invalid placement on line {}: {:?}", index + 1, line))?
            {
                blueprint.placements.push(placement);
            }
        }

        Ok(blueprint)
    }
}

fn parse_placement(line: &str) -> LoadResult<Option<Placement>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Ok(None);
    }

    let Some(glyph) = fields[0].chars().next() else {
        bail!("placement has an empty glyph field");
    };
    let x: i32 = fields[1]
        .parse()
        .with_context(|| format!("x coordinate {:?} is not an integer", fields[1]))?;
    let y: i32 = fields[2]
        .parse()
        .with_context(|| format!("y coordinate {:?} is not an integer", fields[2]))?;

    Ok(Some(Placement::new(glyph, Position::new(x, y))))
}
