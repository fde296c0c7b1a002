use std::fs;
use std::path::Path;

use game_content::{CatalogLoader, ContentFactory, MapLoader, WorldLoader};
use game_core::{EventKind, GenerationError, Input, Position, TurnOutcome};
use tempfile::TempDir;

const UPPER: &str = "\
#####
#@.>#
#####
ENTITIES:
s,2,1
";

const LOWER: &str = "\
#####
#<.R#
#####
";

const WORLD: &str = "upper\nupper,3,1,lower,1,1\n";

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let maps = dir.path().join("maps");
    fs::create_dir(&maps).expect("maps dir");
    write(&maps, "upper.map", UPPER);
    write(&maps, "lower.map", LOWER);
    write(&maps, "world.txt", WORLD);
    write(&maps, "notes.md", "not a map");
    dir
}

#[test]
fn map_file_is_named_after_its_stem() {
    let dir = data_dir();
    let blueprint = MapLoader::load(&dir.path().join("maps/upper.map")).unwrap();
    assert_eq!(blueprint.name, "upper");
    assert_eq!(blueprint.rows.len(), 3);
    assert_eq!(blueprint.placements.len(), 1);
}

#[test]
fn map_directory_collects_levels_in_name_order() {
    let dir = data_dir();
    let world = WorldLoader::load_dir(&dir.path().join("maps")).unwrap();

    let names: Vec<&str> = world.levels.iter().map(|level| level.name.as_str()).collect();
    assert_eq!(names, vec!["lower", "upper"]);
    assert_eq!(world.start_level, "upper");
    assert_eq!(world.portals.len(), 1);
    assert_eq!(world.portals[0].to, Position::new(1, 1));
}

#[test]
fn missing_world_file_is_reported_with_its_path() {
    let dir = data_dir();
    fs::remove_file(dir.path().join("maps/world.txt")).unwrap();

    let error = WorldLoader::load_dir(&dir.path().join("maps")).unwrap_err();
    assert!(error.to_string().contains("world.txt"));
}

#[test]
fn broken_catalog_names_the_file() {
    let dir = data_dir();
    let path = dir.path().join("catalog.ron");
    write(dir.path(), "catalog.ron", "(player: 12)");

    let error = CatalogLoader::load(&path).unwrap_err();
    assert!(error.to_string().contains("catalog.ron"));
}

#[test]
fn factory_builds_a_playable_game() {
    let dir = data_dir();
    write(dir.path(), "config.toml", "log_capacity = 3\n");

    let mut game = ContentFactory::new(dir.path()).build_game().unwrap();
    assert_eq!(game.config().log_capacity, 3);

    let snapshot = game.start();
    assert_eq!(snapshot.level.name(), "upper");
    assert_eq!(snapshot.items_at(Position::new(2, 1)).count(), 1);
    assert_eq!(snapshot.level.items_at(Position::new(2, 1)).len(), 1);

    game.handle_input(Input::Move(game_core::Direction::Right));
    let TurnOutcome::Continue(snapshot) = game.handle_input(Input::Move(game_core::Direction::Right))
    else {
        panic!("game should continue");
    };
    assert_eq!(snapshot.level.name(), "lower");
    assert_eq!(snapshot.player.position, Position::new(1, 1));
    assert!(snapshot.events().contains(&EventKind::Portal));
}

#[test]
fn factory_rejects_worlds_with_unknown_levels() {
    let dir = data_dir();
    write(&dir.path().join("maps"), "world.txt", "cellar\n");

    assert!(ContentFactory::new(dir.path()).build_game().is_err());
}

#[test]
fn factory_rejects_monsters_stacked_on_one_cell() {
    let dir = data_dir();
    write(&dir.path().join("maps"), "lower.map", "#####\n#<.R#\n#####\nENTITIES:\nS,3,1\n");

    let error = ContentFactory::new(dir.path()).build_game().unwrap_err();
    assert_eq!(
        error.downcast_ref::<GenerationError>(),
        Some(&GenerationError::OccupiedPlacement {
            level: "lower".into(),
            glyph: 'S',
            position: Position::new(3, 1),
        })
    );
}

#[test]
fn factory_rejects_monsters_inside_walls() {
    let dir = data_dir();
    write(&dir.path().join("maps"), "lower.map", "#####\n#<..#\n#####\nENTITIES:\nR,0,0\n");

    let error = ContentFactory::new(dir.path()).build_game().unwrap_err();
    assert!(matches!(
        error.downcast_ref::<GenerationError>(),
        Some(GenerationError::UnwalkablePlacement { glyph: 'R', .. })
    ));
}

#[test]
fn bundled_assets_generate_a_world() {
    let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../assets");
    let factory = ContentFactory::new(&assets);

    let mut game = factory.build_game().unwrap();
    let snapshot = game.start();
    assert_eq!(snapshot.level.name(), "level1");
    assert_eq!(game.levels().len(), 2);

    let chest = snapshot.level.storage_at(Position::new(12, 1)).expect("chest");
    assert_eq!(chest.items().len(), 1);
    assert!(snapshot.level.items_at(Position::new(12, 1)).is_empty());
    game.check_integrity().unwrap();
}
