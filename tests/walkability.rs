mod common;

use common::WorldBuilder;
use vastland_data::TileKind;

#[test]
fn test_obstacle_tile_is_not_walkable() {
    let world = WorldBuilder::new().with_obstacle_at(10, 10).build();
    assert!(!world.is_walkable(10.0, 10.0));
    assert!(!world.is_walkable(10.9, 10.9), "same tile, fractional coords");
    assert!(world.is_walkable(11.0, 10.0), "neighbor tile is open");
}

#[test]
fn test_unresident_coordinates_are_never_walkable() {
    let world = WorldBuilder::new().flat().build();
    // far outside the resident window: grass by the source, but absent
    assert!(!world.is_walkable(100_000.0, 100_000.0));
    assert!(world.is_walkable(0.5, 0.5));
}

#[test]
fn test_walkability_is_a_pure_function_of_the_tile() {
    let world = WorldBuilder::new().with_seed(42).build();

    let radius_tiles = (world.config.chunks.load_radius as i64) * 16;
    for ty in -radius_tiles..radius_tiles {
        for tx in -radius_tiles..radius_tiles {
            let (x, y) = (tx as f64 + 0.5, ty as f64 + 0.5);
            let Some(tile) = world.chunks().tile_at(x, y) else {
                continue;
            };
            assert_eq!(
                world.is_walkable(x, y),
                tile.is_walkable(),
                "tile ({tx},{ty}) is {tile:?}"
            );
        }
    }
}

#[test]
fn test_hazard_and_obstacle_both_block() {
    let source = |x: i64, _: i64| match x {
        0 => TileKind::Water,
        1 => TileKind::Rock,
        _ => TileKind::Grass,
    };
    let world = WorldBuilder::new().with_source(source).build();
    assert!(!world.is_walkable(0.5, 0.0), "hazard blocks");
    assert!(!world.is_walkable(1.5, 0.0), "obstacle blocks");
    assert!(world.is_walkable(2.5, 0.0));
}
