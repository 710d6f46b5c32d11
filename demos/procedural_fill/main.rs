//! Procedural fill example
//!
//! Demonstrates how to compose an auto-tiler in code, fill a grid from seeded
//! noise through the batch dispatcher, and inspect what a renderer would draw.
//!
//! Run with: cargo run --example procedural_fill -p libre_autotile_demos
//!
//! Set `RUST_LOG=debug` to see per-batch logging.

use libre_autotile::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const WIDTH: i32 = 48;
const HEIGHT: i32 = 32;
const SEED: u64 = 42;

const WATER: i32 = 0;
const GRASS: i32 = 1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let configuration = terrain_configuration();
    info!(
        bytes = configuration.to_json_string()?.len(),
        "configuration serializes to JSON"
    );

    let grid = AutoTilerComposer::new(configuration)
        .builder(1)?
        .lock_strategy(LockStrategy::WholeGrid)
        .build()?;

    let drawer = Arc::new(MemoryDrawer::new());
    let dispatcher = AutoTileDrawer::new(Arc::new(grid), drawer.clone());

    let terrain = smooth(&generate_noise(SEED), 2);

    // One background batch per row
    for y in 0..HEIGHT {
        let row = (0..WIDTH)
            .map(|x| (GridPos::new(x, y), terrain[index(x, y)]))
            .collect();
        dispatcher.draw_tiles_async(0, row)?;
    }
    dispatcher.wait()?;

    // Rows ran concurrently; redraw the whole area from the final grid state
    let area: Vec<GridPos> = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| GridPos::new(x, y)))
        .collect();
    dispatcher.update_tiles(0, &area)?;

    let mut by_tile: HashMap<i32, usize> = HashMap::new();
    let mut by_atlas: HashMap<String, usize> = HashMap::new();
    for &position in &area {
        if let Some(cell) = drawer.tile(0, position) {
            *by_tile.entry(cell.occupant).or_default() += 1;
            *by_atlas.entry(cell.atlas.to_string()).or_default() += 1;
        }
    }

    info!(
        seed = SEED,
        visible = drawer.visible_count(0),
        water = by_tile.get(&WATER).copied().unwrap_or(0),
        grass = by_tile.get(&GRASS).copied().unwrap_or(0),
        draw_calls = drawer.draw_calls(),
        "procedural fill complete"
    );

    let mut atlases: Vec<_> = by_atlas.into_iter().collect();
    atlases.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (atlas, count) in atlases {
        info!(%atlas, count, "atlas usage");
    }

    Ok(())
}

/// Two tile types, each with an isolated tile, a filled tile and one edge
/// tile per cardinal side
fn terrain_configuration() -> AutoTileConfiguration {
    let mut configuration = AutoTileConfiguration::new(16);
    for (tile_id, name, color) in [
        (WATER, "water", TileColor::rgb(30, 144, 255)),
        (GRASS, "grass", TileColor::rgb(34, 139, 34)),
    ] {
        let image = format!("{name}.png");
        let mut masks = TileMaskDefinition::new()
            .with_mask(GridPos::new(0, 0), Pattern::EMPTY)
            .with_mask(GridPos::new(1, 0), Pattern::filled(tile_id));

        for (column, side) in [Direction::Top, Direction::Right, Direction::Bottom, Direction::Left]
            .into_iter()
            .enumerate()
        {
            let mut edge = Pattern::new([DEFAULT_WILDCARD_ID; 8]);
            for cardinal in [Direction::Top, Direction::Right, Direction::Bottom, Direction::Left] {
                edge = edge.with(cardinal, tile_id);
            }
            masks = masks.with_mask(GridPos::new(column as i32, 1), edge.with(side, EMPTY_ID));
        }

        configuration = configuration.with_tile(
            tile_id as u32,
            TileDefinition::new(name)
                .with_color(color)
                .with_image(image, masks),
        );
    }
    configuration
}

/// Water, grass or nothing per cell
fn generate_noise(seed: u64) -> Vec<i32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..WIDTH * HEIGHT)
        .map(|_| match rng.gen_range(0.0f32..1.0) {
            n if n < 0.35 => WATER,
            n if n < 0.8 => GRASS,
            _ => EMPTY_ID,
        })
        .collect()
}

/// Majority smoothing over the 8 neighbors, out-of-bounds cells ignored
fn smooth(terrain: &[i32], passes: usize) -> Vec<i32> {
    let mut current = terrain.to_vec();
    for _ in 0..passes {
        let mut next = current.clone();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let mut counts: HashMap<i32, usize> = HashMap::new();
                for neighbor in GridPos::new(x, y).neighbors() {
                    if (0..WIDTH).contains(&neighbor.x) && (0..HEIGHT).contains(&neighbor.y) {
                        *counts.entry(current[index(neighbor.x, neighbor.y)]).or_default() += 1;
                    }
                }
                if let Some((&tile_id, &count)) = counts.iter().max_by_key(|(id, count)| (**count, **id)) {
                    if count >= 5 {
                        next[index(x, y)] = tile_id;
                    }
                }
            }
        }
        current = next;
    }
    current
}

fn index(x: i32, y: i32) -> usize {
    (y * WIDTH + x) as usize
}
