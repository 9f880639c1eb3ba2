//! Connected-region analysis and pruning.
//!
//! Flood-fills the grid into maximal 4-connected regions of one tile
//! type and erases the ones too small to keep: undersized wall regions
//! open into floor, undersized floor regions fill back in. Surviving
//! floor regions are what the room graph is built from.

use std::collections::VecDeque;

use crate::grid::{Coord, Grid, Tile};

/// Tiles of one flood-fill component, in discovery order.
pub type Region = Vec<Coord>;

/// Collect every region of the given tile type.
///
/// Scans x-outer, y-inner; regions come back in the order their first
/// tile is reached, which downstream room numbering relies on.
pub fn find_regions(grid: &Grid, tile_type: Tile) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut visited = vec![false; grid.width * grid.height];

    for x in 0..grid.width {
        for y in 0..grid.height {
            if !visited[y * grid.width + x] && grid.get(x, y) == tile_type {
                let region = flood_fill(grid, x, y);
                for tile in &region {
                    visited[tile.y as usize * grid.width + tile.x as usize] = true;
                }
                regions.push(region);
            }
        }
    }

    regions
}

/// BFS flood fill from a start cell, 4-connected.
///
/// The scan window is the 3x3 box around each tile, filtered down to
/// edge-sharing neighbours; diagonal contact does not join regions.
fn flood_fill(grid: &Grid, start_x: usize, start_y: usize) -> Region {
    let tile_type = grid.get(start_x, start_y);
    let mut tiles = Vec::new();
    let mut visited = vec![false; grid.width * grid.height];
    let mut queue = VecDeque::new();

    queue.push_back(Coord::new(start_x as i32, start_y as i32));
    visited[start_y * grid.width + start_x] = true;

    while let Some(tile) = queue.pop_front() {
        tiles.push(tile);

        for x in tile.x - 1..=tile.x + 1 {
            for y in tile.y - 1..=tile.y + 1 {
                if !grid.in_bounds(x, y) || (x != tile.x && y != tile.y) {
                    continue;
                }
                let idx = y as usize * grid.width + x as usize;
                if !visited[idx] && grid.get(x as usize, y as usize) == tile_type {
                    visited[idx] = true;
                    queue.push_back(Coord::new(x, y));
                }
            }
        }
    }

    tiles
}

/// Erase undersized regions of one tile type by flipping them to the
/// opposite type. Returns the surviving regions.
pub fn prune_regions(grid: &mut Grid, tile_type: Tile, size_minimum: usize) -> Vec<Region> {
    let replacement = match tile_type {
        Tile::Wall => Tile::Floor,
        Tile::Floor => Tile::Wall,
    };

    let mut survivors = Vec::new();
    for region in find_regions(grid, tile_type) {
        if region.len() < size_minimum {
            for tile in &region {
                grid.set(tile.x as usize, tile.y as usize, replacement);
            }
        } else {
            survivors.push(region);
        }
    }
    survivors
}
