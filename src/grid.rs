//! Binary tile grid for cave generation.
//!
//! Row-major storage with explicit bounds checks. Unlike a planetary map
//! there is no horizontal wrapping: a cave is a bounded box whose border
//! cells are always walls, and everything outside the grid counts as
//! wall for neighbourhood scans.

use serde::{Deserialize, Serialize};

/// A single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

/// Integer grid coordinate. Plain value type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another coordinate.
    pub fn distance_sq(&self, other: &Coord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// The cave map: a `width` x `height` grid of tiles.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid with every cell set to Wall.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = self.index(x, y);
        self.tiles[idx] = tile;
    }

    /// Whether a signed coordinate lies inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Tile at a signed coordinate; anything out of bounds reads as Wall.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if self.in_bounds(x, y) {
            self.get(x as usize, y as usize)
        } else {
            Tile::Wall
        }
    }

    /// True if the cell lies on the outer border.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1
    }

    /// Count walls in the 8-neighbourhood of a cell. Out-of-bounds
    /// neighbours count as walls, which keeps the border stable under
    /// smoothing.
    pub fn wall_neighbour_count(&self, x: usize, y: usize) -> u32 {
        let mut count = 0;
        for ny in y as i32 - 1..=y as i32 + 1 {
            for nx in x as i32 - 1..=x as i32 + 1 {
                if nx == x as i32 && ny == y as i32 {
                    continue;
                }
                if self.tile_at(nx, ny) == Tile::Wall {
                    count += 1;
                }
            }
        }
        count
    }

    /// Force every border cell to Wall.
    pub fn seal_border(&mut self) {
        for x in 0..self.width {
            self.set(x, 0, Tile::Wall);
            self.set(x, self.height - 1, Tile::Wall);
        }
        for y in 0..self.height {
            self.set(0, y, Tile::Wall);
            self.set(self.width - 1, y, Tile::Wall);
        }
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().map(move |(idx, &tile)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, tile)
        })
    }

    /// Number of cells of a given tile type.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_wall() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.count(Tile::Wall), 12);
        assert_eq!(grid.count(Tile::Floor), 0);
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, Tile::Floor);
        assert_eq!(grid.tile_at(-1, 0), Tile::Wall);
        assert_eq!(grid.tile_at(0, 3), Tile::Wall);
        assert_eq!(grid.tile_at(1, 1), Tile::Floor);
    }

    #[test]
    fn test_wall_neighbour_count_at_corner() {
        // Corner cell: 3 in-bounds neighbours plus 5 out-of-bounds walls.
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, Tile::Floor);
            }
        }
        assert_eq!(grid.wall_neighbour_count(0, 0), 5);
        assert_eq!(grid.wall_neighbour_count(1, 1), 0);
    }

    #[test]
    fn test_distance_sq() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.distance_sq(&b), 25);
    }
}
